use diesel::prelude::*;
use sachio_ops::schema::categories;
use serde::{Deserialize, Serialize};

#[derive(Queryable, Selectable, Identifiable, Debug, Serialize)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub segment: String,
    pub count: i32,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Insertable, Deserialize)]
#[diesel(table_name = categories)]
pub struct NewCategory {
    pub name: String,
    pub segment: Option<String>,
    pub count: Option<i32>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize, AsChangeset)]
#[diesel(table_name = categories)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub segment: Option<String>,
    pub count: Option<i32>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}
