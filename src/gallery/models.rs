use chrono::{DateTime, Utc};
use diesel::prelude::*;
use sachio_ops::schema::gallery;
use serde::{Deserialize, Serialize};

#[derive(Queryable, Selectable, Identifiable, Debug, Serialize)]
#[diesel(table_name = gallery)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GalleryItem {
    pub id: i32,
    pub title: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Deserialize)]
#[diesel(table_name = gallery)]
pub struct NewGalleryItem {
    pub title: String,
    pub image_url: String,
}
