use diesel::prelude::*;
use sachio_ops::schema::users;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Selectable, Identifiable, Debug, Serialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub blocked: bool,
    pub is_driver: bool,
    pub is_driver_active: bool,
}

#[derive(Deserialize)]
pub struct UpdateBlockedPayload {
    pub blocked: bool,
}

#[derive(Deserialize)]
pub struct UpdateDriverPayload {
    pub is_driver: bool,
}

#[derive(Deserialize)]
pub struct UpdateDriverActivePayload {
    pub is_driver_active: bool,
}
