use chrono::{DateTime, Utc};
use diesel::prelude::*;
use sachio_ops::schema::announcements;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Selectable, Identifiable, Debug, Serialize)]
#[diesel(table_name = announcements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Announcement {
    pub id: i32,
    pub title: String,
    pub message: String,
    pub audience: String,
    pub target_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Deserialize)]
#[diesel(table_name = announcements)]
pub struct NewAnnouncement {
    pub title: String,
    pub message: String,
    pub audience: Option<String>,
    pub target_user_id: Option<Uuid>,
}
