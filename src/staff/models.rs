use chrono::{DateTime, Utc};
use diesel::prelude::*;
use sachio_ops::schema::{staff_accounts, staff_sessions};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug)]
#[diesel(table_name = staff_accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StaffAccount {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub blocked: bool,
    pub created_at: DateTime<Utc>,
}

/// Never serialize the hash back out.
#[derive(Queryable, Selectable, Debug, Serialize)]
#[diesel(table_name = staff_accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SafeStaffAccount {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub blocked: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct NewStaffPayload {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct UpdateStaffBlockedPayload {
    pub blocked: bool,
}

#[derive(Queryable, Selectable, Insertable, Debug, Serialize)]
#[diesel(table_name = staff_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StaffSession {
    pub email: String,
    pub role: String,
    pub status: String,
    pub last_active: DateTime<Utc>,
}
