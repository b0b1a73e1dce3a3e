use chrono::{DateTime, Utc};
use diesel::prelude::*;
use sachio_ops::schema::driver_locations;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Positions are written out-of-band by the driver mobile client; every
/// dashboard surface treats them as read-only.
#[derive(Queryable, Selectable, Insertable, Debug, Serialize)]
#[diesel(table_name = driver_locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DriverLocation {
    pub driver_id: Uuid,
    pub lat: f64,
    pub lng: f64,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct LocationReportPayload {
    pub lat: f64,
    pub lng: f64,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
}

#[derive(Serialize)]
pub struct DriverLocationView {
    pub driver_id: Uuid,
    pub lat: f64,
    pub lng: f64,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
    pub updated_at: DateTime<Utc>,
    pub stale: bool,
}
