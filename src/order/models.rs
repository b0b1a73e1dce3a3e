use chrono::{DateTime, Utc};
use diesel::prelude::*;
use sachio_ops::schema::orders;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, Serialize)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Order {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub order_type: String,
    pub product_title: Option<String>,
    pub amount: Option<f64>,
    pub price: Option<f64>,
    pub status: String,
    pub payment_status: Option<String>,
    pub eta: Option<String>,
    pub driver_id: Option<Uuid>,
    pub driver_name: Option<String>,
    pub driver_email: Option<String>,
    pub destination_lat: Option<f64>,
    pub destination_lng: Option<f64>,
    pub destination_address: Option<String>,
    pub destination_set_at: Option<DateTime<Utc>>,
    pub price_set_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Intake payload. Orders arrive from the customer-facing app; the dashboard
/// only mutates them afterwards.
#[derive(Deserialize, Debug)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub order_type: String,
    pub product_title: Option<String>,
    pub amount: Option<f64>,
    pub price: Option<f64>,
    pub status: Option<String>,
    pub payment_status: Option<String>,
    pub eta: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateStatusPayload {
    pub status: String,
}

#[derive(Deserialize)]
pub struct SetPricePayload {
    pub amount: f64,
}

#[derive(Deserialize)]
pub struct AssignDriverPayload {
    pub driver_id: Option<Uuid>,
}

/// Destination can come in as coordinates (map click / marker drag, address
/// optional) or as a bare address to geocode.
#[derive(Deserialize)]
pub struct SetDestinationPayload {
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Serialize)]
pub struct TrackingLocation {
    pub lat: f64,
    pub lng: f64,
    pub speed_kmh: Option<i64>,
    pub heading: Option<f64>,
    pub heading_label: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct TrackingDestination {
    pub lat: f64,
    pub lng: f64,
    pub address: Option<String>,
}

#[derive(Serialize)]
pub struct TrackingRoute {
    pub distance_text: String,
    pub duration_text: String,
}

/// One subscription tick of the order-detail tracking view. Everything here
/// is recomputed from scratch per request; nothing is persisted.
#[derive(Serialize)]
pub struct TrackingView {
    pub order_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub driver_name: Option<String>,
    pub driver_status: String,
    pub location: Option<TrackingLocation>,
    pub destination: Option<TrackingDestination>,
    pub route: Option<TrackingRoute>,
    pub arrival_soon: bool,
    pub off_route: bool,
}
