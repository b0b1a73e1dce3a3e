use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OrderEventPayload {
    pub order_id: Uuid,
    pub customer_name: String,
    pub order_type: String,
    pub status: String,
    pub amount: Option<f64>,
    pub product_title: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OrderEvent {
    New(OrderEventPayload),
    Paid(OrderEventPayload),
    Cancelled(OrderEventPayload),
}

impl OrderEvent {
    pub fn label(&self) -> &'static str {
        match self {
            OrderEvent::New(_) => "New order received",
            OrderEvent::Paid(_) => "Order paid",
            OrderEvent::Cancelled(_) => "Order cancelled",
        }
    }

    pub fn payload(&self) -> &OrderEventPayload {
        match self {
            OrderEvent::New(payload) => payload,
            OrderEvent::Paid(payload) => payload,
            OrderEvent::Cancelled(payload) => payload,
        }
    }
}
