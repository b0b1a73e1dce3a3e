use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Raw states an admin may write. Stored as free text; nothing at the
/// storage layer enforces membership.
pub const STATUS_OPTIONS: [&str; 9] = [
    "processing",
    "dispatched",
    "in_transit",
    "delivered",
    "completed",
    "cancelled_by_admin",
    "waiting_admin_price",
    "price_set",
    "paid",
];

/// Normalized view of a stored status string, used for rendering and for
/// revenue bucketing. Unknown input collapses to `Processing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderStatus {
    #[serde(rename = "Processing")]
    Processing,
    #[serde(rename = "Dispatched")]
    Dispatched,
    #[serde(rename = "Delivered")]
    Delivered,
    #[serde(rename = "Cancelled")]
    Cancelled,
    #[serde(rename = "Cancelled_by_admin")]
    CancelledByAdmin,
    #[serde(rename = "In transit")]
    InTransit,
    #[serde(rename = "Completed")]
    Completed,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Dispatched => "Dispatched",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::CancelledByAdmin => "Cancelled_by_admin",
            OrderStatus::InTransit => "In transit",
            OrderStatus::Completed => "Completed",
        }
    }
}

/// Lowercase, collapse `_`/`-` runs to a single space, trim. Every status
/// comparison in the system goes through this first.
pub fn normalize_order_signal(value: &str) -> String {
    let lower = value.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut in_separator = false;
    for ch in lower.chars() {
        if ch == '_' || ch == '-' {
            if !in_separator {
                out.push(' ');
            }
            in_separator = true;
        } else {
            out.push(ch);
            in_separator = false;
        }
    }
    out.trim().to_string()
}

pub fn normalize_status(value: &str) -> OrderStatus {
    match normalize_order_signal(value).as_str() {
        "processing" => OrderStatus::Processing,
        "dispatched" => OrderStatus::Dispatched,
        "delivered" => OrderStatus::Delivered,
        "cancelled" => OrderStatus::Cancelled,
        "cancelled by admin" => OrderStatus::CancelledByAdmin,
        "in transit" => OrderStatus::InTransit,
        "completed" => OrderStatus::Completed,
        _ => OrderStatus::Processing,
    }
}

/// Substring match on either field. "PAID_OUT" counts as paid; that
/// ambiguity is inherited from the stored data and is intentional.
pub fn is_paid_order_signal(status: &str, payment_status: Option<&str>) -> bool {
    normalize_order_signal(status).contains("paid")
        || payment_status
            .map(|p| normalize_order_signal(p).contains("paid"))
            .unwrap_or(false)
}

pub fn is_cancelled_order_signal(status: &str) -> bool {
    normalize_order_signal(status).contains("cancel")
}

/// Rentals lock status editing until a paid signal lands in either field.
/// Purchases are payment-confirmed up front and stay editable.
pub fn can_edit_status(order_type: &str, status: &str, payment_status: Option<&str>) -> bool {
    order_type != "rent" || is_paid_order_signal(status, payment_status)
}

#[derive(Debug, PartialEq)]
pub struct PriceSetChange {
    pub amount: f64,
    pub price: f64,
    pub status: &'static str,
    pub payment_status: &'static str,
    pub price_set_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// The set-price transition for an unpaid rental. The expiry is descriptive
/// metadata only; no sweep ever acts on it.
pub fn price_set_change(amount: f64, now: DateTime<Utc>) -> Result<PriceSetChange, String> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err("Enter a valid amount".to_owned());
    }

    Ok(PriceSetChange {
        amount,
        price: amount,
        status: "price_set",
        payment_status: "awaiting_payment",
        price_set_at: now,
        expires_at: now + Duration::hours(24),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn normalize_status_maps_every_documented_variant() {
        let cases = [
            ("processing", OrderStatus::Processing),
            ("Processing", OrderStatus::Processing),
            ("dispatched", OrderStatus::Dispatched),
            ("delivered", OrderStatus::Delivered),
            ("cancelled", OrderStatus::Cancelled),
            ("cancelled by admin", OrderStatus::CancelledByAdmin),
            ("cancelled-by-admin", OrderStatus::CancelledByAdmin),
            ("cancelled_by_admin", OrderStatus::CancelledByAdmin),
            ("CANCELLED_BY_ADMIN", OrderStatus::CancelledByAdmin),
            ("in transit", OrderStatus::InTransit),
            ("in-transit", OrderStatus::InTransit),
            ("in_transit", OrderStatus::InTransit),
            ("completed", OrderStatus::Completed),
            ("  completed  ", OrderStatus::Completed),
        ];
        for (raw, expected) in cases {
            assert_eq!(normalize_status(raw), expected, "raw: {raw:?}");
        }
    }

    #[test]
    fn normalize_status_unknown_input_maps_to_processing() {
        for raw in ["", "price_set", "waiting_admin_price", "paid", "garbage"] {
            assert_eq!(normalize_status(raw), OrderStatus::Processing);
        }
    }

    #[test]
    fn signal_normalization_collapses_separator_runs() {
        assert_eq!(normalize_order_signal("Cancelled__by--Admin"), "cancelled by admin");
        assert_eq!(normalize_order_signal("_paid_"), "paid");
    }

    #[test]
    fn paid_signal_is_a_substring_match_on_either_field() {
        assert!(is_paid_order_signal("Paid", None));
        assert!(is_paid_order_signal("", Some("PAID_OUT")));
        assert!(is_paid_order_signal("unpaid", None));
        assert!(!is_paid_order_signal("awaiting_payment", None));
        assert!(!is_paid_order_signal("processing", Some("awaiting_payment")));
    }

    #[test]
    fn cancelled_signal_matches_any_cancel_variant() {
        assert!(is_cancelled_order_signal("cancelled"));
        assert!(is_cancelled_order_signal("Cancelled_by_admin"));
        assert!(!is_cancelled_order_signal("completed"));
    }

    #[test]
    fn rental_status_edit_requires_paid_signal() {
        assert!(!can_edit_status("rent", "waiting_admin_price", Some("awaiting_payment")));
        assert!(can_edit_status("rent", "paid", None));
        assert!(can_edit_status("rent", "processing", Some("PAID_OUT")));
        assert!(can_edit_status("buy", "processing", None));
    }

    #[test]
    fn price_set_change_writes_both_fields_and_a_24h_expiry() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();
        let change = price_set_change(50_000.0, now).unwrap();
        assert_eq!(change.amount, 50_000.0);
        assert_eq!(change.price, 50_000.0);
        assert_eq!(change.status, "price_set");
        assert_eq!(change.payment_status, "awaiting_payment");
        assert_eq!(change.price_set_at, now);
        assert_eq!(change.expires_at - now, Duration::hours(24));
    }

    #[test]
    fn price_set_change_rejects_non_positive_amounts() {
        let now = Utc::now();
        assert!(price_set_change(0.0, now).is_err());
        assert!(price_set_change(-5.0, now).is_err());
        assert!(price_set_change(f64::NAN, now).is_err());
    }
}
