use crate::order::lifecycle::OrderStatus;
use chrono::{DateTime, Datelike, Duration, Utc};
use serde::Serialize;

/// Denormalized slice of an order row, enough for every dashboard metric.
#[derive(Debug, Clone)]
pub struct OrderFacts {
    pub order_type: String,
    pub amount: f64,
    pub status: OrderStatus,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct ProductFacts {
    pub in_stock: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Lane {
    pub label: String,
    pub value: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertView {
    pub title: String,
    pub tone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Stat {
    pub label: String,
    pub value: String,
    pub delta: String,
    pub tone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RevenueTotals {
    pub daily: f64,
    pub monthly: f64,
    pub yearly: f64,
}

pub fn format_naira(value: f64) -> String {
    format!("NGN {}", group_thousands(value))
}

fn group_thousands(value: f64) -> String {
    let whole = value.trunc() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

fn is_cancelled(status: OrderStatus) -> bool {
    matches!(status, OrderStatus::Cancelled | OrderStatus::CancelledByAdmin)
}

fn is_fulfilled(status: OrderStatus) -> bool {
    matches!(status, OrderStatus::Completed | OrderStatus::Delivered)
}

fn ratio_pct(part: usize, total: usize) -> i32 {
    if total == 0 {
        0
    } else {
        ((part as f64 / total as f64) * 100.0).round() as i32
    }
}

/// The four operational-health lanes. Every value is a 0-100 percentage
/// derived client-style from whatever slices are on hand.
pub fn compute_operational_health(
    orders: &[OrderFacts],
    products: &[ProductFacts],
    alert_count: usize,
) -> Vec<Lane> {
    let in_stock = products.iter().filter(|p| p.in_stock).count();
    let fleet_readiness = ratio_pct(in_stock, products.len());

    let completed = orders.iter().filter(|o| is_fulfilled(o.status)).count();
    let sanitation_cycle = ratio_pct(completed, orders.len());

    let cancelled = orders.iter().filter(|o| is_cancelled(o.status)).count();
    let dispatch_reliability = ratio_pct(orders.len() - cancelled, orders.len());

    let support_load = (100 - alert_count as i32 * 12).max(0);

    vec![
        Lane { label: "Fleet Readiness".to_owned(), value: fleet_readiness },
        Lane { label: "Sanitation Cycle".to_owned(), value: sanitation_cycle },
        Lane { label: "Dispatch Reliability".to_owned(), value: dispatch_reliability },
        Lane { label: "Customer Support Load".to_owned(), value: support_load },
    ]
}

/// Stand-in alerts when the alerts collection is empty.
pub fn build_alerts_from_data(orders: &[OrderFacts], products: &[ProductFacts]) -> Vec<AlertView> {
    let mut alerts = Vec::new();

    let low_stock = products.iter().filter(|p| !p.in_stock).count();
    if low_stock > 0 {
        alerts.push(AlertView {
            title: format!(
                "{} product{} out of stock",
                low_stock,
                if low_stock > 1 { "s" } else { "" }
            ),
            tone: "red".to_owned(),
        });
    }

    let backlog = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Processing)
        .count();
    if backlog > 6 {
        alerts.push(AlertView {
            title: format!("{} orders waiting on fulfillment", backlog),
            tone: "amber".to_owned(),
        });
    }

    let cancelled = orders.iter().filter(|o| is_cancelled(o.status)).count();
    if !orders.is_empty() && cancelled as f64 / orders.len() as f64 > 0.2 {
        alerts.push(AlertView {
            title: "Cancellation rate above 20%".to_owned(),
            tone: "red".to_owned(),
        });
    }

    let in_transit = orders
        .iter()
        .filter(|o| o.status == OrderStatus::InTransit)
        .count();
    if in_transit > 0 {
        alerts.push(AlertView {
            title: format!("{} deliveries currently in transit", in_transit),
            tone: "emerald".to_owned(),
        });
    }

    alerts
}

/// Stand-in headline stats when the stats collection is empty.
pub fn build_stats_from_orders(orders: &[OrderFacts], now: DateTime<Utc>) -> Vec<Stat> {
    let revenue: f64 = orders
        .iter()
        .filter(|o| {
            o.status == OrderStatus::Completed
                && o.created_at.map(|d| same_month(d, now)).unwrap_or(false)
        })
        .map(|o| o.amount)
        .sum();

    let rentals = orders
        .iter()
        .filter(|o| o.order_type == "rent" && !is_cancelled(o.status))
        .count();

    let delivered = orders.iter().filter(|o| is_fulfilled(o.status)).count();
    let on_time = ratio_pct(delivered, orders.len());

    vec![
        Stat {
            label: "Revenue (MTD)".to_owned(),
            value: format_naira(revenue),
            delta: String::new(),
            tone: "green".to_owned(),
        },
        Stat {
            label: "Orders".to_owned(),
            value: orders.len().to_string(),
            delta: String::new(),
            tone: String::new(),
        },
        Stat {
            label: "Rentals in progress".to_owned(),
            value: rentals.to_string(),
            delta: String::new(),
            tone: String::new(),
        },
        Stat {
            label: "On-time delivery".to_owned(),
            value: format!("{}%", on_time),
            delta: String::new(),
            tone: "green".to_owned(),
        },
    ]
}

/// Calendar-day buckets over the trend window, zero-filled, oldest first.
pub fn build_revenue_trend(
    orders: &[OrderFacts],
    window_days: i64,
    today: DateTime<Utc>,
) -> Vec<TrendPoint> {
    let span = (window_days - 1).max(1);
    let days: Vec<_> = (0..=span)
        .rev()
        .map(|i| (today - Duration::days(i)).date_naive())
        .collect();
    let mut values = vec![0.0; days.len()];

    for order in orders {
        let Some(created) = order.created_at else { continue };
        let key = created.date_naive();
        if let Some(pos) = days.iter().position(|day| *day == key) {
            values[pos] += order.amount;
        }
    }

    days.iter()
        .zip(values)
        .map(|(day, value)| TrendPoint {
            label: day.format("%a").to_string(),
            value,
        })
        .collect()
}

fn same_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() == b.date_naive()
}

fn same_month(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

fn same_year(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.year() == b.year()
}

/// Completed orders only, bucketed by calendar boundaries against now.
pub fn build_revenue_totals(orders: &[OrderFacts], now: DateTime<Utc>) -> RevenueTotals {
    let completed: Vec<_> = orders
        .iter()
        .filter_map(|o| {
            if o.status != OrderStatus::Completed {
                return None;
            }
            o.created_at.map(|created| (created, o.amount))
        })
        .collect();

    let sum_when = |pred: &dyn Fn(DateTime<Utc>) -> bool| -> f64 {
        completed
            .iter()
            .filter(|(created, _)| pred(*created))
            .map(|(_, amount)| amount)
            .sum()
    };

    RevenueTotals {
        daily: sum_when(&|d| same_day(d, now)),
        monthly: sum_when(&|d| same_month(d, now)),
        yearly: sum_when(&|d| same_year(d, now)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::lifecycle::{self, normalize_status};
    use chrono::TimeZone;

    fn order(
        order_type: &str,
        amount: f64,
        status: OrderStatus,
        created_at: Option<DateTime<Utc>>,
    ) -> OrderFacts {
        OrderFacts {
            order_type: order_type.to_owned(),
            amount,
            status,
            created_at,
        }
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
    }

    #[test]
    fn revenue_totals_bucket_completed_orders_by_calendar_boundary() {
        let now = at(2025, 6, 15);
        let orders = vec![
            order("buy", 1_000.0, OrderStatus::Completed, Some(now)),
            order("rent", 2_000.0, OrderStatus::Completed, Some(at(2025, 6, 3))),
            order("buy", 4_000.0, OrderStatus::Completed, Some(at(2025, 2, 20))),
            order("buy", 8_000.0, OrderStatus::Completed, Some(at(2024, 6, 15))),
            order("buy", 16_000.0, OrderStatus::Delivered, Some(now)),
            order("buy", 32_000.0, OrderStatus::Completed, None),
        ];

        let totals = build_revenue_totals(&orders, now);
        assert_eq!(totals.daily, 1_000.0);
        assert_eq!(totals.monthly, 3_000.0);
        assert_eq!(totals.yearly, 7_000.0);
    }

    #[test]
    fn operational_health_lanes_are_rounded_ratios() {
        let orders = vec![
            order("buy", 0.0, OrderStatus::Completed, None),
            order("rent", 0.0, OrderStatus::Delivered, None),
            order("rent", 0.0, OrderStatus::Cancelled, None),
            order("buy", 0.0, OrderStatus::Processing, None),
        ];
        let products = vec![
            ProductFacts { in_stock: true },
            ProductFacts { in_stock: true },
            ProductFacts { in_stock: false },
        ];

        let lanes = compute_operational_health(&orders, &products, 2);
        assert_eq!(lanes[0], Lane { label: "Fleet Readiness".to_owned(), value: 67 });
        assert_eq!(lanes[1], Lane { label: "Sanitation Cycle".to_owned(), value: 50 });
        assert_eq!(lanes[2], Lane { label: "Dispatch Reliability".to_owned(), value: 75 });
        assert_eq!(lanes[3], Lane { label: "Customer Support Load".to_owned(), value: 76 });
    }

    #[test]
    fn operational_health_handles_empty_slices() {
        let lanes = compute_operational_health(&[], &[], 10);
        assert_eq!(lanes[0].value, 0);
        assert_eq!(lanes[1].value, 0);
        assert_eq!(lanes[2].value, 0);
        assert_eq!(lanes[3].value, 0);
    }

    #[test]
    fn derived_alerts_cover_each_rule() {
        let mut orders: Vec<OrderFacts> = (0..7)
            .map(|_| order("buy", 0.0, OrderStatus::Processing, None))
            .collect();
        orders.push(order("rent", 0.0, OrderStatus::InTransit, None));
        orders.push(order("rent", 0.0, OrderStatus::CancelledByAdmin, None));
        orders.push(order("rent", 0.0, OrderStatus::Cancelled, None));
        orders.push(order("rent", 0.0, OrderStatus::Cancelled, None));
        let products = vec![ProductFacts { in_stock: false }];

        let alerts = build_alerts_from_data(&orders, &products);
        let titles: Vec<&str> = alerts.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "1 product out of stock",
                "7 orders waiting on fulfillment",
                "Cancellation rate above 20%",
                "1 deliveries currently in transit",
            ]
        );
        assert_eq!(alerts[0].tone, "red");
        assert_eq!(alerts[1].tone, "amber");
        assert_eq!(alerts[3].tone, "emerald");
    }

    #[test]
    fn no_alerts_derived_from_healthy_data() {
        let orders = vec![order("buy", 0.0, OrderStatus::Completed, None)];
        let products = vec![ProductFacts { in_stock: true }];
        assert!(build_alerts_from_data(&orders, &products).is_empty());
    }

    #[test]
    fn stand_in_stats_sum_month_to_date_completed_revenue() {
        let now = at(2025, 6, 15);
        let orders = vec![
            order("buy", 100_000.0, OrderStatus::Completed, Some(at(2025, 6, 1))),
            order("rent", 50_000.0, OrderStatus::Completed, Some(at(2025, 5, 30))),
            order("rent", 10_000.0, OrderStatus::InTransit, Some(now)),
            order("rent", 10_000.0, OrderStatus::Cancelled, Some(now)),
        ];

        let stats = build_stats_from_orders(&orders, now);
        assert_eq!(stats[0].value, "NGN 100,000");
        assert_eq!(stats[1].value, "4");
        assert_eq!(stats[2].value, "2");
        assert_eq!(stats[3].value, "50%");
    }

    #[test]
    fn revenue_trend_zero_fills_the_window() {
        let today = at(2025, 6, 15);
        let orders = vec![
            order("buy", 500.0, OrderStatus::Completed, Some(today)),
            order("buy", 250.0, OrderStatus::Processing, Some(at(2025, 6, 14))),
            order("buy", 999.0, OrderStatus::Completed, Some(at(2025, 6, 1))),
        ];

        let trend = build_revenue_trend(&orders, 7, today);
        assert_eq!(trend.len(), 7);
        assert_eq!(trend[6].value, 500.0);
        assert_eq!(trend[5].value, 250.0);
        assert!(trend[..5].iter().all(|point| point.value == 0.0));
        assert_eq!(trend[6].label, today.format("%a").to_string());
    }

    #[test]
    fn priced_rental_stays_out_of_revenue_totals() {
        // rent order waits for a price, admin sets 50 000, totals ignore it
        let now = at(2025, 6, 15);
        let change = lifecycle::price_set_change(50_000.0, now).unwrap();
        assert_eq!(change.amount, 50_000.0);
        assert_eq!(change.price, 50_000.0);
        assert_eq!(change.status, "price_set");

        let facts = order(
            "rent",
            change.price,
            normalize_status(change.status),
            Some(now),
        );
        let totals = build_revenue_totals(&[facts], now);
        assert_eq!(totals, RevenueTotals { daily: 0.0, monthly: 0.0, yearly: 0.0 });
    }
}
