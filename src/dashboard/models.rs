use super::metrics::{AlertView, Lane, RevenueTotals, Stat, TrendPoint};
use crate::order::lifecycle::OrderStatus;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use sachio_ops::schema::{alerts, dashboard_stats};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Selectable, Identifiable, Debug, Serialize)]
#[diesel(table_name = alerts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Alert {
    pub id: i32,
    pub title: String,
    pub tone: String,
}

#[derive(Insertable, Deserialize)]
#[diesel(table_name = alerts)]
pub struct NewAlert {
    pub title: String,
    pub tone: Option<String>,
}

#[derive(Queryable, Selectable, Debug, Serialize)]
#[diesel(table_name = dashboard_stats)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DashboardStat {
    pub id: i32,
    pub label: String,
    pub value: String,
    pub delta: String,
    pub tone: String,
}

#[derive(Deserialize)]
pub struct TrendQuery {
    pub days: Option<i64>,
}

#[derive(Serialize)]
pub struct OrderRow {
    pub id: Uuid,
    pub customer: String,
    pub order_type: String,
    pub total: String,
    pub status: OrderStatus,
    pub eta: String,
}

#[derive(Serialize)]
pub struct ProductRow {
    pub id: i32,
    pub title: String,
    pub price: String,
    pub category: String,
    pub in_stock: bool,
}

#[derive(Serialize)]
pub struct CategoryRow {
    pub id: i32,
    pub name: String,
    pub segment: String,
    pub count: i32,
    pub image_url: Option<String>,
}

/// The whole dashboard in one payload; shape is identical whatever slices
/// were actually reachable.
#[derive(Serialize)]
pub struct DashboardView {
    pub stats: Vec<Stat>,
    pub orders: Vec<OrderRow>,
    pub products: Vec<ProductRow>,
    pub categories: Vec<CategoryRow>,
    pub lanes: Vec<Lane>,
    pub alerts: Vec<AlertView>,
    pub revenue_trend: Vec<TrendPoint>,
    pub revenue_totals: RevenueTotals,
    pub last_updated: DateTime<Utc>,
}
