use super::metrics::{
    self, AlertView, Lane, OrderFacts, ProductFacts, Stat, format_naira,
};
use super::models::{
    Alert, CategoryRow, DashboardStat, DashboardView, NewAlert, OrderRow, ProductRow, TrendQuery,
};
use super::pdf::build_simple_pdf;
use crate::auth::models::AccessTokenClaims;
use crate::category::models::Category;
use crate::order::lifecycle::normalize_status;
use crate::order::models::Order;
use crate::product::models::Product;
use crate::utils::error::not_found_or_internal;
use crate::utils::{internal_error, types::Pool};
use axum::{
    extract::{Json, Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse},
};
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

const RECENT_ORDERS: i64 = 7;
const RECENT_PRODUCTS: i64 = 5;
const TOP_CATEGORIES: i64 = 6;

pub async fn get_dashboard(
    State(pool): State<Pool>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<DashboardView>, (StatusCode, String)> {
    let days = trend_window(query.days);
    let view = build_dashboard_view(&pool, days).await?;
    Ok(Json(view))
}

/// Printable snapshot of the same aggregation.
pub async fn export_dashboard(
    State(pool): State<Pool>,
) -> Result<Html<String>, (StatusCode, String)> {
    let view = build_dashboard_view(&pool, 7).await?;

    let stat_rows: String = view
        .stats
        .iter()
        .map(|s| format!("<tr><td>{}</td><td>{}</td><td>{}</td></tr>", s.label, s.value, s.delta))
        .collect();
    let order_rows: String = view
        .orders
        .iter()
        .map(|o| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                o.id,
                o.customer,
                o.order_type,
                o.total,
                o.status.label(),
                o.eta
            )
        })
        .collect();
    let product_rows: String = view
        .products
        .iter()
        .map(|p| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                p.title,
                p.category,
                p.price,
                if p.in_stock { "Yes" } else { "No" }
            )
        })
        .collect();

    let html = format!(
        r#"<html>
  <head>
    <title>Sachio Dashboard Export</title>
    <style>
      body {{ font-family: Arial, sans-serif; padding: 24px; color: #0f172a; }}
      h1 {{ margin-bottom: 8px; }}
      h2 {{ margin-top: 24px; margin-bottom: 8px; }}
      table {{ width: 100%; border-collapse: collapse; font-size: 12px; }}
      th, td {{ border: 1px solid #e2e8f0; padding: 8px; }}
      th {{ background: #f8fafc; text-align: left; }}
    </style>
  </head>
  <body>
    <h1>Sachio Operations Dashboard</h1>
    <p>Generated on {}</p>

    <h2>Stats</h2>
    <table>
      <tr><th>Label</th><th>Value</th><th>Delta</th></tr>
      {}
    </table>

    <h2>Recent Orders</h2>
    <table>
      <tr><th>ID</th><th>Customer</th><th>Type</th><th>Total</th><th>Status</th><th>ETA</th></tr>
      {}
    </table>

    <h2>Recent Products</h2>
    <table>
      <tr><th>Title</th><th>Category</th><th>Price</th><th>In stock</th></tr>
      {}
    </table>
  </body>
</html>"#,
        view.last_updated.format("%Y-%m-%d %H:%M:%S UTC"),
        stat_rows,
        order_rows,
        product_rows,
    );

    Ok(Html(html))
}

/// Same snapshot as a single-page text PDF.
pub async fn export_dashboard_pdf(
    State(pool): State<Pool>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let view = build_dashboard_view(&pool, 7).await?;

    let mut lines = vec![
        "Sachio Operations Dashboard".to_owned(),
        format!("Generated on {}", view.last_updated.format("%Y-%m-%d %H:%M:%S UTC")),
        String::new(),
        "Stats".to_owned(),
    ];
    for stat in &view.stats {
        lines.push(format!("{}: {} {}", stat.label, stat.value, stat.delta).trim_end().to_owned());
    }
    lines.push(String::new());
    lines.push("Recent Orders".to_owned());
    for order in &view.orders {
        lines.push(format!(
            "{} | {} | {} | {} | {} | {}",
            order.id,
            order.customer,
            order.order_type,
            order.total,
            order.status.label(),
            order.eta
        ));
    }
    lines.push(String::new());
    lines.push("Recent Products".to_owned());
    for product in &view.products {
        lines.push(format!(
            "{} | {} | {} | {}",
            product.title,
            product.category,
            product.price,
            if product.in_stock { "In stock" } else { "Out of stock" }
        ));
    }

    let pdf = build_simple_pdf(&lines);

    Ok(([(header::CONTENT_TYPE, "application/pdf")], pdf))
}

pub async fn get_alerts(
    State(pool): State<Pool>,
) -> Result<Json<Vec<Alert>>, (StatusCode, String)> {
    use sachio_ops::schema::alerts;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = alerts::table
        .select(Alert::as_select())
        .load(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}

pub async fn create_alert(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Json(payload): Json<NewAlert>,
) -> Result<Json<Alert>, (StatusCode, String)> {
    use sachio_ops::schema::alerts;

    if let Some(tone) = payload.tone.as_deref() {
        if !matches!(tone, "red" | "amber" | "emerald") {
            return Err((StatusCode::BAD_REQUEST, "Wrong alert tone".to_owned()));
        }
    }

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::insert_into(alerts::table)
        .values(&payload)
        .returning(Alert::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}

pub async fn remove_alert(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Path(id): Path<i32>,
) -> Result<Json<Alert>, (StatusCode, String)> {
    use sachio_ops::schema::alerts;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::delete(alerts::table.find(id))
        .returning(Alert::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(|e| not_found_or_internal(e, "Alert not found."))?;

    Ok(Json(res))
}

fn trend_window(days: Option<i64>) -> i64 {
    match days {
        Some(14) => 14,
        Some(30) => 30,
        _ => 7,
    }
}

fn order_facts(order: &Order) -> OrderFacts {
    OrderFacts {
        order_type: order.order_type.clone(),
        // the dashboard has always read the price field for its amounts
        amount: order.price.unwrap_or(0.0),
        status: normalize_status(&order.status),
        created_at: Some(order.created_at),
    }
}

/// Aggregates the bounded slices and derives stand-ins where collections are
/// empty or unreachable. An unreachable store never changes the shape of the
/// response; it just empties the slices.
async fn build_dashboard_view(pool: &Pool, days: i64) -> Result<DashboardView, (StatusCode, String)> {
    use sachio_ops::schema::{alerts, categories, dashboard_stats, orders, products};

    let mut conn = pool.get().await.map_err(internal_error)?;

    let stat_rows: Vec<DashboardStat> = dashboard_stats::table
        .select(DashboardStat::as_select())
        .load(&mut conn)
        .await
        .unwrap_or_else(|er| {
            tracing::warn!("Dashboard stats fetch failed: {:?}", er);
            Vec::new()
        });

    let order_rows: Vec<Order> = orders::table
        .order(orders::created_at.desc())
        .limit(RECENT_ORDERS)
        .select(Order::as_select())
        .load(&mut conn)
        .await
        .unwrap_or_else(|er| {
            tracing::warn!("Dashboard orders fetch failed: {:?}", er);
            Vec::new()
        });

    let product_rows: Vec<Product> = products::table
        .order(products::created_at.desc())
        .limit(RECENT_PRODUCTS)
        .select(Product::as_select())
        .load(&mut conn)
        .await
        .unwrap_or_else(|er| {
            tracing::warn!("Dashboard products fetch failed: {:?}", er);
            Vec::new()
        });

    let category_rows: Vec<Category> = categories::table
        .order(categories::count.desc())
        .limit(TOP_CATEGORIES)
        .select(Category::as_select())
        .load(&mut conn)
        .await
        .unwrap_or_else(|er| {
            tracing::warn!("Dashboard categories fetch failed: {:?}", er);
            Vec::new()
        });

    let alert_rows: Vec<Alert> = alerts::table
        .select(Alert::as_select())
        .load(&mut conn)
        .await
        .unwrap_or_else(|er| {
            tracing::warn!("Dashboard alerts fetch failed: {:?}", er);
            Vec::new()
        });

    let now = Utc::now();
    let facts: Vec<OrderFacts> = order_rows.iter().map(order_facts).collect();
    let product_facts: Vec<ProductFacts> = product_rows
        .iter()
        .map(|p| ProductFacts { in_stock: p.in_stock })
        .collect();

    let stats: Vec<Stat> = if stat_rows.is_empty() {
        metrics::build_stats_from_orders(&facts, now)
    } else {
        stat_rows
            .into_iter()
            .map(|row| Stat {
                label: row.label,
                value: row.value,
                delta: row.delta,
                tone: row.tone,
            })
            .collect()
    };

    let alert_views: Vec<AlertView> = if alert_rows.is_empty() {
        metrics::build_alerts_from_data(&facts, &product_facts)
    } else {
        alert_rows
            .into_iter()
            .map(|row| AlertView {
                title: row.title,
                tone: row.tone,
            })
            .collect()
    };

    let lanes = metrics::compute_operational_health(&facts, &product_facts, alert_views.len());
    sync_operational_health(pool.clone(), lanes.clone());

    let orders_view = order_rows
        .into_iter()
        .map(|order| OrderRow {
            id: order.id,
            customer: order.customer_name,
            order_type: if order.order_type == "rent" { "Rent" } else { "Buy" }.to_owned(),
            total: format_naira(order.price.unwrap_or(0.0)),
            status: normalize_status(&order.status),
            eta: order.eta.unwrap_or_else(|| "-".to_owned()),
        })
        .collect();

    let products_view = product_rows
        .into_iter()
        .map(|product| ProductRow {
            id: product.id,
            title: product.title,
            price: format_naira(product.price),
            category: product.category,
            in_stock: product.in_stock,
        })
        .collect();

    let categories_view = category_rows
        .into_iter()
        .map(|category| CategoryRow {
            id: category.id,
            name: category.name,
            segment: category.segment,
            count: category.count,
            image_url: category.image_url,
        })
        .collect();

    Ok(DashboardView {
        stats,
        orders: orders_view,
        products: products_view,
        categories: categories_view,
        revenue_trend: metrics::build_revenue_trend(&facts, days, now),
        revenue_totals: metrics::build_revenue_totals(&facts, now),
        lanes,
        alerts: alert_views,
        last_updated: now,
    })
}

/// Best-effort write-back so other dashboard viewers can read the lanes.
/// Skipped when nothing changed; failures are logged and forgotten.
fn sync_operational_health(pool: Pool, lanes: Vec<Lane>) {
    use sachio_ops::schema::operations;

    tokio::spawn(async move {
        let mut conn = match pool.get().await {
            Ok(conn) => conn,
            Err(er) => {
                tracing::warn!("Operational health sync failed: {:?}", er);
                return;
            }
        };

        let existing: Vec<(String, i32)> = match operations::table
            .select((operations::label, operations::value))
            .load(&mut conn)
            .await
        {
            Ok(rows) => rows,
            Err(er) => {
                tracing::warn!("Operational health sync failed: {:?}", er);
                return;
            }
        };

        let unchanged = lanes.iter().all(|lane| {
            existing
                .iter()
                .any(|(label, value)| *label == lane.label && *value == lane.value)
        });
        if unchanged && !existing.is_empty() {
            return;
        }

        for lane in lanes {
            let slug = lane.label.to_lowercase().replace(' ', "_");
            let result = diesel::insert_into(operations::table)
                .values((
                    operations::id.eq(&slug),
                    operations::label.eq(&lane.label),
                    operations::value.eq(lane.value),
                    operations::updated_at.eq(Utc::now()),
                ))
                .on_conflict(operations::id)
                .do_update()
                .set((
                    operations::label.eq(&lane.label),
                    operations::value.eq(lane.value),
                    operations::updated_at.eq(Utc::now()),
                ))
                .execute(&mut conn)
                .await;

            if let Err(er) = result {
                tracing::warn!("Operational health sync failed: {:?}", er);
            }
        }
    });
}
