use super::lifecycle::{
    self, STATUS_OPTIONS, can_edit_status, is_cancelled_order_signal, is_paid_order_signal,
};
use super::models::{
    AssignDriverPayload, NewOrder, Order, SetDestinationPayload, SetPricePayload, TrackingDestination,
    TrackingLocation, TrackingRoute, TrackingView, UpdateStatusPayload,
};
use crate::auth::models::AccessTokenClaims;
use crate::driver::geo::{self, LatLng};
use crate::driver::models::DriverLocation;
use crate::maps::client as maps;
use crate::notification::models::{OrderEvent, OrderEventPayload};
use crate::rmq;
use crate::user::models::User;
use crate::utils::error::not_found_or_internal;
use crate::utils::{internal_error, types::Pool};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

pub async fn get_orders(
    State(pool): State<Pool>,
) -> Result<Json<Vec<Order>>, (StatusCode, String)> {
    use sachio_ops::schema::orders;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = orders::table
        .order(orders::created_at.desc())
        .select(Order::as_select())
        .load(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}

pub async fn get_order_by_id(
    State(pool): State<Pool>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, (StatusCode, String)> {
    use sachio_ops::schema::orders;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = orders::table
        .find(id)
        .select(Order::as_select())
        .get_result(&mut conn)
        .await
        .map_err(|e| not_found_or_internal(e, "Order not found."))?;

    Ok(Json(res))
}

/// Intake from the customer-facing app. The dashboard itself never creates
/// orders, only mutates them.
pub async fn create_order(
    State(pool): State<Pool>,
    Json(payload): Json<NewOrder>,
) -> Result<Json<Order>, (StatusCode, String)> {
    use sachio_ops::schema::orders;

    if !matches!(payload.order_type.as_str(), "buy" | "rent") {
        return Err((StatusCode::BAD_REQUEST, "Wrong order_type".to_owned()));
    }

    let mut conn = pool.get().await.map_err(internal_error)?;

    let order_data = Order {
        id: Uuid::new_v4(),
        customer_name: payload.customer_name,
        customer_phone: payload.customer_phone,
        customer_address: payload.customer_address,
        order_type: payload.order_type,
        product_title: payload.product_title,
        amount: payload.amount,
        price: payload.price,
        status: payload.status.unwrap_or_else(|| "processing".to_owned()),
        payment_status: payload.payment_status,
        eta: payload.eta,
        driver_id: None,
        driver_name: None,
        driver_email: None,
        destination_lat: None,
        destination_lng: None,
        destination_address: None,
        destination_set_at: None,
        price_set_at: None,
        expires_at: None,
        created_at: Utc::now(),
    };

    let res: Order = diesel::insert_into(orders::table)
        .values(&order_data)
        .returning(Order::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(internal_error)?;

    notify_order_event(OrderEvent::New(event_payload(&res)));

    Ok(Json(res))
}

pub async fn remove_order(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, (StatusCode, String)> {
    use sachio_ops::schema::orders;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::delete(orders::table.find(id))
        .returning(Order::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(|e| not_found_or_internal(e, "Order not found."))?;

    Ok(Json(res))
}

/// Free-text status writes are gated for rentals: nothing is written until a
/// paid signal is present in either status field.
pub async fn update_order_status(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<Json<Order>, (StatusCode, String)> {
    use sachio_ops::schema::orders;

    if !STATUS_OPTIONS.contains(&payload.status.as_str()) {
        return Err((StatusCode::BAD_REQUEST, "Unknown order status".to_owned()));
    }

    let mut conn = pool.get().await.map_err(internal_error)?;

    let order = orders::table
        .find(id)
        .select(Order::as_select())
        .get_result(&mut conn)
        .await
        .map_err(|e| not_found_or_internal(e, "Order not found."))?;

    if !can_edit_status(&order.order_type, &order.status, order.payment_status.as_deref()) {
        return Err((
            StatusCode::CONFLICT,
            "Status can be edited once payment is confirmed.".to_owned(),
        ));
    }

    let was_paid = is_paid_order_signal(&order.status, order.payment_status.as_deref());
    let was_cancelled = is_cancelled_order_signal(&order.status);

    let updated = diesel::update(orders::table.find(id))
        .set(orders::status.eq(&payload.status))
        .returning(Order::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(internal_error)?;

    let now_paid = is_paid_order_signal(&updated.status, updated.payment_status.as_deref());
    if !was_paid && now_paid {
        notify_order_event(OrderEvent::Paid(event_payload(&updated)));
    }
    if !was_cancelled && is_cancelled_order_signal(&updated.status) {
        notify_order_event(OrderEvent::Cancelled(event_payload(&updated)));
    }

    Ok(Json(updated))
}

/// The set-price transition: amount, price, price_set status, awaiting
/// payment, and a 24 h expiry written in one update. The expiry is never
/// enforced anywhere.
pub async fn set_order_price(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetPricePayload>,
) -> Result<Json<Order>, (StatusCode, String)> {
    use sachio_ops::schema::orders;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let order = orders::table
        .find(id)
        .select(Order::as_select())
        .get_result(&mut conn)
        .await
        .map_err(|e| not_found_or_internal(e, "Order not found."))?;

    if is_paid_order_signal(&order.status, order.payment_status.as_deref()) {
        return Err((
            StatusCode::CONFLICT,
            "Price can no longer be set on a paid order.".to_owned(),
        ));
    }

    let change = lifecycle::price_set_change(payload.amount, Utc::now())
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let updated = diesel::update(orders::table.find(id))
        .set((
            orders::amount.eq(Some(change.amount)),
            orders::price.eq(Some(change.price)),
            orders::status.eq(change.status),
            orders::payment_status.eq(Some(change.payment_status)),
            orders::price_set_at.eq(Some(change.price_set_at)),
            orders::expires_at.eq(Some(change.expires_at)),
        ))
        .returning(Order::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(updated))
}

/// Denormalizes the driver onto the order, same as the source document did.
/// An empty payload unassigns.
pub async fn assign_driver(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignDriverPayload>,
) -> Result<Json<Order>, (StatusCode, String)> {
    use sachio_ops::schema::{orders, users};

    let mut conn = pool.get().await.map_err(internal_error)?;

    let updated = match payload.driver_id {
        Some(driver_id) => {
            let driver = users::table
                .find(driver_id)
                .filter(users::is_driver.eq(true))
                .select(User::as_select())
                .get_result(&mut conn)
                .await
                .map_err(|e| not_found_or_internal(e, "Driver not found."))?;

            let label = driver
                .name
                .clone()
                .unwrap_or_else(|| driver.email.clone());

            diesel::update(orders::table.find(id))
                .set((
                    orders::driver_id.eq(Some(driver.id)),
                    orders::driver_name.eq(Some(label)),
                    orders::driver_email.eq(Some(driver.email)),
                ))
                .returning(Order::as_returning())
                .get_result(&mut conn)
                .await
                .map_err(|e| not_found_or_internal(e, "Order not found."))?
        }
        None => diesel::update(orders::table.find(id))
            .set((
                orders::driver_id.eq(None::<Uuid>),
                orders::driver_name.eq(None::<String>),
                orders::driver_email.eq(None::<String>),
            ))
            .returning(Order::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| not_found_or_internal(e, "Order not found."))?,
    };

    Ok(Json(updated))
}

/// Destination comes in as coordinates (map click / marker drag) or as a
/// bare address to geocode. Last writer wins, no concurrency token.
pub async fn set_destination(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetDestinationPayload>,
) -> Result<Json<Order>, (StatusCode, String)> {
    use sachio_ops::schema::orders;

    let (lat, lng, address) = match (payload.lat, payload.lng) {
        (Some(lat), Some(lng)) => {
            let address = match payload.address.filter(|a| !a.trim().is_empty()) {
                Some(address) => address,
                None => match maps::reverse_geocode(LatLng { lat, lng }).await {
                    Ok(Some(address)) => address,
                    Ok(None) => "Pinned destination".to_owned(),
                    Err(er) => {
                        tracing::warn!("Reverse geocode failed: {:?}", er);
                        "Pinned destination".to_owned()
                    }
                },
            };
            (lat, lng, address)
        }
        _ => {
            let Some(address) = payload.address.filter(|a| !a.trim().is_empty()) else {
                return Err((
                    StatusCode::BAD_REQUEST,
                    "Destination address or coordinates required.".to_owned(),
                ));
            };
            match maps::geocode(&address).await {
                Ok(Some(place)) => (
                    place.location.lat,
                    place.location.lng,
                    place.formatted_address,
                ),
                Ok(None) => {
                    return Err((
                        StatusCode::BAD_REQUEST,
                        "Could not locate that address. Try dropping a pin on the map.".to_owned(),
                    ));
                }
                Err(er) => return Err((StatusCode::INTERNAL_SERVER_ERROR, er)),
            }
        }
    };

    let mut conn = pool.get().await.map_err(internal_error)?;

    let updated = diesel::update(orders::table.find(id))
        .set((
            orders::destination_lat.eq(Some(lat)),
            orders::destination_lng.eq(Some(lng)),
            orders::destination_address.eq(Some(address)),
            orders::destination_set_at.eq(Some(Utc::now())),
        ))
        .returning(Order::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(|e| not_found_or_internal(e, "Order not found."))?;

    Ok(Json(updated))
}

pub async fn reset_destination(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, (StatusCode, String)> {
    use sachio_ops::schema::orders;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let updated = diesel::update(orders::table.find(id))
        .set((
            orders::destination_lat.eq(None::<f64>),
            orders::destination_lng.eq(None::<f64>),
            orders::destination_address.eq(None::<String>),
        ))
        .returning(Order::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(|e| not_found_or_internal(e, "Order not found."))?;

    Ok(Json(updated))
}

/// One tick of the order tracking view. Position, staleness, route, and the
/// 200 m arrival/off-route flags are recomputed from scratch every call;
/// nothing is persisted.
pub async fn get_order_tracking(
    State(pool): State<Pool>,
    Path(id): Path<Uuid>,
) -> Result<Json<TrackingView>, (StatusCode, String)> {
    use sachio_ops::schema::{driver_locations, orders, users};

    let mut conn = pool.get().await.map_err(internal_error)?;

    let order = orders::table
        .find(id)
        .select(Order::as_select())
        .get_result(&mut conn)
        .await
        .map_err(|e| not_found_or_internal(e, "Order not found."))?;

    let destination = match (order.destination_lat, order.destination_lng) {
        (Some(lat), Some(lng)) => Some(TrackingDestination {
            lat,
            lng,
            address: order.destination_address.clone(),
        }),
        _ => None,
    };

    let Some(driver_id) = order.driver_id else {
        return Ok(Json(TrackingView {
            order_id: order.id,
            driver_id: None,
            driver_name: order.driver_name,
            driver_status: "Offline".to_owned(),
            location: None,
            destination,
            route: None,
            arrival_soon: false,
            off_route: false,
        }));
    };

    let location = driver_locations::table
        .find(driver_id)
        .select(DriverLocation::as_select())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(internal_error)?;

    let driver_active: bool = users::table
        .find(driver_id)
        .select(users::is_driver_active)
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(internal_error)?
        .unwrap_or(false);

    let now = Utc::now();
    let fresh = location
        .as_ref()
        .map(|row| !geo::is_stale(row.updated_at, now))
        .unwrap_or(false);
    let driver_status = if driver_active || fresh {
        "Active".to_owned()
    } else {
        "Offline".to_owned()
    };

    let mut route = None;
    let mut arrival_soon = false;
    let mut off_route = false;

    if let (Some(row), Some(dest)) = (&location, &destination) {
        let driver_point = LatLng { lat: row.lat, lng: row.lng };
        let dest_point = LatLng { lat: dest.lat, lng: dest.lng };

        arrival_soon = geo::arrival_soon(driver_point, dest_point);

        match maps::directions(driver_point, dest_point).await {
            Ok(Some(summary)) => {
                off_route = geo::off_route(driver_point, &summary.path);
                route = Some(TrackingRoute {
                    distance_text: summary.distance_text,
                    duration_text: summary.duration_text,
                });
            }
            Ok(None) => {}
            Err(er) => tracing::warn!("Directions lookup failed: {:?}", er),
        }
    }

    let location = location.map(|row| TrackingLocation {
        lat: row.lat,
        lng: row.lng,
        speed_kmh: row.speed.map(geo::speed_kmh),
        heading: row.heading,
        heading_label: row.heading.map(geo::heading_label),
        updated_at: row.updated_at,
    });

    Ok(Json(TrackingView {
        order_id: order.id,
        driver_id: Some(driver_id),
        driver_name: order.driver_name,
        driver_status,
        location,
        destination,
        route,
        arrival_soon,
        off_route,
    }))
}

fn event_payload(order: &Order) -> OrderEventPayload {
    OrderEventPayload {
        order_id: order.id,
        customer_name: order.customer_name.clone(),
        order_type: order.order_type.clone(),
        status: order.status.clone(),
        amount: order.amount.or(order.price),
        product_title: order.product_title.clone(),
    }
}

/// Fire-and-forget: publish failures are logged and dropped, never surfaced.
fn notify_order_event(event: OrderEvent) {
    tokio::spawn(async move {
        let payload = match serde_json::to_string(&event) {
            Ok(payload) => payload,
            Err(er) => {
                tracing::warn!("Order event serialization failed: {:?}", er);
                return;
            }
        };
        if let Err(er) = rmq::client::publish_event(rmq::client::ORDER_EVENTS_QUEUE, &payload).await
        {
            tracing::warn!("Order event publish failed: {:?}", er);
        }
    });
}
