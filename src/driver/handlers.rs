use super::geo;
use super::models::{DriverLocation, DriverLocationView, LocationReportPayload};
use crate::utils::{internal_error, types::Pool};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

/// Fleet-map feed: every known position plus its staleness flag, recomputed
/// against now on each poll.
pub async fn get_driver_locations(
    State(pool): State<Pool>,
) -> Result<Json<Vec<DriverLocationView>>, (StatusCode, String)> {
    use sachio_ops::schema::driver_locations;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let rows = driver_locations::table
        .select(DriverLocation::as_select())
        .load(&mut conn)
        .await
        .map_err(internal_error)?;

    let now = Utc::now();
    let res = rows
        .into_iter()
        .map(|row| DriverLocationView {
            stale: geo::is_stale(row.updated_at, now),
            driver_id: row.driver_id,
            lat: row.lat,
            lng: row.lng,
            speed: row.speed,
            heading: row.heading,
            updated_at: row.updated_at,
        })
        .collect();

    Ok(Json(res))
}

/// Ingest endpoint for the driver mobile client. Upsert keyed by driver id,
/// last report wins.
pub async fn report_driver_location(
    State(pool): State<Pool>,
    Path(driver_id): Path<Uuid>,
    Json(payload): Json<LocationReportPayload>,
) -> Result<Json<DriverLocation>, (StatusCode, String)> {
    use sachio_ops::schema::driver_locations;

    if !payload.lat.is_finite() || !payload.lng.is_finite() {
        return Err((StatusCode::BAD_REQUEST, "Invalid coordinates".to_owned()));
    }

    let mut conn = pool.get().await.map_err(internal_error)?;

    let row = DriverLocation {
        driver_id,
        lat: payload.lat,
        lng: payload.lng,
        speed: payload.speed,
        heading: payload.heading,
        updated_at: Utc::now(),
    };

    let res = diesel::insert_into(driver_locations::table)
        .values(&row)
        .on_conflict(driver_locations::driver_id)
        .do_update()
        .set((
            driver_locations::lat.eq(row.lat),
            driver_locations::lng.eq(row.lng),
            driver_locations::speed.eq(row.speed),
            driver_locations::heading.eq(row.heading),
            driver_locations::updated_at.eq(row.updated_at),
        ))
        .returning(DriverLocation::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}
