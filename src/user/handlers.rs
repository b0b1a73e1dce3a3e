use super::models::{
    UpdateBlockedPayload, UpdateDriverActivePayload, UpdateDriverPayload, User,
};
use crate::auth::models::AccessTokenClaims;
use crate::utils::error::not_found_or_internal;
use crate::utils::{internal_error, types::Pool};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

pub async fn get_all_users(
    State(pool): State<Pool>,
) -> Result<Json<Vec<User>>, (StatusCode, String)> {
    use sachio_ops::schema::users;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = users::table
        .select(User::as_select())
        .load(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}

pub async fn get_drivers(
    State(pool): State<Pool>,
) -> Result<Json<Vec<User>>, (StatusCode, String)> {
    use sachio_ops::schema::users;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = users::table
        .filter(users::is_driver.eq(true))
        .select(User::as_select())
        .load(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}

pub async fn update_user_blocked(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBlockedPayload>,
) -> Result<Json<User>, (StatusCode, String)> {
    use sachio_ops::schema::users;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::update(users::table.find(id))
        .set(users::blocked.eq(payload.blocked))
        .returning(User::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(|e| not_found_or_internal(e, "User not found."))?;

    Ok(Json(res))
}

pub async fn update_user_driver(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDriverPayload>,
) -> Result<Json<User>, (StatusCode, String)> {
    use sachio_ops::schema::users;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::update(users::table.find(id))
        .set(users::is_driver.eq(payload.is_driver))
        .returning(User::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(|e| not_found_or_internal(e, "User not found."))?;

    Ok(Json(res))
}

/// Activation only makes sense for users already flagged as drivers.
pub async fn update_user_driver_active(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDriverActivePayload>,
) -> Result<Json<User>, (StatusCode, String)> {
    use sachio_ops::schema::users;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let user = users::table
        .find(id)
        .select(User::as_select())
        .get_result(&mut conn)
        .await
        .map_err(|e| not_found_or_internal(e, "User not found."))?;

    if !user.is_driver {
        return Err((StatusCode::CONFLICT, "User is not a driver.".to_owned()));
    }

    let res = diesel::update(users::table.find(id))
        .set(users::is_driver_active.eq(payload.is_driver_active))
        .returning(User::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}
