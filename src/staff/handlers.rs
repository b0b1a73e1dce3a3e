use super::models::{
    NewStaffPayload, SafeStaffAccount, StaffAccount, StaffSession, UpdateStaffBlockedPayload,
};
use crate::auth::models::AccessTokenClaims;
use crate::utils::error::not_found_or_internal;
use crate::utils::{internal_error, types::Pool};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use bcrypt::{DEFAULT_COST, hash};
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

pub async fn get_staff(
    State(pool): State<Pool>,
) -> Result<Json<Vec<SafeStaffAccount>>, (StatusCode, String)> {
    use sachio_ops::schema::staff_accounts;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = staff_accounts::table
        .order(staff_accounts::created_at.desc())
        .select(SafeStaffAccount::as_select())
        .load(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}

pub async fn create_staff(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Json(payload): Json<NewStaffPayload>,
) -> Result<Json<SafeStaffAccount>, (StatusCode, String)> {
    use sachio_ops::schema::staff_accounts;

    let email = payload.email.trim().to_lowercase();
    if email.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Email is required.".to_owned()));
    }
    if payload.password.len() < 8 {
        return Err((
            StatusCode::BAD_REQUEST,
            "Password must be at least 8 characters.".to_owned(),
        ));
    }

    let mut conn = pool.get().await.map_err(internal_error)?;

    let hashed_pass = create_password_hash(payload.password).await?;

    let account = StaffAccount {
        id: Uuid::new_v4(),
        email,
        name: payload.name,
        password_hash: hashed_pass,
        blocked: false,
        created_at: Utc::now(),
    };

    let res = diesel::insert_into(staff_accounts::table)
        .values(&account)
        .returning(SafeStaffAccount::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}

pub async fn update_staff_blocked(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStaffBlockedPayload>,
) -> Result<Json<SafeStaffAccount>, (StatusCode, String)> {
    use sachio_ops::schema::staff_accounts;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::update(staff_accounts::table.find(id))
        .set(staff_accounts::blocked.eq(payload.blocked))
        .returning(SafeStaffAccount::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(|e| not_found_or_internal(e, "Staff account not found."))?;

    Ok(Json(res))
}

pub async fn remove_staff(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Path(id): Path<Uuid>,
) -> Result<Json<SafeStaffAccount>, (StatusCode, String)> {
    use sachio_ops::schema::staff_accounts;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::delete(staff_accounts::table.find(id))
        .returning(SafeStaffAccount::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(|e| not_found_or_internal(e, "Staff account not found."))?;

    Ok(Json(res))
}

pub async fn get_staff_sessions(
    State(pool): State<Pool>,
) -> Result<Json<Vec<StaffSession>>, (StatusCode, String)> {
    use sachio_ops::schema::staff_sessions;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = staff_sessions::table
        .order(staff_sessions::last_active.desc())
        .select(StaffSession::as_select())
        .load(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}

async fn create_password_hash(password: String) -> Result<String, (StatusCode, String)> {
    let hashed_password = tokio::task::spawn_blocking(move || hash(password, DEFAULT_COST))
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Hashing task failed: {}", e),
            )
        })?
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Hashing error: {}", e),
            )
        })?;

    Ok(hashed_password)
}
