use super::models::{
    AccessTokenClaims, LoginPayload, LoginResponse, issue_access_token, parse_superadmin_accounts,
};
use crate::staff::models::StaffAccount;
use crate::utils::{internal_error, types::Pool};
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use bcrypt::verify;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use std::env;

pub async fn login_staff(
    State(pool): State<Pool>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<LoginResponse>, (StatusCode, String)> {
    use sachio_ops::schema::staff_accounts;

    let email = payload.email.trim().to_lowercase();
    if email.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Email is required.".to_owned()));
    }
    if payload.password.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Password is required.".to_owned()));
    }

    // Superadmin path: accounts configured in the environment.
    let superadmins = parse_superadmin_accounts(&env::var("SUPERADMIN_ACCOUNTS").unwrap_or_default());
    if let Some(account) = superadmins.iter().find(|account| account.email == email) {
        if !verify(&payload.password, &account.password_hash).unwrap_or(false) {
            return Err((
                StatusCode::UNAUTHORIZED,
                "Invalid email or password.".to_owned(),
            ));
        }

        let token = issue_access_token(&email, "superadmin")?;
        return Ok(Json(LoginResponse {
            token,
            email,
            role: "superadmin".to_owned(),
        }));
    }

    // Staff path: directory lookup plus password verification.
    let mut conn = pool.get().await.map_err(internal_error)?;

    let account = staff_accounts::table
        .filter(staff_accounts::email.eq(&email))
        .select(StaffAccount::as_select())
        .first(&mut conn)
        .await
        .optional()
        .map_err(internal_error)?;

    let Some(account) = account else {
        return Err((
            StatusCode::UNAUTHORIZED,
            "You are not authorized as staff.".to_owned(),
        ));
    };

    if account.blocked {
        return Err((
            StatusCode::FORBIDDEN,
            "This staff account is blocked. Contact your administrator.".to_owned(),
        ));
    }

    if !verify(&payload.password, &account.password_hash).unwrap_or(false) {
        return Err((
            StatusCode::UNAUTHORIZED,
            "Invalid email or password.".to_owned(),
        ));
    }

    let token = issue_access_token(&email, "staff")?;

    // Heartbeat row is best-effort; login must not fail on it.
    if let Err(er) = touch_staff_session(&pool, &email, "staff", "online").await {
        tracing::warn!("Could not record staff session: {:?}", er);
    }

    Ok(Json(LoginResponse {
        token,
        email,
        role: "staff".to_owned(),
    }))
}

pub async fn logout(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
) -> Result<StatusCode, (StatusCode, String)> {
    if claims.role == "staff" {
        if let Err(er) = touch_staff_session(&pool, &claims.sub, &claims.role, "offline").await {
            tracing::warn!("Staff session update failed: {:?}", er);
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn heartbeat(
    State(pool): State<Pool>,
    claims: AccessTokenClaims,
) -> Result<StatusCode, (StatusCode, String)> {
    if claims.role == "staff" {
        touch_staff_session(&pool, &claims.sub, &claims.role, "online")
            .await
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e))?;
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn touch_staff_session(
    pool: &Pool,
    email: &str,
    role: &str,
    status: &str,
) -> Result<(), String> {
    use sachio_ops::schema::staff_sessions;

    let mut conn = pool.get().await.map_err(|e| e.to_string())?;

    diesel::insert_into(staff_sessions::table)
        .values((
            staff_sessions::email.eq(email),
            staff_sessions::role.eq(role),
            staff_sessions::status.eq(status),
            staff_sessions::last_active.eq(Utc::now()),
        ))
        .on_conflict(staff_sessions::email)
        .do_update()
        .set((
            staff_sessions::role.eq(role),
            staff_sessions::status.eq(status),
            staff_sessions::last_active.eq(Utc::now()),
        ))
        .execute(&mut conn)
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
