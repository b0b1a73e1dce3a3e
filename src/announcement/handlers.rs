use super::models::{Announcement, NewAnnouncement};
use crate::auth::models::AccessTokenClaims;
use crate::utils::error::not_found_or_internal;
use crate::utils::{internal_error, types::Pool};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

pub async fn get_announcements(
    State(pool): State<Pool>,
) -> Result<Json<Vec<Announcement>>, (StatusCode, String)> {
    use sachio_ops::schema::announcements;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = announcements::table
        .order(announcements::created_at.desc())
        .select(Announcement::as_select())
        .load(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}

pub async fn create_announcement(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Json(payload): Json<NewAnnouncement>,
) -> Result<Json<Announcement>, (StatusCode, String)> {
    use sachio_ops::schema::announcements;

    let audience = payload.audience.as_deref().unwrap_or("all");
    if !matches!(audience, "all" | "user") {
        return Err((StatusCode::BAD_REQUEST, "Wrong audience".to_owned()));
    }
    if audience == "user" && payload.target_user_id.is_none() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Target user is required for a user announcement.".to_owned(),
        ));
    }

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::insert_into(announcements::table)
        .values(&payload)
        .returning(Announcement::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}

pub async fn remove_announcement(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Path(id): Path<i32>,
) -> Result<Json<Announcement>, (StatusCode, String)> {
    use sachio_ops::schema::announcements;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::delete(announcements::table.find(id))
        .returning(Announcement::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(|e| not_found_or_internal(e, "Announcement not found."))?;

    Ok(Json(res))
}
