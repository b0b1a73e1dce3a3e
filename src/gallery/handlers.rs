use super::models::{GalleryItem, NewGalleryItem};
use crate::auth::models::AccessTokenClaims;
use crate::utils::error::not_found_or_internal;
use crate::utils::{internal_error, types::Pool};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

pub async fn get_gallery(
    State(pool): State<Pool>,
) -> Result<Json<Vec<GalleryItem>>, (StatusCode, String)> {
    use sachio_ops::schema::gallery;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = gallery::table
        .order(gallery::created_at.desc())
        .select(GalleryItem::as_select())
        .load(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}

pub async fn create_gallery_item(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Json(payload): Json<NewGalleryItem>,
) -> Result<Json<GalleryItem>, (StatusCode, String)> {
    use sachio_ops::schema::gallery;

    if payload.image_url.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Image url is required.".to_owned()));
    }

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::insert_into(gallery::table)
        .values(&payload)
        .returning(GalleryItem::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}

pub async fn remove_gallery_item(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Path(id): Path<i32>,
) -> Result<Json<GalleryItem>, (StatusCode, String)> {
    use sachio_ops::schema::gallery;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::delete(gallery::table.find(id))
        .returning(GalleryItem::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(|e| not_found_or_internal(e, "Gallery item not found."))?;

    Ok(Json(res))
}
