use super::models::{Category, NewCategory, UpdateCategory};
use crate::auth::models::AccessTokenClaims;
use crate::utils::error::not_found_or_internal;
use crate::utils::{internal_error, types::Pool};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

pub async fn get_categories(
    State(pool): State<Pool>,
) -> Result<Json<Vec<Category>>, (StatusCode, String)> {
    use sachio_ops::schema::categories;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = categories::table
        .order(categories::count.desc())
        .select(Category::as_select())
        .load(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}

pub async fn get_category_by_id(
    State(pool): State<Pool>,
    Path(id): Path<i32>,
) -> Result<Json<Category>, (StatusCode, String)> {
    use sachio_ops::schema::categories;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = categories::table
        .find(id)
        .select(Category::as_select())
        .get_result(&mut conn)
        .await
        .map_err(|e| not_found_or_internal(e, "Category not found."))?;

    Ok(Json(res))
}

pub async fn create_category(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Json(payload): Json<NewCategory>,
) -> Result<Json<Category>, (StatusCode, String)> {
    use sachio_ops::schema::categories;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::insert_into(categories::table)
        .values(&payload)
        .returning(Category::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}

pub async fn update_category(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCategory>,
) -> Result<Json<Category>, (StatusCode, String)> {
    use sachio_ops::schema::categories;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::update(categories::table.find(id))
        .set(&payload)
        .returning(Category::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(|e| not_found_or_internal(e, "Category not found."))?;

    Ok(Json(res))
}

pub async fn remove_category(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Path(id): Path<i32>,
) -> Result<Json<Category>, (StatusCode, String)> {
    use sachio_ops::schema::categories;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::delete(categories::table.find(id))
        .returning(Category::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(|e| not_found_or_internal(e, "Category not found."))?;

    Ok(Json(res))
}
