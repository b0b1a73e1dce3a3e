use super::models::{NewProduct, Product, UpdateProduct};
use crate::auth::models::AccessTokenClaims;
use crate::utils::error::not_found_or_internal;
use crate::utils::{internal_error, types::Pool};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

pub async fn get_products(
    State(pool): State<Pool>,
) -> Result<Json<Vec<Product>>, (StatusCode, String)> {
    use sachio_ops::schema::products;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = products::table
        .order(products::created_at.desc())
        .select(Product::as_select())
        .load(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}

pub async fn get_product_by_id(
    State(pool): State<Pool>,
    Path(id): Path<i32>,
) -> Result<Json<Product>, (StatusCode, String)> {
    use sachio_ops::schema::products;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = products::table
        .find(id)
        .select(Product::as_select())
        .get_result(&mut conn)
        .await
        .map_err(|e| not_found_or_internal(e, "Product not found."))?;

    Ok(Json(res))
}

pub async fn create_product(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Json(payload): Json<NewProduct>,
) -> Result<Json<Product>, (StatusCode, String)> {
    use sachio_ops::schema::products;

    if !payload.price.is_finite() || payload.price < 0.0 {
        return Err((StatusCode::BAD_REQUEST, "Enter a valid price".to_owned()));
    }

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::insert_into(products::table)
        .values(&payload)
        .returning(Product::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(internal_error)?;

    Ok(Json(res))
}

pub async fn update_product(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProduct>,
) -> Result<Json<Product>, (StatusCode, String)> {
    use sachio_ops::schema::products;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::update(products::table.find(id))
        .set(&payload)
        .returning(Product::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(|e| not_found_or_internal(e, "Product not found."))?;

    Ok(Json(res))
}

pub async fn remove_product(
    State(pool): State<Pool>,
    _claims: AccessTokenClaims,
    Path(id): Path<i32>,
) -> Result<Json<Product>, (StatusCode, String)> {
    use sachio_ops::schema::products;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::delete(products::table.find(id))
        .returning(Product::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(|e| not_found_or_internal(e, "Product not found."))?;

    Ok(Json(res))
}
