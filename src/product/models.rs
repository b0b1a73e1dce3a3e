use chrono::{DateTime, Utc};
use diesel::prelude::*;
use sachio_ops::schema::products;
use serde::{Deserialize, Serialize};

#[derive(Queryable, Selectable, Identifiable, Debug, Serialize)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Product {
    pub id: i32,
    pub title: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
    pub rating_avg: f64,
    pub rating_count: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Deserialize)]
#[diesel(table_name = products)]
pub struct NewProduct {
    pub title: String,
    pub price: f64,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
    pub image_url: Option<String>,
}

#[derive(Deserialize, AsChangeset)]
#[diesel(table_name = products)]
pub struct UpdateProduct {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
    pub rating_avg: Option<f64>,
    pub rating_count: Option<i32>,
    pub image_url: Option<String>,
}
