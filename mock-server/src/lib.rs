use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// A stored product, serialized with the wire field names the Productos
/// AMMA API exposes. `precio` is nullable: clients send `null` for
/// prices that did not parse.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nombreAMMA")]
    pub name: String,
    #[serde(rename = "descripcionAMMA")]
    pub description: String,
    #[serde(rename = "precio")]
    pub price: Option<f64>,
}

#[derive(Deserialize)]
pub struct ProductInput {
    #[serde(rename = "nombreAMMA")]
    pub name: String,
    #[serde(rename = "descripcionAMMA")]
    pub description: String,
    #[serde(rename = "precio", default)]
    pub price: Option<f64>,
}

/// Products live in a `Vec` so the list endpoint returns them in
/// insertion order; clients display the list exactly as returned.
pub type Db = Arc<RwLock<Vec<Product>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/productosAMMA", get(list_products).post(create_product))
        .route("/productosAMMA/{id}", put(update_product).delete(delete_product))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_products(State(db): State<Db>) -> Json<Vec<Product>> {
    let products = db.read().await;
    tracing::debug!(count = products.len(), "list products");
    Json(products.clone())
}

async fn create_product(
    State(db): State<Db>,
    Json(input): Json<ProductInput>,
) -> (StatusCode, Json<Product>) {
    let product = Product {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        description: input.description,
        price: input.price,
    };
    tracing::debug!(id = %product.id, "create product");
    db.write().await.push(product.clone());
    (StatusCode::CREATED, Json(product))
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>, StatusCode> {
    let mut products = db.write().await;
    let product = products
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    product.name = input.name;
    product.description = input.description;
    product.price = input.price;
    tracing::debug!(%id, "update product");
    Ok(Json(product.clone()))
}

async fn delete_product(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut products = db.write().await;
    let index = products
        .iter()
        .position(|p| p.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    products.remove(index);
    tracing::debug!(%id, "delete product");
    Ok(StatusCode::NO_CONTENT)
}
