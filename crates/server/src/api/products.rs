//! 商品 API 路由。

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, put},
};
use mercado_api_types::{
    CreateProductRequest, MessageResponse, ProductResponse, UpdateProductRequest,
};
use mercado_core::domain::{
    DomainError, NewProduct, ProductChanges, ProductId, ProductRecord, UserId, required,
    required_text,
};
use tracing::info;

use super::error::ApiError;
use super::state::AppState;

const NOT_FOUND: &str = "Producto no encontrado";

/// 创建商品 API 路由。
pub fn create_product_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/productos", get(list_products).post(create_product))
        .route("/productos/{id}", put(update_product).delete(delete_product))
}

fn new_product(request: CreateProductRequest) -> Result<NewProduct, DomainError> {
    Ok(NewProduct {
        nombre: required_text("nombre", request.nombre)?,
        descripcion: required_text("descripcion", request.descripcion)?,
        precio: required("precio", request.precio)?,
        foto_url: required_text("foto_url", request.foto_url)?,
        usuario_id: required_text("usuario_id", request.usuario_id)?.into(),
    })
}

fn product_changes(request: UpdateProductRequest) -> Result<ProductChanges, DomainError> {
    Ok(ProductChanges {
        nombre: required_text("nombre", request.nombre)?,
        descripcion: required_text("descripcion", request.descripcion)?,
        precio: required("precio", request.precio)?,
        foto_url: required_text("foto_url", request.foto_url)?,
    })
}

fn product_response(record: ProductRecord) -> ProductResponse {
    let ProductRecord { id, product } = record;
    ProductResponse {
        id: id.into_inner(),
        nombre: product.nombre,
        descripcion: product.descripcion,
        precio: product.precio,
        foto_url: product.foto_url,
        fecha_publicacion: product.fecha_publicacion.map(|fecha| fecha.to_string()),
        usuario_id: product.usuario_id.map(UserId::into_inner),
    }
}

/// 列出全部商品。
async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state
        .products
        .list()
        .await
        .map_err(ApiError::store("Error obteniendo productos"))?
        .ok_or_else(|| ApiError::not_found("No hay productos disponibles"))?;

    Ok(Json(products.into_iter().map(product_response).collect()))
}

/// 发布新商品，发布时间由服务端设置。
async fn create_product(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let Json(request) = payload?;
    let new_product = new_product(request)?;
    let owner = new_product.usuario_id.clone();

    let record = state
        .products
        .create(new_product)
        .await
        .map_err(ApiError::store("Error creando producto"))?;

    info!(id = %record.id, usuario_id = %owner, "product created");
    Ok((StatusCode::CREATED, Json(product_response(record))))
}

/// 修改商品的可变字段。
async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<ProductResponse>, ApiError> {
    let Json(request) = payload?;
    let changes = product_changes(request)?;

    let record = state
        .products
        .update(&ProductId::from(id), changes)
        .await
        .map_err(ApiError::store("Error actualizando producto"))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    Ok(Json(product_response(record)))
}

/// 删除商品。
async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = ProductId::from(id);
    let deleted = state
        .products
        .delete(&id)
        .await
        .map_err(ApiError::store("Error eliminando producto"))?;

    if !deleted {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    info!(%id, "product deleted");
    Ok(Json(MessageResponse::new("Producto eliminado correctamente")))
}
