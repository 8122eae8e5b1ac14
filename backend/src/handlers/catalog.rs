//! Catalog HTTP handlers: product types, material types, materials,
//! products and recipes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::{
    CreateMaterialInput, CreateMaterialTypeInput, CreateProductInput, CreateProductTypeInput,
    CreateRecipeInput, MaterialType, Product, ProductType, Recipe,
};

use crate::error::AppResult;
use crate::services::catalog::{CatalogService, MaterialView};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RecipeQuery {
    pub product_id: Option<i64>,
}

pub async fn list_product_types(State(state): State<AppState>) -> AppResult<Json<Vec<ProductType>>> {
    let service = CatalogService::new(state.db.clone());
    Ok(Json(service.list_product_types().await?))
}

pub async fn get_product_type(
    State(state): State<AppState>,
    Path(product_type_id): Path<i64>,
) -> AppResult<Json<ProductType>> {
    let service = CatalogService::new(state.db.clone());
    Ok(Json(service.get_product_type(product_type_id).await?))
}

pub async fn create_product_type(
    State(state): State<AppState>,
    Json(input): Json<CreateProductTypeInput>,
) -> AppResult<(StatusCode, Json<ProductType>)> {
    let service = CatalogService::new(state.db.clone());
    let product_type = service.create_product_type(input).await?;
    Ok((StatusCode::CREATED, Json(product_type)))
}

pub async fn list_material_types(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MaterialType>>> {
    let service = CatalogService::new(state.db.clone());
    Ok(Json(service.list_material_types().await?))
}

pub async fn get_material_type(
    State(state): State<AppState>,
    Path(material_type_id): Path<i64>,
) -> AppResult<Json<MaterialType>> {
    let service = CatalogService::new(state.db.clone());
    Ok(Json(service.get_material_type(material_type_id).await?))
}

pub async fn create_material_type(
    State(state): State<AppState>,
    Json(input): Json<CreateMaterialTypeInput>,
) -> AppResult<(StatusCode, Json<MaterialType>)> {
    let service = CatalogService::new(state.db.clone());
    let material_type = service.create_material_type(input).await?;
    Ok((StatusCode::CREATED, Json(material_type)))
}

/// List materials with their below-minimum-stock flag
pub async fn list_materials(State(state): State<AppState>) -> AppResult<Json<Vec<MaterialView>>> {
    let service = CatalogService::new(state.db.clone());
    Ok(Json(service.list_materials().await?))
}

pub async fn create_material(
    State(state): State<AppState>,
    Json(input): Json<CreateMaterialInput>,
) -> AppResult<(StatusCode, Json<MaterialView>)> {
    let service = CatalogService::new(state.db.clone());
    let material = service.create_material(input).await?;
    Ok((StatusCode::CREATED, Json(material)))
}

pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let service = CatalogService::new(state.db.clone());
    Ok(Json(service.list_products().await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let service = CatalogService::new(state.db.clone());
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// List recipes, optionally for a single product
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(query): Query<RecipeQuery>,
) -> AppResult<Json<Vec<Recipe>>> {
    let service = CatalogService::new(state.db.clone());
    Ok(Json(service.list_recipes(query.product_id).await?))
}

pub async fn create_recipe(
    State(state): State<AppState>,
    Json(input): Json<CreateRecipeInput>,
) -> AppResult<(StatusCode, Json<Recipe>)> {
    let service = CatalogService::new(state.db.clone());
    let recipe = service.create_recipe(input).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}
