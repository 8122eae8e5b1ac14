//! Route definitions for the Partner Management Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/partners", partner_routes())
        .route(
            "/partner-types",
            get(handlers::list_partner_types).post(handlers::create_partner_type),
        )
        .route("/sales", post(handlers::record_sale))
        .nest("/catalog", catalog_routes())
        // Material estimation: legacy sentinel contract and strict contract
        .route("/calculate-material", get(handlers::calculate_material))
        .route("/materials/requirement", get(handlers::get_material_requirement))
}

/// Partner routes
fn partner_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_partners).post(handlers::create_partner))
        .route(
            "/:partner_id",
            get(handlers::get_partner).put(handlers::update_partner),
        )
        .route("/:partner_id/sales-history", get(handlers::get_sales_history))
        .route("/:partner_id/discount", get(handlers::get_partner_discount))
}

/// Catalog routes
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/product-types",
            get(handlers::list_product_types).post(handlers::create_product_type),
        )
        .route("/product-types/:product_type_id", get(handlers::get_product_type))
        .route(
            "/material-types",
            get(handlers::list_material_types).post(handlers::create_material_type),
        )
        .route("/material-types/:material_type_id", get(handlers::get_material_type))
        .route(
            "/materials",
            get(handlers::list_materials).post(handlers::create_material),
        )
        .route(
            "/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/recipes",
            get(handlers::list_recipes).post(handlers::create_recipe),
        )
}
