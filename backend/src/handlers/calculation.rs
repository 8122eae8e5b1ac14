//! HTTP handlers for the discount and material requirement calculators

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{to_legacy_value, MaterialRequest};

use crate::error::{AppError, AppResult};
use crate::services::CalculationService;
use crate::AppState;

/// Query parameters for material estimation; missing values default to 0
#[derive(Debug, Deserialize)]
pub struct MaterialQuery {
    #[serde(default, alias = "productTypeId")]
    pub product_type_id: i64,
    #[serde(default, alias = "materialTypeId")]
    pub material_type_id: i64,
    #[serde(default, alias = "productQuantity")]
    pub product_quantity: i64,
    #[serde(default)]
    pub param1: f64,
    #[serde(default)]
    pub param2: f64,
}

impl MaterialQuery {
    fn request(&self) -> MaterialRequest {
        MaterialRequest {
            product_quantity: self.product_quantity,
            param1: self.param1,
            param2: self.param2,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DiscountResponse {
    pub discount: u32,
}

/// Legacy response: `material_required` is -1 for any failed estimate
#[derive(Debug, Serialize)]
pub struct MaterialRequiredResponse {
    pub material_required: i64,
}

#[derive(Debug, Serialize)]
pub struct MaterialRequirementResponse {
    pub product_type_id: i64,
    pub material_type_id: i64,
    pub product_quantity: i64,
    pub material_required: u64,
}

/// Get the current discount for a partner
pub async fn get_partner_discount(
    State(state): State<AppState>,
    Path(partner_id): Path<i64>,
) -> AppResult<Json<DiscountResponse>> {
    let service = CalculationService::new(state.db.clone());
    let discount = service.partner_discount(partner_id).await?;
    Ok(Json(DiscountResponse { discount }))
}

/// Estimate material with the legacy contract: unparsable parameters are a
/// 400, every other failure is reported as `material_required: -1`
pub async fn calculate_material(
    State(state): State<AppState>,
    query: Result<Query<MaterialQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            tracing::warn!("Rejected material query: {}", rejection);
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "invalid parameters" })),
            )
                .into_response();
        }
    };

    let service = CalculationService::new(state.db.clone());
    match service
        .material_requirement(query.product_type_id, query.material_type_id, query.request())
        .await
    {
        Ok(result) => Json(MaterialRequiredResponse {
            material_required: to_legacy_value(&result),
        })
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Estimate material, reporting invalid input (400) and unknown product
/// or material types (404) as distinct errors
pub async fn get_material_requirement(
    State(state): State<AppState>,
    query: Result<Query<MaterialQuery>, QueryRejection>,
) -> AppResult<Json<MaterialRequirementResponse>> {
    let Query(query) = query.map_err(|e| AppError::MalformedRequest(e.body_text()))?;

    let service = CalculationService::new(state.db.clone());
    let material_required = service
        .material_requirement(query.product_type_id, query.material_type_id, query.request())
        .await??;

    Ok(Json(MaterialRequirementResponse {
        product_type_id: query.product_type_id,
        material_type_id: query.material_type_id,
        product_quantity: query.product_quantity,
        material_required,
    }))
}
