//! Partner management HTTP handlers

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use shared::{CreatePartnerTypeInput, PaginatedResponse, Partner, PartnerFilter, PartnerInput, PartnerType};

use crate::error::{AppError, AppResult};
use crate::services::PartnerService;
use crate::AppState;

/// List partners with optional type filter, name search and paging
pub async fn list_partners(
    State(state): State<AppState>,
    filter: Result<Query<PartnerFilter>, QueryRejection>,
) -> AppResult<Json<PaginatedResponse<Partner>>> {
    let Query(filter) = filter.map_err(|e| AppError::MalformedRequest(e.body_text()))?;
    let service = PartnerService::new(state.db.clone());
    let partners = service
        .list_partners(&filter, state.config.pagination.partners_per_page)
        .await?;
    Ok(Json(partners))
}

/// Get a single partner
pub async fn get_partner(
    State(state): State<AppState>,
    Path(partner_id): Path<i64>,
) -> AppResult<Json<Partner>> {
    let service = PartnerService::new(state.db.clone());
    let partner = service.get_partner(partner_id).await?;
    Ok(Json(partner))
}

/// Create a new partner
pub async fn create_partner(
    State(state): State<AppState>,
    Json(input): Json<PartnerInput>,
) -> AppResult<(StatusCode, Json<Partner>)> {
    let service = PartnerService::new(state.db.clone());
    let partner = service.create_partner(input).await?;
    Ok((StatusCode::CREATED, Json(partner)))
}

/// Update a partner
pub async fn update_partner(
    State(state): State<AppState>,
    Path(partner_id): Path<i64>,
    Json(input): Json<PartnerInput>,
) -> AppResult<Json<Partner>> {
    let service = PartnerService::new(state.db.clone());
    let partner = service.update_partner(partner_id, input).await?;
    Ok(Json(partner))
}

/// List partner types
pub async fn list_partner_types(State(state): State<AppState>) -> AppResult<Json<Vec<PartnerType>>> {
    let service = PartnerService::new(state.db.clone());
    let types = service.list_partner_types().await?;
    Ok(Json(types))
}

/// Create a partner type
pub async fn create_partner_type(
    State(state): State<AppState>,
    Json(input): Json<CreatePartnerTypeInput>,
) -> AppResult<(StatusCode, Json<PartnerType>)> {
    let service = PartnerService::new(state.db.clone());
    let partner_type = service.create_partner_type(input).await?;
    Ok((StatusCode::CREATED, Json(partner_type)))
}
