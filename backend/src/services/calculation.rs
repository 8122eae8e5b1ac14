//! Discount and material requirement calculations backed by stored data
//!
//! The arithmetic lives in `shared::calc`; this service only resolves the
//! stored inputs (sales totals, type coefficients and defect rates).

use shared::{calculate_discount, resolve_estimate, EstimateError, MaterialRequest};
use sqlx::PgPool;

use crate::error::AppResult;
use crate::services::{CatalogService, PartnerService};

#[derive(Clone)]
pub struct CalculationService {
    db: PgPool,
}

impl CalculationService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Current discount percentage for a partner
    pub async fn partner_discount(&self, partner_id: i64) -> AppResult<u32> {
        let partners = PartnerService::new(self.db.clone());
        partners.get_partner(partner_id).await?;

        let total = partners.total_sales(partner_id).await?;
        let discount = calculate_discount(total.max(0) as u64);

        tracing::debug!(partner_id, total, discount, "Calculated partner discount");
        Ok(discount)
    }

    /// Estimate material for a production run.
    ///
    /// The outer error is a storage failure; the inner result carries the
    /// estimate or why it could not be made. Missing types are reported
    /// before the request itself is validated.
    pub async fn material_requirement(
        &self,
        product_type_id: i64,
        material_type_id: i64,
        request: MaterialRequest,
    ) -> AppResult<Result<u64, EstimateError>> {
        let catalog = CatalogService::new(self.db.clone());
        let product_type = catalog.find_product_type(product_type_id).await?;
        let material_type = catalog.find_material_type(material_type_id).await?;

        let result = resolve_estimate(product_type.as_ref(), material_type.as_ref(), request);

        tracing::debug!(
            product_type_id,
            material_type_id,
            product_quantity = request.product_quantity,
            ?result,
            "Estimated material requirement"
        );
        Ok(result)
    }
}
