//! Material requirement estimation for production runs

use thiserror::Error;

use crate::models::{MaterialType, ProductType};

/// Value returned by the legacy material endpoint for any failed estimate
pub const LEGACY_FAILURE_SENTINEL: i64 = -1;

/// Why a material estimate could not be produced
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
    /// A quantity or process parameter was zero, negative or not a number
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// The referenced product type or material type does not exist
    #[error("{0} not found")]
    NotFound(&'static str),
}

/// A production run to estimate material for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialRequest {
    pub product_quantity: i64,
    pub param1: f64,
    pub param2: f64,
}

impl MaterialRequest {
    pub fn estimate(&self, coefficient: f64, defect_percentage: f64) -> Result<u64, EstimateError> {
        estimate_material(
            coefficient,
            defect_percentage,
            self.product_quantity,
            self.param1,
            self.param2,
        )
    }
}

/// Estimate how many units of material a production run needs.
///
/// `per_unit = param1 * param2 * coefficient`, scaled by the product
/// quantity and inflated by the material's defect percentage. Any
/// fractional remainder is rounded up to a whole unit.
pub fn estimate_material(
    coefficient: f64,
    defect_percentage: f64,
    product_quantity: i64,
    param1: f64,
    param2: f64,
) -> Result<u64, EstimateError> {
    if product_quantity <= 0 {
        return Err(EstimateError::InvalidInput("product_quantity"));
    }
    if !(param1.is_finite() && param1 > 0.0) {
        return Err(EstimateError::InvalidInput("param1"));
    }
    if !(param2.is_finite() && param2 > 0.0) {
        return Err(EstimateError::InvalidInput("param2"));
    }

    let per_unit = param1 * param2 * coefficient;
    let total = per_unit * product_quantity as f64;
    let with_defect = total * (1.0 + defect_percentage / 100.0);

    if !with_defect.is_finite() || with_defect < 0.0 || with_defect >= u64::MAX as f64 {
        return Err(EstimateError::InvalidInput("material_required"));
    }

    let whole = with_defect.trunc();
    let required = if with_defect > whole {
        whole as u64 + 1
    } else {
        whole as u64
    };

    Ok(required)
}

/// Estimate against looked-up catalog types. A missing type is reported
/// as `NotFound` before the request itself is validated.
pub fn resolve_estimate(
    product_type: Option<&ProductType>,
    material_type: Option<&MaterialType>,
    request: MaterialRequest,
) -> Result<u64, EstimateError> {
    let product_type = product_type.ok_or(EstimateError::NotFound("Product type"))?;
    let material_type = material_type.ok_or(EstimateError::NotFound("Material type"))?;
    request.estimate(product_type.coefficient, material_type.defect_percentage)
}

/// Collapse an estimate into the single integer the legacy endpoint
/// reports, where every failure becomes [`LEGACY_FAILURE_SENTINEL`].
pub fn to_legacy_value(result: &Result<u64, EstimateError>) -> i64 {
    match result {
        Ok(required) => i64::try_from(*required).unwrap_or(LEGACY_FAILURE_SENTINEL),
        Err(_) => LEGACY_FAILURE_SENTINEL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_requirement() {
        assert_eq!(estimate_material(2.0, 0.0, 10, 1.0, 1.0), Ok(20));
    }

    #[test]
    fn test_defect_inflates_requirement() {
        assert_eq!(estimate_material(2.0, 10.0, 10, 1.0, 1.0), Ok(22));
    }

    #[test]
    fn test_fraction_rounds_up() {
        // 3.0 * 3 * 1.05 = 9.45
        assert_eq!(estimate_material(1.5, 5.0, 3, 2.0, 1.0), Ok(10));
    }

    #[test]
    fn test_non_positive_inputs_rejected() {
        assert_eq!(
            estimate_material(1.0, 0.0, 0, 1.0, 1.0),
            Err(EstimateError::InvalidInput("product_quantity"))
        );
        assert_eq!(
            estimate_material(1.0, 0.0, -5, 1.0, 1.0),
            Err(EstimateError::InvalidInput("product_quantity"))
        );
        assert_eq!(
            estimate_material(1.0, 0.0, 1, 0.0, 1.0),
            Err(EstimateError::InvalidInput("param1"))
        );
        assert_eq!(
            estimate_material(1.0, 0.0, 1, 1.0, -0.5),
            Err(EstimateError::InvalidInput("param2"))
        );
    }

    #[test]
    fn test_nan_parameters_rejected() {
        assert!(estimate_material(1.0, 0.0, 1, f64::NAN, 1.0).is_err());
        assert!(estimate_material(1.0, 0.0, 1, 1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_result_at_u64_limit_rejected() {
        // 2^64 is exactly representable and one past u64::MAX
        assert_eq!(
            estimate_material(1.0, 0.0, 1, 18_446_744_073_709_551_616.0, 1.0),
            Err(EstimateError::InvalidInput("material_required"))
        );
    }

    fn product_type() -> ProductType {
        ProductType {
            id: 1,
            name: "Laminate".to_string(),
            coefficient: 2.0,
        }
    }

    fn material_type() -> MaterialType {
        MaterialType {
            id: 1,
            name: "Film".to_string(),
            defect_percentage: 10.0,
        }
    }

    #[test]
    fn test_missing_type_wins_over_invalid_request() {
        let invalid = MaterialRequest {
            product_quantity: 0,
            param1: -1.0,
            param2: 1.0,
        };
        assert_eq!(
            resolve_estimate(None, Some(&material_type()), invalid),
            Err(EstimateError::NotFound("Product type"))
        );
        assert_eq!(
            resolve_estimate(Some(&product_type()), None, invalid),
            Err(EstimateError::NotFound("Material type"))
        );
        assert_eq!(
            resolve_estimate(Some(&product_type()), Some(&material_type()), invalid),
            Err(EstimateError::InvalidInput("product_quantity"))
        );
    }

    #[test]
    fn test_resolve_estimate_uses_type_values() {
        let request = MaterialRequest {
            product_quantity: 10,
            param1: 1.0,
            param2: 1.0,
        };
        assert_eq!(
            resolve_estimate(Some(&product_type()), Some(&material_type()), request),
            Ok(22)
        );
    }

    #[test]
    fn test_request_estimate() {
        let request = MaterialRequest {
            product_quantity: 3,
            param1: 2.0,
            param2: 1.0,
        };
        assert_eq!(request.estimate(1.5, 5.0), Ok(10));
    }

    #[test]
    fn test_legacy_value() {
        assert_eq!(to_legacy_value(&Ok(42)), 42);
        assert_eq!(
            to_legacy_value(&Err(EstimateError::InvalidInput("param1"))),
            LEGACY_FAILURE_SENTINEL
        );
        assert_eq!(
            to_legacy_value(&Err(EstimateError::NotFound("Product type"))),
            LEGACY_FAILURE_SENTINEL
        );
    }
}
