//! Material requirement estimation tests
//!
//! Tests for the estimator including:
//! - Worked examples with and without defect allowance
//! - Rejection of non-positive inputs
//! - Rounding up of fractional requirements
//! - Legacy sentinel mapping

use proptest::prelude::*;
use shared::{
    estimate_material, resolve_estimate, to_legacy_value, EstimateError, MaterialRequest,
    MaterialType, ProductType, LEGACY_FAILURE_SENTINEL,
};

fn parquet() -> ProductType {
    ProductType {
        id: 1,
        name: "Parquet board".to_string(),
        coefficient: 4.34,
    }
}

fn varnish() -> MaterialType {
    MaterialType {
        id: 2,
        name: "Varnish".to_string(),
        defect_percentage: 0.5,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Test requirement without defects
    #[test]
    fn test_no_defect() {
        assert_eq!(estimate_material(2.0, 0.0, 10, 1.0, 1.0), Ok(20));
    }

    /// Test 10% defect allowance
    #[test]
    fn test_ten_percent_defect() {
        assert_eq!(estimate_material(2.0, 10.0, 10, 1.0, 1.0), Ok(22));
    }

    /// Test fractional requirement is rounded up
    #[test]
    fn test_fraction_rounded_up() {
        // per unit 3.0, total 9.0, with 5% defect 9.45
        assert_eq!(estimate_material(1.5, 5.0, 3, 2.0, 1.0), Ok(10));
    }

    /// Test zero and negative product quantity
    #[test]
    fn test_invalid_quantity() {
        for quantity in [0, -1, -100] {
            assert_eq!(
                estimate_material(1.0, 0.0, quantity, 1.0, 1.0),
                Err(EstimateError::InvalidInput("product_quantity"))
            );
        }
    }

    /// Test non-positive process parameters
    #[test]
    fn test_invalid_params() {
        assert!(matches!(
            estimate_material(1.0, 0.0, 5, 0.0, 1.0),
            Err(EstimateError::InvalidInput(_))
        ));
        assert!(matches!(
            estimate_material(1.0, 0.0, 5, 1.0, -2.0),
            Err(EstimateError::InvalidInput(_))
        ));
    }

    /// Test legacy endpoint value for each outcome
    #[test]
    fn test_legacy_sentinel() {
        let invalid = estimate_material(1.0, 0.0, 0, 1.0, 1.0);
        assert_eq!(to_legacy_value(&invalid), LEGACY_FAILURE_SENTINEL);

        let missing: Result<u64, EstimateError> = Err(EstimateError::NotFound("Material type"));
        assert_eq!(to_legacy_value(&missing), -1);

        assert_eq!(to_legacy_value(&estimate_material(2.0, 10.0, 10, 1.0, 1.0)), 22);
    }

    /// Test unknown types report NotFound even for invalid requests
    #[test]
    fn test_unknown_type_before_validation() {
        let zero_quantity = MaterialRequest {
            product_quantity: 0,
            param1: 1.0,
            param2: 1.0,
        };
        let negative_param = MaterialRequest {
            product_quantity: 5,
            param1: -1.0,
            param2: 1.0,
        };

        for request in [zero_quantity, negative_param] {
            let missing_product = resolve_estimate(None, Some(&varnish()), request);
            assert_eq!(missing_product, Err(EstimateError::NotFound("Product type")));
            assert_eq!(to_legacy_value(&missing_product), -1);

            let missing_material = resolve_estimate(Some(&parquet()), None, request);
            assert_eq!(missing_material, Err(EstimateError::NotFound("Material type")));
            assert_eq!(to_legacy_value(&missing_material), -1);
        }
    }

    /// Test 2^64 is out of range
    #[test]
    fn test_u64_overflow_rejected() {
        let result = estimate_material(1.0, 0.0, 1, 18_446_744_073_709_551_616.0, 1.0);
        assert_eq!(result, Err(EstimateError::InvalidInput("material_required")));
        assert_eq!(to_legacy_value(&result), LEGACY_FAILURE_SENTINEL);
    }

    /// Test request wrapper matches the free function
    #[test]
    fn test_material_request() {
        let request = MaterialRequest {
            product_quantity: 10,
            param1: 1.0,
            param2: 1.0,
        };
        assert_eq!(request.estimate(2.0, 10.0), estimate_material(2.0, 10.0, 10, 1.0, 1.0));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for positive process parameters (0.01 to 100.00)
    fn param_strategy() -> impl Strategy<Value = f64> {
        (1u32..=10_000u32).prop_map(|n| n as f64 / 100.0)
    }

    /// Strategy for product type coefficients (0.1 to 10.0)
    fn coefficient_strategy() -> impl Strategy<Value = f64> {
        (1u32..=100u32).prop_map(|n| n as f64 / 10.0)
    }

    /// Strategy for defect percentages in [0, 100)
    fn defect_strategy() -> impl Strategy<Value = f64> {
        (0u32..10_000u32).prop_map(|n| n as f64 / 100.0)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Result is never below the exact requirement and less than one unit above it
        #[test]
        fn prop_result_is_ceiling(
            coefficient in coefficient_strategy(),
            defect in defect_strategy(),
            quantity in 1i64..=1_000,
            param1 in param_strategy(),
            param2 in param_strategy(),
        ) {
            let exact = param1 * param2 * coefficient * quantity as f64 * (1.0 + defect / 100.0);
            let required = estimate_material(coefficient, defect, quantity, param1, param2).unwrap();

            prop_assert!(required as f64 >= exact);
            prop_assert!((required as f64) - exact < 1.0);
        }

        /// Defect allowance never lowers the requirement
        #[test]
        fn prop_defect_never_reduces(
            coefficient in coefficient_strategy(),
            defect in defect_strategy(),
            quantity in 1i64..=1_000,
            param1 in param_strategy(),
        ) {
            let without = estimate_material(coefficient, 0.0, quantity, param1, 1.0).unwrap();
            let with = estimate_material(coefficient, defect, quantity, param1, 1.0).unwrap();
            prop_assert!(with >= without);
        }

        /// A missing product type wins over any request
        #[test]
        fn prop_missing_type_is_not_found(
            quantity in -1_000i64..=1_000,
            param1 in -100.0f64..100.0,
            param2 in -100.0f64..100.0,
        ) {
            let request = MaterialRequest { product_quantity: quantity, param1, param2 };
            let result = resolve_estimate(None, Some(&varnish()), request);
            prop_assert_eq!(result, Err(EstimateError::NotFound("Product type")));
        }

        /// Any non-positive quantity is rejected whatever the other inputs
        #[test]
        fn prop_non_positive_quantity_rejected(
            quantity in -1_000i64..=0,
            param1 in param_strategy(),
            param2 in param_strategy(),
        ) {
            let result = estimate_material(1.0, 0.0, quantity, param1, param2);
            prop_assert_eq!(result, Err(EstimateError::InvalidInput("product_quantity")));
        }
    }
}
