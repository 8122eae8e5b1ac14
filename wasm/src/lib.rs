//! WebAssembly module for the Partner Management Platform
//!
//! Provides client-side computation for:
//! - Partner discount preview
//! - Material requirement estimation
//! - Partner form validation

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::calc::*;
pub use shared::models::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("partner-management wasm loaded"));
}

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}

/// Discount percentage for a partner's total sold quantity
#[wasm_bindgen]
pub fn calculate_partner_discount(total_sales_quantity: f64) -> u32 {
    // NaN and negatives become 0
    calculate_discount(total_sales_quantity.max(0.0) as u64)
}

/// Estimate required material; throws on invalid input
#[wasm_bindgen]
pub fn estimate_material_required(
    coefficient: f64,
    defect_percentage: f64,
    product_quantity: f64,
    param1: f64,
    param2: f64,
) -> Result<f64, JsValue> {
    if product_quantity.fract() != 0.0 || !product_quantity.is_finite() {
        return Err(js_error("product_quantity must be a whole number"));
    }
    let required = estimate_material(
        coefficient,
        defect_percentage,
        product_quantity as i64,
        param1,
        param2,
    )
    .map_err(|e| js_error(&e.to_string()))?;
    Ok(required as f64)
}

/// Estimate required material, returning -1 on any failure
#[wasm_bindgen]
pub fn estimate_material_or_sentinel(
    coefficient: f64,
    defect_percentage: f64,
    product_quantity: f64,
    param1: f64,
    param2: f64,
) -> f64 {
    estimate_material_required(coefficient, defect_percentage, product_quantity, param1, param2)
        .unwrap_or(LEGACY_FAILURE_SENTINEL as f64)
}

/// Validate a partner form serialized as JSON; throws "field: message"
#[wasm_bindgen]
pub fn validate_partner_form(partner_json: &str) -> Result<(), JsValue> {
    let input: PartnerInput = serde_json::from_str(partner_json)
        .map_err(|e| js_error(&format!("Invalid partner JSON: {}", e)))?;
    input
        .validate()
        .map_err(|(field, message)| js_error(&format!("{}: {}", field, message)))
}

/// Check a partner phone number (+7 followed by 10 digits)
#[wasm_bindgen]
pub fn is_valid_partner_phone(phone: &str) -> bool {
    validate_partner_phone(phone).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partner_discount() {
        assert_eq!(calculate_partner_discount(0.0), 0);
        assert_eq!(calculate_partner_discount(10_001.0), 5);
        assert_eq!(calculate_partner_discount(300_001.0), 15);
        assert_eq!(calculate_partner_discount(-5.0), 0);
        assert_eq!(calculate_partner_discount(f64::NAN), 0);
    }

    #[test]
    fn test_partner_phone() {
        assert!(is_valid_partner_phone("+79161234567"));
        assert!(!is_valid_partner_phone("9161234567"));
    }
}
