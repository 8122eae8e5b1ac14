//! Validation utilities for the Partner Management Platform

use chrono::NaiveDate;
use rust_decimal::Decimal;

// ============================================================================
// Partner Validations
// ============================================================================

/// Validate partner rating is non-negative
pub fn validate_rating(rating: i32) -> Result<(), &'static str> {
    if rating < 0 {
        return Err("Rating must be a non-negative number");
    }
    Ok(())
}

/// Validate partner phone number
/// Accepts only: +7 followed by 10 digits (e.g. +79999999999)
pub fn validate_partner_phone(phone: &str) -> Result<(), &'static str> {
    let rest = match phone.strip_prefix("+7") {
        Some(rest) => rest,
        None => return Err("Phone must be in the format +79999999999"),
    };
    if rest.len() != 10 || !rest.chars().all(|c| c.is_ascii_digit()) {
        return Err("Phone must be in the format +79999999999");
    }
    Ok(())
}

/// Validate taxpayer identification number (INN)
/// Empty is allowed; otherwise digits only, at most 12
pub fn validate_inn(inn: &str) -> Result<(), &'static str> {
    if inn.is_empty() {
        return Ok(());
    }
    if inn.len() > 12 {
        return Err("INN must be at most 12 digits");
    }
    if !inn.chars().all(|c| c.is_ascii_digit()) {
        return Err("INN must contain digits only");
    }
    Ok(())
}

// ============================================================================
// Catalog Validations
// ============================================================================

/// Validate product type coefficient is a positive number
pub fn validate_coefficient(coefficient: f64) -> Result<(), &'static str> {
    if !coefficient.is_finite() || coefficient <= 0.0 {
        return Err("Coefficient must be a positive number");
    }
    Ok(())
}

/// Validate material defect percentage is in [0, 100)
pub fn validate_defect_percentage(percentage: f64) -> Result<(), &'static str> {
    if !percentage.is_finite() || !(0.0..100.0).contains(&percentage) {
        return Err("Defect percentage must be between 0 and 100");
    }
    Ok(())
}

/// Validate monetary amount is not negative
pub fn validate_non_negative_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount < Decimal::ZERO {
        return Err("Amount cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Sales Validations
// ============================================================================

/// Validate sold quantity is at least one unit
pub fn validate_sale_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity < 1 {
        return Err("Quantity must be at least 1");
    }
    Ok(())
}

/// Validate an optional date range is ordered
pub fn validate_date_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<(), &'static str> {
    match (from, to) {
        (Some(from), Some(to)) if from > to => Err("Start date must not be after end date"),
        _ => Ok(()),
    }
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let (local, domain) = match email.split_once('@') {
        Some(parts) => parts,
        None => return Err("Invalid email format"),
    };
    if local.is_empty() || !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.')
    {
        return Err("Invalid email format");
    }
    Ok(())
}

/// Validate a display name: non-blank, at most 255 characters
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name is required");
    }
    if name.chars().count() > 255 {
        return Err("Name must be at most 255 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partner_phone() {
        assert!(validate_partner_phone("+79999999999").is_ok());
        assert!(validate_partner_phone("+7999999999").is_err());
        assert!(validate_partner_phone("+799999999999").is_err());
        assert!(validate_partner_phone("89999999999").is_err());
        assert!(validate_partner_phone("+7999999999a").is_err());
        assert!(validate_partner_phone("").is_err());
    }

    #[test]
    fn test_inn() {
        assert!(validate_inn("").is_ok());
        assert!(validate_inn("770123456789").is_ok());
        assert!(validate_inn("7701234567890").is_err());
        assert!(validate_inn("77-01").is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("sales@partner.ru").is_ok());
        assert!(validate_email("sales.partner.ru").is_err());
        assert!(validate_email("@partner.ru").is_err());
        assert!(validate_email("sales@partner").is_err());
    }

    #[test]
    fn test_defect_percentage_bounds() {
        assert!(validate_defect_percentage(0.0).is_ok());
        assert!(validate_defect_percentage(99.9).is_ok());
        assert!(validate_defect_percentage(100.0).is_err());
        assert!(validate_defect_percentage(-0.1).is_err());
        assert!(validate_defect_percentage(f64::NAN).is_err());
    }

    #[test]
    fn test_date_range_order() {
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert!(validate_date_range(Some(d1), Some(d2)).is_ok());
        assert!(validate_date_range(Some(d1), Some(d1)).is_ok());
        assert!(validate_date_range(Some(d2), Some(d1)).is_err());
        assert!(validate_date_range(None, Some(d1)).is_ok());
    }
}
