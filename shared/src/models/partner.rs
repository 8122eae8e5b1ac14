//! Partner (reseller) models

use serde::{Deserialize, Serialize};

use crate::validation::{
    validate_email, validate_inn, validate_name, validate_partner_phone, validate_rating,
};

/// Category a partner belongs to (wholesale, retail, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartnerType {
    pub id: i64,
    pub name: String,
}

/// A reseller working with the company
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Partner {
    pub id: i64,
    pub partner_type_id: i64,
    pub partner_type_name: String,
    pub name: String,
    pub rating: i32,
    /// Legal address
    pub address: String,
    pub director_name: String,
    pub phone: String,
    pub email: String,
    /// Taxpayer identification number, may be empty
    pub inn: String,
}

/// Input for creating or replacing a partner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerInput {
    pub partner_type_id: i64,
    pub name: String,
    pub rating: i32,
    pub address: String,
    pub director_name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub inn: Option<String>,
}

impl PartnerInput {
    /// Validate every field, reporting the first offending field name
    pub fn validate(&self) -> Result<(), (&'static str, &'static str)> {
        validate_name(&self.name).map_err(|e| ("name", e))?;
        validate_rating(self.rating).map_err(|e| ("rating", e))?;
        validate_name(&self.director_name).map_err(|e| ("director_name", e))?;
        if self.address.trim().is_empty() {
            return Err(("address", "Address is required"));
        }
        validate_partner_phone(&self.phone).map_err(|e| ("phone", e))?;
        validate_email(&self.email).map_err(|e| ("email", e))?;
        validate_inn(self.inn.as_deref().unwrap_or("")).map_err(|e| ("inn", e))?;
        Ok(())
    }
}

/// Input for creating a partner type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePartnerTypeInput {
    pub name: String,
}

/// Partner list filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartnerFilter {
    pub partner_type: Option<i64>,
    /// Case-insensitive substring of the partner name
    pub search: Option<String>,
    pub page: Option<u32>,
}

impl PartnerFilter {
    /// Search term with surrounding whitespace removed; blank means no filter
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
