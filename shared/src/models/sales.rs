//! Sales history models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Partner;

/// A single sale of a product to a partner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sale {
    pub id: i64,
    pub partner_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub sale_date: NaiveDate,
}

/// Input for recording a sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSaleInput {
    pub partner_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    /// Defaults to today
    pub sale_date: Option<NaiveDate>,
}

/// Partner sales history over an optional date range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesHistory {
    pub partner: Partner,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub sales: Vec<Sale>,
    /// Sum of quantities within the range
    pub total_sales: i64,
    /// Discount computed from all sales, ignoring the range
    pub current_discount: u32,
}

/// Sum the quantities of a set of sales
pub fn total_quantity(sales: &[Sale]) -> i64 {
    sales.iter().map(|s| s.quantity as i64).sum()
}
