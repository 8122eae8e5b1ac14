//! Partner discount tiers

/// Discount tiers as `(exclusive lower bound, percent)`, highest first.
pub const DISCOUNT_TIERS: &[(u64, u32)] = &[(300_000, 15), (50_000, 10), (10_000, 5)];

/// Calculate a partner's discount percentage from the total quantity of
/// products sold to them.
pub fn calculate_discount(total_sales_quantity: u64) -> u32 {
    DISCOUNT_TIERS
        .iter()
        .find(|(threshold, _)| total_sales_quantity > *threshold)
        .map(|(_, percent)| *percent)
        .unwrap_or(0)
}
