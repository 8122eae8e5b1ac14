//! Sales history service

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use shared::{
    calculate_discount, total_quantity, validate_date_range, validate_sale_quantity, DateRange,
    RecordSaleInput, Sale, SalesHistory,
};
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};
use crate::services::PartnerService;

/// Column names of an exported sales history, in `Sale` field order
pub const SALE_CSV_HEADERS: [&str; 6] = [
    "id",
    "partner_id",
    "product_id",
    "product_name",
    "quantity",
    "sale_date",
];

/// Sales service for recording and reporting partner sales
#[derive(Clone)]
pub struct SalesService {
    db: PgPool,
}

/// Row for sales queries joined with the product name
#[derive(Debug, FromRow)]
struct SaleRow {
    id: i64,
    partner_id: i64,
    product_id: i64,
    product_name: String,
    quantity: i32,
    sale_date: NaiveDate,
}

impl From<SaleRow> for Sale {
    fn from(r: SaleRow) -> Self {
        Sale {
            id: r.id,
            partner_id: r.partner_id,
            product_id: r.product_id,
            product_name: r.product_name,
            quantity: r.quantity,
            sale_date: r.sale_date,
        }
    }
}

impl SalesService {
    /// Create a new SalesService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a sale of a product to a partner
    pub async fn record_sale(&self, input: RecordSaleInput) -> AppResult<Sale> {
        validate_sale_quantity(input.quantity)
            .map_err(|e| AppError::invalid_field("quantity", e))?;

        let partner_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM partners WHERE id = $1)",
        )
        .bind(input.partner_id)
        .fetch_one(&self.db)
        .await?;

        if !partner_exists {
            return Err(AppError::NotFound("Partner".to_string()));
        }

        let product_name = sqlx::query_scalar::<_, String>("SELECT name FROM products WHERE id = $1")
            .bind(input.product_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let sale_date = input.sale_date.unwrap_or_else(|| Utc::now().date_naive());

        let sale_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO sales_history (partner_id, product_id, quantity, sale_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(input.partner_id)
        .bind(input.product_id)
        .bind(input.quantity)
        .bind(sale_date)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            sale_id,
            partner_id = input.partner_id,
            quantity = input.quantity,
            "Sale recorded"
        );

        Ok(Sale {
            id: sale_id,
            partner_id: input.partner_id,
            product_id: input.product_id,
            product_name,
            quantity: input.quantity,
            sale_date,
        })
    }

    /// Get a partner's sales, newest first, within an inclusive date range.
    /// The discount always reflects every sale, not just the range.
    pub async fn get_sales_history(
        &self,
        partner_id: i64,
        range: DateRange,
    ) -> AppResult<SalesHistory> {
        validate_date_range(range.start, range.end)
            .map_err(|e| AppError::invalid_field("date_from", e))?;

        let partners = PartnerService::new(self.db.clone());
        let partner = partners.get_partner(partner_id).await?;

        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT s.id, s.partner_id, s.product_id, pr.name AS product_name, s.quantity, s.sale_date
            FROM sales_history s
            JOIN products pr ON pr.id = s.product_id
            WHERE s.partner_id = $1
              AND ($2::DATE IS NULL OR s.sale_date >= $2)
              AND ($3::DATE IS NULL OR s.sale_date <= $3)
            ORDER BY s.sale_date DESC, s.id DESC
            "#,
        )
        .bind(partner_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.db)
        .await?;

        let sales: Vec<Sale> = rows.into_iter().map(Sale::from).collect();
        let total_sales = total_quantity(&sales);
        let all_time = partners.total_sales(partner_id).await?;

        Ok(SalesHistory {
            partner,
            date_from: range.start,
            date_to: range.end,
            sales,
            total_sales,
            current_discount: calculate_discount(all_time.max(0) as u64),
        })
    }

    /// Export records as CSV. `headers` is written even when `data` is
    /// empty and must follow the field order of `T`.
    pub fn export_to_csv<T: Serialize>(headers: &[&str], data: &[T]) -> AppResult<String> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(vec![]);
        wtr.write_record(headers)
            .map_err(|e| AppError::Internal(format!("CSV header error: {}", e)))?;
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}
