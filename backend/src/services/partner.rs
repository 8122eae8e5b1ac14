//! Partner management service

use shared::{
    CreatePartnerTypeInput, PaginatedResponse, PaginationMeta, Pagination, Partner,
    PartnerFilter, PartnerInput, PartnerType,
};
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};

/// Partner service for managing resellers and their categories
#[derive(Clone)]
pub struct PartnerService {
    db: PgPool,
}

/// Row for partner queries joined with the partner type name
#[derive(Debug, FromRow)]
struct PartnerRow {
    id: i64,
    partner_type_id: i64,
    partner_type_name: String,
    name: String,
    rating: i32,
    address: String,
    director_name: String,
    phone: String,
    email: String,
    inn: String,
}

impl From<PartnerRow> for Partner {
    fn from(r: PartnerRow) -> Self {
        Partner {
            id: r.id,
            partner_type_id: r.partner_type_id,
            partner_type_name: r.partner_type_name,
            name: r.name,
            rating: r.rating,
            address: r.address,
            director_name: r.director_name,
            phone: r.phone,
            email: r.email,
            inn: r.inn,
        }
    }
}

const PARTNER_COLUMNS: &str = r#"
    p.id, p.partner_type_id, pt.name AS partner_type_name, p.name, p.rating,
    p.address, p.director_name, p.phone, p.email, p.inn
"#;

/// Build an ILIKE pattern matching `term` anywhere, with wildcards escaped
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl PartnerService {
    /// Create a new PartnerService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List partners, best rated first, filtered by type and name search
    pub async fn list_partners(
        &self,
        filter: &PartnerFilter,
        per_page: u32,
    ) -> AppResult<PaginatedResponse<Partner>> {
        let pagination = Pagination::new(filter.page, per_page);
        let pattern = filter.search_term().map(contains_pattern);

        let total_items = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM partners p
            WHERE ($1::BIGINT IS NULL OR p.partner_type_id = $1)
              AND ($2::TEXT IS NULL OR p.name ILIKE $2)
            "#,
        )
        .bind(filter.partner_type)
        .bind(&pattern)
        .fetch_one(&self.db)
        .await?;

        let rows = sqlx::query_as::<_, PartnerRow>(&format!(
            r#"
            SELECT {PARTNER_COLUMNS}
            FROM partners p
            JOIN partner_types pt ON pt.id = p.partner_type_id
            WHERE ($1::BIGINT IS NULL OR p.partner_type_id = $1)
              AND ($2::TEXT IS NULL OR p.name ILIKE $2)
            ORDER BY p.rating DESC, p.name
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(filter.partner_type)
        .bind(&pattern)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(PaginatedResponse {
            data: rows.into_iter().map(Partner::from).collect(),
            pagination: PaginationMeta::new(pagination, total_items.max(0) as u64),
        })
    }

    /// Get a partner by ID
    pub async fn get_partner(&self, partner_id: i64) -> AppResult<Partner> {
        let row = sqlx::query_as::<_, PartnerRow>(&format!(
            r#"
            SELECT {PARTNER_COLUMNS}
            FROM partners p
            JOIN partner_types pt ON pt.id = p.partner_type_id
            WHERE p.id = $1
            "#
        ))
        .bind(partner_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Partner".to_string()))?;

        Ok(row.into())
    }

    /// Create a new partner
    pub async fn create_partner(&self, input: PartnerInput) -> AppResult<Partner> {
        input.validate()?;
        self.ensure_partner_type_exists(input.partner_type_id).await?;

        let partner_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO partners (
                partner_type_id, name, rating, address, director_name, phone, email, inn
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(input.partner_type_id)
        .bind(input.name.trim())
        .bind(input.rating)
        .bind(input.address.trim())
        .bind(input.director_name.trim())
        .bind(&input.phone)
        .bind(input.email.trim())
        .bind(input.inn.as_deref().unwrap_or(""))
        .fetch_one(&self.db)
        .await?;

        tracing::info!(partner_id, "Partner created");
        self.get_partner(partner_id).await
    }

    /// Replace a partner's details
    pub async fn update_partner(&self, partner_id: i64, input: PartnerInput) -> AppResult<Partner> {
        input.validate()?;
        self.ensure_partner_type_exists(input.partner_type_id).await?;

        let result = sqlx::query(
            r#"
            UPDATE partners
            SET partner_type_id = $1, name = $2, rating = $3, address = $4,
                director_name = $5, phone = $6, email = $7, inn = $8
            WHERE id = $9
            "#,
        )
        .bind(input.partner_type_id)
        .bind(input.name.trim())
        .bind(input.rating)
        .bind(input.address.trim())
        .bind(input.director_name.trim())
        .bind(&input.phone)
        .bind(input.email.trim())
        .bind(input.inn.as_deref().unwrap_or(""))
        .bind(partner_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Partner".to_string()));
        }

        tracing::info!(partner_id, "Partner updated");
        self.get_partner(partner_id).await
    }

    /// Sum of quantities across every recorded sale to a partner
    pub async fn total_sales(&self, partner_id: i64) -> AppResult<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(quantity), 0)::BIGINT FROM sales_history WHERE partner_id = $1",
        )
        .bind(partner_id)
        .fetch_one(&self.db)
        .await?;

        Ok(total)
    }

    /// List partner types
    pub async fn list_partner_types(&self) -> AppResult<Vec<PartnerType>> {
        let rows = sqlx::query_as::<_, (i64, String)>(
            "SELECT id, name FROM partner_types ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| PartnerType { id, name })
            .collect())
    }

    /// Create a partner type
    pub async fn create_partner_type(&self, input: CreatePartnerTypeInput) -> AppResult<PartnerType> {
        shared::validate_name(&input.name).map_err(|e| AppError::invalid_field("name", e))?;

        let (id, name) = sqlx::query_as::<_, (i64, String)>(
            "INSERT INTO partner_types (name) VALUES ($1) RETURNING id, name",
        )
        .bind(input.name.trim())
        .fetch_one(&self.db)
        .await?;

        Ok(PartnerType { id, name })
    }

    async fn ensure_partner_type_exists(&self, partner_type_id: i64) -> AppResult<()> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM partner_types WHERE id = $1)",
        )
        .bind(partner_type_id)
        .fetch_one(&self.db)
        .await?;

        if !exists {
            return Err(AppError::NotFound("Partner type".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("stroy"), "%stroy%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
