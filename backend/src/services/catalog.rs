//! Product and material catalog service

use rust_decimal::Decimal;
use shared::{
    CreateMaterialInput, CreateMaterialTypeInput, CreateProductInput, CreateProductTypeInput,
    CreateRecipeInput, Material, MaterialType, Product, ProductType, Recipe,
};
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};

/// Catalog service for product types, materials, products and recipes
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct MaterialRow {
    id: i64,
    material_type_id: i64,
    name: String,
    unit: String,
    cost: Decimal,
    stock: i32,
    min_stock: i32,
}

impl From<MaterialRow> for Material {
    fn from(r: MaterialRow) -> Self {
        Material {
            id: r.id,
            material_type_id: r.material_type_id,
            name: r.name,
            unit: r.unit,
            cost: r.cost,
            stock: r.stock,
            min_stock: r.min_stock,
        }
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    product_type_id: i64,
    article: String,
    name: String,
    description: String,
    min_partner_cost: Decimal,
}

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Product {
            id: r.id,
            product_type_id: r.product_type_id,
            article: r.article,
            name: r.name,
            description: r.description,
            min_partner_cost: r.min_partner_cost,
        }
    }
}

/// Material with its stock warning flag
#[derive(Debug, Clone, serde::Serialize)]
pub struct MaterialView {
    #[serde(flatten)]
    pub material: Material,
    pub below_min_stock: bool,
}

impl From<Material> for MaterialView {
    fn from(material: Material) -> Self {
        let below_min_stock = material.below_min_stock();
        Self {
            material,
            below_min_stock,
        }
    }
}

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    // ------------------------------------------------------------------
    // Product types
    // ------------------------------------------------------------------

    pub async fn list_product_types(&self) -> AppResult<Vec<ProductType>> {
        let rows = sqlx::query_as::<_, (i64, String, f64)>(
            "SELECT id, name, coefficient FROM product_types ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, coefficient)| ProductType {
                id,
                name,
                coefficient,
            })
            .collect())
    }

    /// Look up a product type, returning `None` when it does not exist
    pub async fn find_product_type(&self, product_type_id: i64) -> AppResult<Option<ProductType>> {
        let row = sqlx::query_as::<_, (i64, String, f64)>(
            "SELECT id, name, coefficient FROM product_types WHERE id = $1",
        )
        .bind(product_type_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(|(id, name, coefficient)| ProductType {
            id,
            name,
            coefficient,
        }))
    }

    pub async fn get_product_type(&self, product_type_id: i64) -> AppResult<ProductType> {
        self.find_product_type(product_type_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product type".to_string()))
    }

    pub async fn create_product_type(&self, input: CreateProductTypeInput) -> AppResult<ProductType> {
        input.validate()?;

        let (id, name, coefficient) = sqlx::query_as::<_, (i64, String, f64)>(
            "INSERT INTO product_types (name, coefficient) VALUES ($1, $2) RETURNING id, name, coefficient",
        )
        .bind(input.name.trim())
        .bind(input.coefficient)
        .fetch_one(&self.db)
        .await?;

        Ok(ProductType {
            id,
            name,
            coefficient,
        })
    }

    // ------------------------------------------------------------------
    // Material types
    // ------------------------------------------------------------------

    pub async fn list_material_types(&self) -> AppResult<Vec<MaterialType>> {
        let rows = sqlx::query_as::<_, (i64, String, f64)>(
            "SELECT id, name, defect_percentage FROM material_types ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, defect_percentage)| MaterialType {
                id,
                name,
                defect_percentage,
            })
            .collect())
    }

    /// Look up a material type, returning `None` when it does not exist
    pub async fn find_material_type(&self, material_type_id: i64) -> AppResult<Option<MaterialType>> {
        let row = sqlx::query_as::<_, (i64, String, f64)>(
            "SELECT id, name, defect_percentage FROM material_types WHERE id = $1",
        )
        .bind(material_type_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(|(id, name, defect_percentage)| MaterialType {
            id,
            name,
            defect_percentage,
        }))
    }

    pub async fn get_material_type(&self, material_type_id: i64) -> AppResult<MaterialType> {
        self.find_material_type(material_type_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Material type".to_string()))
    }

    pub async fn create_material_type(
        &self,
        input: CreateMaterialTypeInput,
    ) -> AppResult<MaterialType> {
        input.validate()?;

        let (id, name, defect_percentage) = sqlx::query_as::<_, (i64, String, f64)>(
            r#"
            INSERT INTO material_types (name, defect_percentage)
            VALUES ($1, $2)
            RETURNING id, name, defect_percentage
            "#,
        )
        .bind(input.name.trim())
        .bind(input.defect_percentage)
        .fetch_one(&self.db)
        .await?;

        Ok(MaterialType {
            id,
            name,
            defect_percentage,
        })
    }

    // ------------------------------------------------------------------
    // Materials
    // ------------------------------------------------------------------

    pub async fn list_materials(&self) -> AppResult<Vec<MaterialView>> {
        let rows = sqlx::query_as::<_, MaterialRow>(
            r#"
            SELECT id, material_type_id, name, unit, cost, stock, min_stock
            FROM materials
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| MaterialView::from(Material::from(r)))
            .collect())
    }

    pub async fn create_material(&self, input: CreateMaterialInput) -> AppResult<MaterialView> {
        input.validate()?;
        self.get_material_type(input.material_type_id).await?;

        let row = sqlx::query_as::<_, MaterialRow>(
            r#"
            INSERT INTO materials (material_type_id, name, unit, cost, stock, min_stock)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, material_type_id, name, unit, cost, stock, min_stock
            "#,
        )
        .bind(input.material_type_id)
        .bind(input.name.trim())
        .bind(input.unit.trim())
        .bind(input.cost)
        .bind(input.stock)
        .bind(input.min_stock)
        .fetch_one(&self.db)
        .await?;

        let view = MaterialView::from(Material::from(row));
        if view.below_min_stock {
            tracing::warn!(material_id = view.material.id, "Material stock below minimum");
        }
        Ok(view)
    }

    // ------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------

    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, product_type_id, article, name, description, min_partner_cost
            FROM products
            ORDER BY article
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<Product> {
        input.validate()?;
        self.get_product_type(input.product_type_id).await?;

        let article = input.article.trim();
        let duplicate = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE article = $1)",
        )
        .bind(article)
        .fetch_one(&self.db)
        .await?;

        if duplicate {
            return Err(AppError::DuplicateEntry("article".to_string()));
        }

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (product_type_id, article, name, description, min_partner_cost)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, product_type_id, article, name, description, min_partner_cost
            "#,
        )
        .bind(input.product_type_id)
        .bind(article)
        .bind(input.name.trim())
        .bind(&input.description)
        .bind(input.min_partner_cost)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::unique_violation_as(e, "article"))?;

        Ok(row.into())
    }

    // ------------------------------------------------------------------
    // Recipes
    // ------------------------------------------------------------------

    pub async fn list_recipes(&self, product_id: Option<i64>) -> AppResult<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, (i64, i64, i64, f64)>(
            r#"
            SELECT id, product_id, material_id, material_quantity
            FROM recipes
            WHERE ($1::BIGINT IS NULL OR product_id = $1)
            ORDER BY product_id, material_id
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, product_id, material_id, material_quantity)| Recipe {
                id,
                product_id,
                material_id,
                material_quantity,
            })
            .collect())
    }

    pub async fn create_recipe(&self, input: CreateRecipeInput) -> AppResult<Recipe> {
        input.validate()?;

        let (product_exists, material_exists, duplicate) =
            sqlx::query_as::<_, (bool, bool, bool)>(
                r#"
                SELECT EXISTS(SELECT 1 FROM products WHERE id = $1),
                       EXISTS(SELECT 1 FROM materials WHERE id = $2),
                       EXISTS(SELECT 1 FROM recipes WHERE product_id = $1 AND material_id = $2)
                "#,
            )
            .bind(input.product_id)
            .bind(input.material_id)
            .fetch_one(&self.db)
            .await?;

        if !product_exists {
            return Err(AppError::NotFound("Product".to_string()));
        }
        if !material_exists {
            return Err(AppError::NotFound("Material".to_string()));
        }
        if duplicate {
            return Err(AppError::DuplicateEntry("product/material".to_string()));
        }

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO recipes (product_id, material_id, material_quantity)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(input.product_id)
        .bind(input.material_id)
        .bind(input.material_quantity)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::unique_violation_as(e, "product/material"))?;

        Ok(Recipe {
            id,
            product_id: input.product_id,
            material_id: input.material_id,
            material_quantity: input.material_quantity,
        })
    }
}
