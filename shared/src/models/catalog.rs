//! Product and material catalog models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::validation::{
    validate_coefficient, validate_defect_percentage, validate_name, validate_non_negative_amount,
};

/// Product category with its material consumption coefficient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductType {
    pub id: i64,
    pub name: String,
    pub coefficient: f64,
}

/// Material category with its expected defect (waste) rate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialType {
    pub id: i64,
    pub name: String,
    /// Percentage in [0, 100)
    pub defect_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Material {
    pub id: i64,
    pub material_type_id: i64,
    pub name: String,
    /// Unit of measure, e.g. "kg" or "m2"
    pub unit: String,
    pub cost: Decimal,
    pub stock: i32,
    pub min_stock: i32,
}

impl Material {
    pub fn below_min_stock(&self) -> bool {
        self.stock < self.min_stock
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub product_type_id: i64,
    /// Unique article number
    pub article: String,
    pub name: String,
    pub description: String,
    pub min_partner_cost: Decimal,
}

/// Amount of one material consumed by one unit of a product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: i64,
    pub product_id: i64,
    pub material_id: i64,
    pub material_quantity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductTypeInput {
    pub name: String,
    pub coefficient: f64,
}

impl CreateProductTypeInput {
    pub fn validate(&self) -> Result<(), (&'static str, &'static str)> {
        validate_name(&self.name).map_err(|e| ("name", e))?;
        validate_coefficient(self.coefficient).map_err(|e| ("coefficient", e))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMaterialTypeInput {
    pub name: String,
    pub defect_percentage: f64,
}

impl CreateMaterialTypeInput {
    pub fn validate(&self) -> Result<(), (&'static str, &'static str)> {
        validate_name(&self.name).map_err(|e| ("name", e))?;
        validate_defect_percentage(self.defect_percentage).map_err(|e| ("defect_percentage", e))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMaterialInput {
    pub material_type_id: i64,
    pub name: String,
    pub unit: String,
    pub cost: Decimal,
    pub stock: i32,
    pub min_stock: i32,
}

impl CreateMaterialInput {
    pub fn validate(&self) -> Result<(), (&'static str, &'static str)> {
        validate_name(&self.name).map_err(|e| ("name", e))?;
        if self.unit.trim().is_empty() || self.unit.chars().count() > 50 {
            return Err(("unit", "Unit must be 1-50 characters"));
        }
        validate_non_negative_amount(self.cost).map_err(|e| ("cost", e))?;
        if self.stock < 0 {
            return Err(("stock", "Stock cannot be negative"));
        }
        if self.min_stock < 0 {
            return Err(("min_stock", "Minimum stock cannot be negative"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductInput {
    pub product_type_id: i64,
    pub article: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub min_partner_cost: Decimal,
}

impl CreateProductInput {
    pub fn validate(&self) -> Result<(), (&'static str, &'static str)> {
        let article = self.article.trim();
        if article.is_empty() || article.chars().count() > 100 {
            return Err(("article", "Article must be 1-100 characters"));
        }
        validate_name(&self.name).map_err(|e| ("name", e))?;
        validate_non_negative_amount(self.min_partner_cost).map_err(|e| ("min_partner_cost", e))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecipeInput {
    pub product_id: i64,
    pub material_id: i64,
    pub material_quantity: f64,
}

impl CreateRecipeInput {
    pub fn validate(&self) -> Result<(), (&'static str, &'static str)> {
        if !(self.material_quantity.is_finite() && self.material_quantity > 0.0) {
            return Err(("material_quantity", "Material quantity must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_min_stock() {
        let mut material = Material {
            id: 1,
            material_type_id: 1,
            name: "Oak board".to_string(),
            unit: "m2".to_string(),
            cost: Decimal::new(125050, 2),
            stock: 5,
            min_stock: 10,
        };
        assert!(material.below_min_stock());
        material.stock = 10;
        assert!(!material.below_min_stock());
    }

    #[test]
    fn test_product_type_requires_positive_coefficient() {
        let input = CreateProductTypeInput {
            name: "Laminate".to_string(),
            coefficient: 0.0,
        };
        assert_eq!(input.validate().unwrap_err().0, "coefficient");
    }

    #[test]
    fn test_material_type_defect_range() {
        let mut input = CreateMaterialTypeInput {
            name: "Paint".to_string(),
            defect_percentage: 0.5,
        };
        assert!(input.validate().is_ok());
        input.defect_percentage = 100.0;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_recipe_quantity_positive() {
        let input = CreateRecipeInput {
            product_id: 1,
            material_id: 1,
            material_quantity: -1.0,
        };
        assert!(input.validate().is_err());
    }
}
