//! Shared types and models for the Partner Management Platform
//!
//! This crate contains the domain models, the discount and material
//! calculations, and validation shared between the backend and the
//! browser (via WASM).

pub mod calc;
pub mod models;
pub mod types;
pub mod validation;

pub use calc::*;
pub use models::*;
pub use types::*;
pub use validation::*;
