//! Business logic services for the Partner Management Platform

pub mod calculation;
pub mod catalog;
pub mod partner;
pub mod sales;

pub use calculation::CalculationService;
pub use catalog::CatalogService;
pub use partner::PartnerService;
pub use sales::SalesService;
