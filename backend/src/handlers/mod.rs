//! HTTP handlers for the Partner Management Platform

pub mod calculation;
pub mod catalog;
pub mod health;
pub mod partner;
pub mod sales;

pub use calculation::*;
pub use catalog::*;
pub use health::*;
pub use partner::*;
pub use sales::*;
