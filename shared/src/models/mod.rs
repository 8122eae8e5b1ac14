//! Domain models for the Partner Management Platform

mod catalog;
mod partner;
mod sales;

pub use catalog::*;
pub use partner::*;
pub use sales::*;
