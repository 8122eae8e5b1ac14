//! Pure business calculations
//!
//! Both calculators are stateless and free of I/O so they can run in the
//! backend, in the browser (via WASM) and in tests alike.

mod discount;
mod material;

pub use discount::*;
pub use material::*;
