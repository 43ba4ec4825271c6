//! wf-core: stable foundation for wortflow.
//!
//! Contains:
//! - units (uom-backed metric/imperial conversions)
//! - numeric (float helpers + tolerances)
//! - config (injected brewing constants)
//! - error (shared error types)

pub mod config;
pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use config::BrewConfig;
pub use error::{BrewError, BrewResult};
pub use numeric::*;
pub use units::*;
