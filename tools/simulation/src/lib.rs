//! Simulation and reporting for the stable matching engine
//!
//! Drives the engine over generated or loaded preference tables and checks
//! the results from several angles.
//!
//! # Modules
//! - `scenario`: seeded generation, solve and verify
//! - `report`: text rendering of a single run
//! - `replay`: proposal-log replay and selection-order agreement
//! - `metrics`: aggregates over batches of seeded trials
//! - `export`: JSON export of everything above

pub mod scenario;
pub mod report;
pub mod replay;
pub mod metrics;
pub mod export;

/// Crate version constant
pub const VERSION: &str = "1.0.0";
