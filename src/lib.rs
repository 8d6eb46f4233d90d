//! Rent vs Buy - month-by-month projection of buying versus renting a home
//!
//! This library provides:
//! - Parsing and validation of string-typed scenario inputs
//! - Mortgage amortization, appreciation and holding-cost projection
//! - Rent escalation projection
//! - Cross-investment reconciliation and after-tax net values for both paths
//! - CSV export, saved sessions and parallel scenario sweeps

pub mod error;
pub mod inputs;
pub mod assumptions;
pub mod projection;
pub mod scenario;
pub mod export;

// Re-export commonly used types
pub use error::{ProjectionError, SessionError};
pub use inputs::{BuyConfig, RentConfig, Session};
pub use assumptions::Assumptions;
pub use projection::{ProjectionEngine, ProjectionRequest, ProjectionResult, BuyMonthRecord, RentMonthRecord};
pub use scenario::ScenarioRunner;
