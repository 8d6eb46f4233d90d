//! Scenario inputs: raw string configs, typed parameters and saved sessions

mod data;
mod params;
pub mod session;

pub use data::{BuyConfig, RentConfig, DownPaymentType, initial_investment_for};
pub use params::{BuyParams, RentParams, MaintenanceMode, parse_field, ADVISORY_MAX_RATE, ADVISORY_MAX_YEARS};
pub use session::{Session, load_session, save_session};
