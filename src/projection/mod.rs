//! Projection engine for the buy and rent paths

pub mod amortization;
mod state;
mod engine;
mod records;
mod reconcile;
mod compare;

pub use amortization::{monthly_payment, monthly_equivalent_rate, PaymentSplit};
pub use state::{appreciated_value, BuyState, BuyTerms, RentState};
pub use engine::{ProjectionEngine, ProjectionRequest};
pub use records::{BuyMonthRecord, RentMonthRecord, ContributionSide, ProjectionResult, ProjectionSummary};
pub use reconcile::{reconcile, InvestmentAccount, ReconcileTerms};
pub use compare::{Comparison, NetMeasure, Verdict};
