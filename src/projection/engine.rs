//! Projection engine: runs the buy and rent paths and reconciles them

use super::reconcile::{reconcile, ReconcileTerms};
use super::records::{BuyMonthRecord, ProjectionResult, RentMonthRecord};
use super::state::{BuyState, BuyTerms, RentState};
use crate::assumptions::Assumptions;
use crate::error::{ProjectionError, Result};
use crate::inputs::{BuyConfig, BuyParams, RentConfig, RentParams};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Input pair for one projection run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRequest {
    pub buy_config: BuyConfig,
    pub rent_config: RentConfig,
}

impl ProjectionRequest {
    pub fn new(buy_config: BuyConfig, rent_config: RentConfig) -> Self {
        Self {
            buy_config,
            rent_config,
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
}

impl ProjectionEngine {
    /// Create a new projection engine with given assumptions
    pub fn new(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Parse, validate and project a request
    pub fn project(&self, request: &ProjectionRequest) -> Result<ProjectionResult> {
        let buy = BuyParams::try_from(&request.buy_config)?;
        let rent = RentParams::try_from(&request.rent_config)?;
        self.project_params(&buy, &rent)
    }

    /// Project already-parsed parameters
    pub fn project_params(&self, buy: &BuyParams, rent: &RentParams) -> Result<ProjectionResult> {
        let months = buy.total_months();
        debug!(
            "projecting {} months: price {:.2}, loan {:.2} at {}%",
            months,
            buy.house_price,
            buy.loan_amount(),
            buy.mortgage_rate
        );

        if (rent.initial_investment - buy.upfront_cash()).abs() > 0.01 {
            warn!(
                "rent initial investment {:.2} differs from down payment plus closing costs {:.2}; using the latter",
                rent.initial_investment,
                buy.upfront_cash()
            );
        }

        let buy_rows = self.project_buy(buy)?;
        let rent_rows = self.project_rent(rent, months);

        let terms = ReconcileTerms {
            upfront_cash: buy.upfront_cash(),
            house_price: buy.house_price,
            sell_closing_cost_percent: buy.sell_closing_cost_percent,
            investment_return_rate: rent.investment_return_rate,
            capital_gains: self.assumptions.capital_gains,
        };
        let (buy_rows, rent_rows) = reconcile(buy_rows, rent_rows, &terms)?;

        let result = ProjectionResult {
            buy: buy_rows,
            rent: rent_rows,
        };
        check_finite(&result)?;

        debug!("projection complete: {} months", result.months());
        Ok(result)
    }

    /// Run the purchase path; investment and net-value fields are left zeroed
    pub fn project_buy(&self, params: &BuyParams) -> Result<Vec<BuyMonthRecord>> {
        let terms = BuyTerms::new(params, self.assumptions.pmi);
        if !terms.payment.is_finite() {
            return Err(ProjectionError::NonFinite { field: "monthlyPayment" });
        }

        let rows = (0..params.total_months())
            .scan(BuyState::at_purchase(params), |state, _| {
                let (next, row) = state.step(&terms);
                *state = next;
                Some(row)
            })
            .collect();

        Ok(rows)
    }

    /// Run the rental path over `months`; investment and net-value fields are left zeroed
    pub fn project_rent(&self, params: &RentParams, months: u32) -> Vec<RentMonthRecord> {
        (0..months)
            .scan(RentState::at_start(params), |state, _| {
                let (next, row) = state.step(params.rent_increase_rate);
                *state = next;
                Some(row)
            })
            .collect()
    }
}

/// A non-finite output means an input slipped past validation
fn check_finite(result: &ProjectionResult) -> Result<()> {
    if let Some(last) = result.buy.last() {
        if !last.net_value_after_tax.is_finite() || !last.house_value.is_finite() {
            return Err(ProjectionError::NonFinite { field: "buyData" });
        }
    }
    if let Some(last) = result.rent.last() {
        if !last.net_value_after_tax.is_finite() {
            return Err(ProjectionError::NonFinite { field: "rentData" });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn engine() -> ProjectionEngine {
        ProjectionEngine::new(Assumptions::us_default())
    }

    #[test]
    fn test_projection_runs() {
        let result = engine().project(&ProjectionRequest::default()).unwrap();

        assert_eq!(result.buy.len(), 360);
        assert_eq!(result.rent.len(), 360);
        assert_eq!(result.buy[0].month, 1);
        assert_eq!(result.rent[359].month, 360);
    }

    #[test]
    fn test_loan_fully_amortizes() {
        let result = engine().project(&ProjectionRequest::default()).unwrap();

        let last = result.buy.last().unwrap();
        assert!(last.remaining_principal.abs() < 1.0, "residual {}", last.remaining_principal);

        let total_principal: f64 = result.buy.iter().map(|r| r.principal_paid).sum();
        assert_relative_eq!(total_principal, 520_000.0, epsilon = 1e-4);
    }

    #[test]
    fn test_zero_rate_mortgage() {
        let request = ProjectionRequest {
            buy_config: BuyConfig {
                house_price: "150000".to_string(),
                down_payment_percent: "20".to_string(),
                mortgage_rate: "0".to_string(),
                mortgage_years: "10".to_string(),
                ..BuyConfig::default()
            },
            rent_config: RentConfig::default(),
        };
        let result = engine().project(&request).unwrap();

        assert_eq!(result.buy.len(), 120);
        assert_eq!(result.buy[0].payment, 1000.0);
        assert_eq!(result.buy[0].interest_paid, 0.0);
        assert!(result.buy[119].remaining_principal.abs() < 1e-6);
    }

    #[test]
    fn test_vanishing_rate_mortgage() {
        let request = ProjectionRequest {
            buy_config: BuyConfig {
                mortgage_rate: "0.00000000000001".to_string(),
                ..BuyConfig::default()
            },
            rent_config: RentConfig::default(),
        };
        let result = engine().project(&request).unwrap();

        assert_relative_eq!(result.buy[0].payment, 520_000.0 / 360.0, epsilon = 1e-9);
        assert!(result.buy[359].remaining_principal.abs() < 1e-4);
    }

    #[test]
    fn test_all_cash_purchase() {
        let mut config = BuyConfig::default();
        config.set_down_payment_percent(100.0);
        let request = ProjectionRequest::new(config, RentConfig::default());

        let result = engine().project(&request).unwrap();
        assert_eq!(result.buy[0].payment, 0.0);
        assert_eq!(result.buy[0].pmi, 0.0);
        assert_relative_eq!(result.buy[0].equity, result.buy[0].house_value, epsilon = 1e-9);
    }

    #[test]
    fn test_parse_error_stops_run() {
        let request = ProjectionRequest {
            rent_config: RentConfig {
                monthly_rent: "three thousand".to_string(),
                ..RentConfig::default()
            },
            ..ProjectionRequest::default()
        };
        let err = engine().project(&request).unwrap_err();
        assert_eq!(err.field(), "monthlyRent");
    }

    #[test]
    fn test_renter_seeded_from_buy_inputs() {
        let request = ProjectionRequest {
            rent_config: RentConfig {
                initial_investment: "1".to_string(),
                ..RentConfig::default()
            },
            ..ProjectionRequest::default()
        };
        let result = engine().project(&request).unwrap();
        assert!(result.rent[0].investment_principal >= 143_000.0);
    }

    #[test]
    fn test_deterministic() {
        let a = engine().project(&ProjectionRequest::default()).unwrap();
        let b = engine().project(&ProjectionRequest::default()).unwrap();
        assert_eq!(a, b);
    }
}
