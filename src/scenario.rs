//! Scenario runner for batch projections
//!
//! Each run is independent, so batches are projected in parallel.

use crate::assumptions::Assumptions;
use crate::error::Result;
use crate::projection::{ProjectionEngine, ProjectionRequest, ProjectionResult};
use log::info;
use rayon::prelude::*;

/// Runs many projections against one set of assumptions
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
///
/// for (rate, result) in runner.sweep_mortgage_rates(&request, &[5.5, 6.5, 7.5]) {
///     let summary = result?.summary();
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with default assumptions
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            engine: ProjectionEngine::new(assumptions),
        }
    }

    /// Run a single projection
    pub fn run(&self, request: &ProjectionRequest) -> Result<ProjectionResult> {
        self.engine.project(request)
    }

    /// Run independent requests in parallel; results keep the input order
    pub fn run_batch(&self, requests: &[ProjectionRequest]) -> Vec<Result<ProjectionResult>> {
        info!("running {} scenarios", requests.len());
        requests.par_iter().map(|r| self.engine.project(r)).collect()
    }

    /// Re-run one request at each mortgage rate (percent)
    pub fn sweep_mortgage_rates(
        &self,
        request: &ProjectionRequest,
        rates: &[f64],
    ) -> Vec<(f64, Result<ProjectionResult>)> {
        let requests: Vec<ProjectionRequest> = rates
            .iter()
            .map(|rate| {
                let mut r = request.clone();
                r.buy_config.mortgage_rate = rate.to_string();
                r
            })
            .collect();

        rates.iter().copied().zip(self.run_batch(&requests)).collect()
    }

    pub fn assumptions(&self) -> &Assumptions {
        self.engine.assumptions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{BuyConfig, RentConfig};

    #[test]
    fn test_sweep_orders_by_rate() {
        let runner = ScenarioRunner::new();
        let request = ProjectionRequest::default();

        let results = runner.sweep_mortgage_rates(&request, &[5.0, 6.0, 7.0]);
        assert_eq!(results.len(), 3);

        let payments: Vec<f64> = results
            .iter()
            .map(|(_, r)| r.as_ref().unwrap().summary().monthly_payment)
            .collect();

        // Higher mortgage rate means a higher payment
        assert!(payments[0] < payments[1] && payments[1] < payments[2]);
        assert_eq!(results[1].0, 6.0);
    }

    #[test]
    fn test_batch_keeps_errors_per_request() {
        let runner = ScenarioRunner::new();
        let bad = ProjectionRequest::new(
            BuyConfig {
                house_price: "-1".to_string(),
                ..BuyConfig::default()
            },
            RentConfig::default(),
        );

        let results = runner.run_batch(&[ProjectionRequest::default(), bad]);
        assert!(results[0].is_ok());
        assert_eq!(results[1].as_ref().unwrap_err().field(), "housePrice");
    }

    #[test]
    fn test_batch_matches_single_runs() {
        let runner = ScenarioRunner::new();
        let request = ProjectionRequest::default();

        let single = runner.run(&request).unwrap();
        let batch = runner.run_batch(&[request.clone(), request]);
        for result in batch {
            assert_eq!(result.unwrap(), single);
        }
    }
}
