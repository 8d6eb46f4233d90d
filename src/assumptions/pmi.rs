//! Private mortgage insurance

use serde::{Deserialize, Serialize};

/// PMI charged while the loan-to-value ratio is above a threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PmiSchedule {
    /// LTV above which PMI is charged (0.80 = 80%)
    pub ltv_threshold: f64,

    /// Annual premium as a fraction of the outstanding balance
    pub annual_rate: f64,
}

impl Default for PmiSchedule {
    fn default() -> Self {
        Self {
            ltv_threshold: 0.80,
            annual_rate: 0.0075,
        }
    }
}

impl PmiSchedule {
    /// Monthly PMI for a balance against the current house value
    pub fn monthly_premium(&self, balance: f64, house_value: f64) -> f64 {
        if house_value <= 0.0 {
            return 0.0;
        }
        if balance / house_value > self.ltv_threshold {
            balance * self.annual_rate / 12.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pmi_above_threshold() {
        let pmi = PmiSchedule::default();
        assert_relative_eq!(pmi.monthly_premium(540_000.0, 600_000.0), 337.5, epsilon = 1e-9);
    }

    #[test]
    fn test_no_pmi_at_exactly_80_percent() {
        let pmi = PmiSchedule::default();
        assert_eq!(pmi.monthly_premium(520_000.0, 650_000.0), 0.0);
        assert_eq!(pmi.monthly_premium(100.0, 0.0), 0.0);
    }
}
