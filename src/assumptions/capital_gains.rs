//! Capital gains tax on a hypothetical sale or liquidation

use serde::{Deserialize, Serialize};

/// Flat-rate capital gains treatment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapitalGainsTax {
    /// Tax rate applied to taxable gains
    pub rate: f64,

    /// Gain excluded from tax on sale of a primary residence
    pub primary_residence_exclusion: f64,
}

impl Default for CapitalGainsTax {
    fn default() -> Self {
        Self {
            rate: 0.15,
            primary_residence_exclusion: 250_000.0,
        }
    }
}

impl CapitalGainsTax {
    /// Tax owed on the sale of a primary residence (exclusion applies)
    pub fn residence_tax(&self, gain: f64) -> f64 {
        (gain - self.primary_residence_exclusion).max(0.0) * self.rate
    }

    /// Tax on liquidating an investment account. A loss yields a negative
    /// figure, which raises the after-tax net value.
    pub fn investment_tax(&self, gain: f64) -> f64 {
        gain * self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_residence_exclusion() {
        let cgt = CapitalGainsTax::default();
        assert_eq!(cgt.residence_tax(200_000.0), 0.0);
        assert_relative_eq!(cgt.residence_tax(350_000.0), 15_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_investment_gain_has_no_exclusion() {
        let cgt = CapitalGainsTax::default();
        assert_relative_eq!(cgt.investment_tax(10_000.0), 1_500.0, epsilon = 1e-9);
        assert_relative_eq!(cgt.investment_tax(-500.0), -75.0, epsilon = 1e-9);
    }
}
