//! Buy-versus-rent verdicts derived from a finished projection

use super::records::ProjectionResult;
use serde::{Deserialize, Serialize};

/// Which net-value measure to compare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NetMeasure {
    /// After capital gains tax on a sale this month
    #[default]
    AfterTax,
    /// Before sale, including accumulated deduction savings on the buy side
    AfterDeductions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Buy,
    Rent,
    Even,
}

/// Month-by-month comparison of the two paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub measure: NetMeasure,

    /// Buy net value minus rent net value, one entry per month
    pub advantage: Vec<f64>,

    /// First month from which buying stays ahead through the horizon
    pub break_even_month: Option<u32>,

    pub final_verdict: Verdict,
}

impl Comparison {
    pub fn new(result: &ProjectionResult, measure: NetMeasure) -> Self {
        let advantage: Vec<f64> = result
            .rows()
            .map(|(buy, rent)| match measure {
                NetMeasure::AfterTax => buy.net_value_after_tax - rent.net_value_after_tax,
                NetMeasure::AfterDeductions => buy.net_value_after_deductions - rent.net_value,
            })
            .collect();

        let trailing_ahead = advantage.iter().rev().take_while(|&&a| a >= 0.0).count();
        let break_even_month = if trailing_ahead == 0 {
            None
        } else {
            Some((advantage.len() - trailing_ahead) as u32 + 1)
        };

        let final_verdict = advantage.last().map_or(Verdict::Even, |&a| verdict_for(a));

        Self {
            measure,
            advantage,
            break_even_month,
            final_verdict,
        }
    }

    /// Verdict as of a 1-indexed month
    pub fn verdict_at(&self, month: u32) -> Option<Verdict> {
        let idx = month.checked_sub(1)? as usize;
        self.advantage.get(idx).map(|&a| verdict_for(a))
    }
}

fn verdict_for(advantage: f64) -> Verdict {
    if advantage > 0.0 {
        Verdict::Buy
    } else if advantage < 0.0 {
        Verdict::Rent
    } else {
        Verdict::Even
    }
}
