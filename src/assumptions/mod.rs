//! Market and tax assumptions that are not part of a user's scenario inputs

mod pmi;
mod capital_gains;

pub use pmi::PmiSchedule;
pub use capital_gains::CapitalGainsTax;

use serde::{Deserialize, Serialize};

/// Container for all projection assumptions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Assumptions {
    pub pmi: PmiSchedule,
    pub capital_gains: CapitalGainsTax,
}

impl Assumptions {
    /// US defaults: PMI of 0.75%/yr above 80% LTV, 15% long-term gains
    /// rate with a $250,000 primary residence exclusion
    pub fn us_default() -> Self {
        Self::default()
    }
}
