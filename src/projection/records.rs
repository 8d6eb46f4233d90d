//! Monthly output records for the buy and rent paths

use serde::{Deserialize, Serialize};

/// One month of the purchase path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyMonthRecord {
    // Timing
    pub month: u32,
    pub year: u32,
    pub month_in_year: u32,

    // House and loan
    pub house_value: f64,
    pub opening_principal: f64,
    pub remaining_principal: f64,
    pub payment: f64,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub pmi: f64,

    // Holding costs (monthly amounts)
    pub insurance: f64,
    pub property_tax: f64,
    pub hoa: f64,
    pub maintenance: f64,
    pub total_monthly: f64,

    pub equity: f64,
    pub cumulative_outlay: f64,
    pub cumulative_maintenance: f64,

    // Interest and property tax deduction
    pub tax_savings: f64,
    pub cumulative_tax_savings: f64,

    // Surplus investing, filled by the reconciler
    pub investment_contribution: f64,
    pub investment_principal: f64,
    pub investment_interest: f64,
    pub investment_value: f64,

    // Net worth, filled by the reconciler
    pub selling_costs: f64,
    pub net_value: f64,
    pub net_value_after_deductions: f64,
    pub capital_gains_tax: f64,
    pub net_value_after_tax: f64,
}

impl BuyMonthRecord {
    /// Create a record for a 1-indexed month with all amounts zeroed
    pub fn new(month: u32) -> Self {
        Self {
            month,
            year: (month - 1) / 12 + 1,
            month_in_year: (month - 1) % 12 + 1,
            house_value: 0.0,
            opening_principal: 0.0,
            remaining_principal: 0.0,
            payment: 0.0,
            principal_paid: 0.0,
            interest_paid: 0.0,
            pmi: 0.0,
            insurance: 0.0,
            property_tax: 0.0,
            hoa: 0.0,
            maintenance: 0.0,
            total_monthly: 0.0,
            equity: 0.0,
            cumulative_outlay: 0.0,
            cumulative_maintenance: 0.0,
            tax_savings: 0.0,
            cumulative_tax_savings: 0.0,
            investment_contribution: 0.0,
            investment_principal: 0.0,
            investment_interest: 0.0,
            investment_value: 0.0,
            selling_costs: 0.0,
            net_value: 0.0,
            net_value_after_deductions: 0.0,
            capital_gains_tax: 0.0,
            net_value_after_tax: 0.0,
        }
    }
}

/// One month of the rental path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentMonthRecord {
    pub month: u32,
    pub year: u32,
    pub month_in_year: u32,

    pub rent: f64,
    pub insurance: f64,
    pub total_monthly: f64,
    pub cumulative_outlay: f64,

    pub investment_contribution: f64,
    pub investment_principal: f64,
    pub investment_interest: f64,
    pub investment_value: f64,

    pub net_value: f64,
    pub capital_gains_tax: f64,
    pub net_value_after_tax: f64,
}

impl RentMonthRecord {
    pub fn new(month: u32) -> Self {
        Self {
            month,
            year: (month - 1) / 12 + 1,
            month_in_year: (month - 1) % 12 + 1,
            rent: 0.0,
            insurance: 0.0,
            total_monthly: 0.0,
            cumulative_outlay: 0.0,
            investment_contribution: 0.0,
            investment_principal: 0.0,
            investment_interest: 0.0,
            investment_value: 0.0,
            net_value: 0.0,
            capital_gains_tax: 0.0,
            net_value_after_tax: 0.0,
        }
    }
}

/// Which path's investment account received the monthly cost difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContributionSide {
    Buy,
    Rent,
    Neither,
}

/// Complete projection result: two index-aligned monthly series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    #[serde(rename = "buyData")]
    pub buy: Vec<BuyMonthRecord>,

    #[serde(rename = "rentData")]
    pub rent: Vec<RentMonthRecord>,
}

impl ProjectionResult {
    /// Number of projected months
    pub fn months(&self) -> usize {
        self.buy.len()
    }

    /// Iterate both series month by month
    pub fn rows(&self) -> impl Iterator<Item = (&BuyMonthRecord, &RentMonthRecord)> {
        self.buy.iter().zip(self.rent.iter())
    }

    /// First month of each year, for year-granularity views
    pub fn yearly_rows(&self) -> impl Iterator<Item = (&BuyMonthRecord, &RentMonthRecord)> {
        self.rows().step_by(12)
    }

    /// Which side received a contribution in a given 1-indexed month
    pub fn contribution_side(&self, month: u32) -> Option<ContributionSide> {
        let idx = month.checked_sub(1)? as usize;
        let buy = self.buy.get(idx)?;
        let rent = self.rent.get(idx)?;
        Some(if buy.investment_contribution > 0.0 {
            ContributionSide::Buy
        } else if rent.investment_contribution > 0.0 {
            ContributionSide::Rent
        } else {
            ContributionSide::Neither
        })
    }

    /// First month in which buying was cheaper than renting
    pub fn buy_investment_start_month(&self) -> Option<u32> {
        self.buy
            .iter()
            .find(|r| r.investment_contribution > 0.0)
            .map(|r| r.month)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_interest: f64 = self.buy.iter().map(|r| r.interest_paid).sum();
        let total_principal: f64 = self.buy.iter().map(|r| r.principal_paid).sum();
        let total_pmi: f64 = self.buy.iter().map(|r| r.pmi).sum();
        let total_rent: f64 = self.rent.iter().map(|r| r.rent).sum();

        let last_buy = self.buy.last();
        let last_rent = self.rent.last();

        ProjectionSummary {
            total_months: self.months() as u32,
            monthly_payment: self.buy.first().map(|r| r.payment).unwrap_or(0.0),
            total_interest,
            total_principal,
            total_pmi,
            total_rent,
            total_tax_savings: last_buy.map(|r| r.cumulative_tax_savings).unwrap_or(0.0),
            final_house_value: last_buy.map(|r| r.house_value).unwrap_or(0.0),
            final_equity: last_buy.map(|r| r.equity).unwrap_or(0.0),
            final_buy_outlay: last_buy.map(|r| r.cumulative_outlay).unwrap_or(0.0),
            final_rent_outlay: last_rent.map(|r| r.cumulative_outlay).unwrap_or(0.0),
            final_buy_investment: last_buy.map(|r| r.investment_value).unwrap_or(0.0),
            final_rent_investment: last_rent.map(|r| r.investment_value).unwrap_or(0.0),
            final_buy_net_after_tax: last_buy.map(|r| r.net_value_after_tax).unwrap_or(0.0),
            final_rent_net_after_tax: last_rent.map(|r| r.net_value_after_tax).unwrap_or(0.0),
            buy_investment_start_month: self.buy_investment_start_month(),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_principal: f64,
    pub total_pmi: f64,
    pub total_rent: f64,
    pub total_tax_savings: f64,
    pub final_house_value: f64,
    pub final_equity: f64,
    pub final_buy_outlay: f64,
    pub final_rent_outlay: f64,
    pub final_buy_investment: f64,
    pub final_rent_investment: f64,
    pub final_buy_net_after_tax: f64,
    pub final_rent_net_after_tax: f64,
    pub buy_investment_start_month: Option<u32>,
}
