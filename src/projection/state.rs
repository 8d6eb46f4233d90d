//! Month-to-month accumulator state for the buy and rent paths
//!
//! Each state is immutable: `step` consumes the month's terms and returns the
//! next state together with the record emitted for that month.

use super::amortization::{monthly_payment, monthly_rate, split_payment};
use super::records::{BuyMonthRecord, RentMonthRecord};
use crate::assumptions::PmiSchedule;
use crate::inputs::{BuyParams, MaintenanceMode, RentParams};

/// House value `month_in_year` months into a year that started at `year_start`.
///
/// Compounds as `year_start · (1+a)^(k/12)`, so the value after 12 steps is
/// exactly `year_start · (1+a)` and no drift accumulates across years. The
/// flat `a/12`-per-month formulation overstates the annual rate and is not
/// used.
pub fn appreciated_value(year_start: f64, annual_rate_pct: f64, month_in_year: u32) -> f64 {
    let growth = 1.0 + annual_rate_pct / 100.0;
    year_start * growth.powf(month_in_year as f64 / 12.0)
}

/// Fixed terms of the purchase path, derived once from `BuyParams`
#[derive(Debug, Clone)]
pub struct BuyTerms {
    pub payment: f64,
    pub monthly_rate: f64,
    pub appreciation_rate: f64,
    pub insurance_increase_rate: f64,
    pub property_tax_increase_rate: f64,
    pub hoa_increase_rate: f64,
    pub maintenance: MaintenanceMode,
    pub combined_tax_rate: f64,
    pub pmi: PmiSchedule,
}

impl BuyTerms {
    pub fn new(params: &BuyParams, pmi: PmiSchedule) -> Self {
        Self {
            payment: monthly_payment(
                params.loan_amount(),
                params.mortgage_rate,
                params.mortgage_years as f64,
            ),
            monthly_rate: monthly_rate(params.mortgage_rate),
            appreciation_rate: params.appreciation_rate,
            insurance_increase_rate: params.insurance_increase_rate,
            property_tax_increase_rate: params.property_tax_increase_rate,
            hoa_increase_rate: params.hoa_increase_rate,
            maintenance: params.maintenance,
            combined_tax_rate: params.combined_tax_rate(),
            pmi,
        }
    }
}

/// State of the purchase path at the start of a month
#[derive(Debug, Clone, PartialEq)]
pub struct BuyState {
    /// Zero-based index of the month about to be projected
    pub month_index: u32,

    /// Outstanding loan balance
    pub principal: f64,

    /// House value at the start of the current year
    pub year_start_value: f64,

    /// Most recent house value
    pub house_value: f64,

    // Current monthly cost levels
    pub insurance: f64,
    pub property_tax: f64,
    pub hoa: f64,
    pub maintenance: f64,

    pub cumulative_outlay: f64,
    pub cumulative_maintenance: f64,
    pub cumulative_tax_savings: f64,
}

impl BuyState {
    /// Opening state at purchase. Down payment and closing costs are sunk at month 0.
    pub fn at_purchase(params: &BuyParams) -> Self {
        let maintenance = match params.maintenance {
            MaintenanceMode::PercentOfValue(pct) => params.house_price * pct / 100.0 / 12.0,
            MaintenanceMode::FlatAnnual(amount) => amount / 12.0,
        };

        Self {
            month_index: 0,
            principal: params.loan_amount(),
            year_start_value: params.house_price,
            house_value: params.house_price,
            insurance: params.annual_insurance / 12.0,
            property_tax: params.annual_property_tax / 12.0,
            hoa: params.monthly_hoa,
            maintenance,
            cumulative_outlay: params.upfront_cash(),
            cumulative_maintenance: 0.0,
            cumulative_tax_savings: 0.0,
        }
    }

    /// Project one month
    pub fn step(&self, terms: &BuyTerms) -> (BuyState, BuyMonthRecord) {
        let month_in_year = self.month_index % 12 + 1;

        let split = split_payment(self.principal, terms.monthly_rate, terms.payment);

        // LTV against the value before this month's appreciation
        let pmi = terms.pmi.monthly_premium(self.principal, self.house_value);

        let house_value = appreciated_value(self.year_start_value, terms.appreciation_rate, month_in_year);
        let year_start_value = if month_in_year == 12 {
            self.year_start_value * (1.0 + terms.appreciation_rate / 100.0)
        } else {
            self.year_start_value
        };

        let tax_savings = (split.interest + self.property_tax) * terms.combined_tax_rate;
        let cumulative_tax_savings = self.cumulative_tax_savings + tax_savings;

        let (insurance, property_tax, hoa, maintenance) =
            if self.month_index > 0 && self.month_index % 12 == 0 {
                let maintenance = match terms.maintenance {
                    MaintenanceMode::PercentOfValue(pct) => house_value * pct / 100.0 / 12.0,
                    MaintenanceMode::FlatAnnual(_) => {
                        self.maintenance * (1.0 + terms.appreciation_rate / 100.0)
                    }
                };
                (
                    self.insurance * (1.0 + terms.insurance_increase_rate / 100.0),
                    self.property_tax * (1.0 + terms.property_tax_increase_rate / 100.0),
                    self.hoa * (1.0 + terms.hoa_increase_rate / 100.0),
                    maintenance,
                )
            } else {
                (self.insurance, self.property_tax, self.hoa, self.maintenance)
            };

        let total_monthly = terms.payment + pmi + insurance + property_tax + hoa + maintenance;
        let cumulative_outlay = self.cumulative_outlay + total_monthly;
        let cumulative_maintenance = self.cumulative_maintenance + maintenance;

        let remaining_principal = self.principal - split.principal;

        let mut row = BuyMonthRecord::new(self.month_index + 1);
        row.house_value = house_value;
        row.opening_principal = self.principal;
        row.remaining_principal = remaining_principal;
        row.payment = terms.payment;
        row.principal_paid = split.principal;
        row.interest_paid = split.interest;
        row.pmi = pmi;
        row.insurance = insurance;
        row.property_tax = property_tax;
        row.hoa = hoa;
        row.maintenance = maintenance;
        row.total_monthly = total_monthly;
        row.equity = house_value - remaining_principal;
        row.cumulative_outlay = cumulative_outlay;
        row.cumulative_maintenance = cumulative_maintenance;
        row.tax_savings = tax_savings;
        row.cumulative_tax_savings = cumulative_tax_savings;

        let next = BuyState {
            month_index: self.month_index + 1,
            principal: remaining_principal,
            year_start_value,
            house_value,
            insurance,
            property_tax,
            hoa,
            maintenance,
            cumulative_outlay,
            cumulative_maintenance,
            cumulative_tax_savings,
        };

        (next, row)
    }
}

/// State of the rental path at the start of a month
#[derive(Debug, Clone, PartialEq)]
pub struct RentState {
    pub month_index: u32,
    pub rent: f64,
    pub insurance: f64,
    pub cumulative_outlay: f64,
}

impl RentState {
    pub fn at_start(params: &RentParams) -> Self {
        Self {
            month_index: 0,
            rent: params.monthly_rent,
            insurance: params.annual_renters_insurance / 12.0,
            cumulative_outlay: 0.0,
        }
    }

    /// Project one month. Renter's insurance escalates with the rent.
    pub fn step(&self, rent_increase_rate: f64) -> (RentState, RentMonthRecord) {
        let (rent, insurance) = if self.month_index > 0 && self.month_index % 12 == 0 {
            let factor = 1.0 + rent_increase_rate / 100.0;
            (self.rent * factor, self.insurance * factor)
        } else {
            (self.rent, self.insurance)
        };

        let total_monthly = rent + insurance;
        let cumulative_outlay = self.cumulative_outlay + total_monthly;

        let mut row = RentMonthRecord::new(self.month_index + 1);
        row.rent = rent;
        row.insurance = insurance;
        row.total_monthly = total_monthly;
        row.cumulative_outlay = cumulative_outlay;

        let next = RentState {
            month_index: self.month_index + 1,
            rent,
            insurance,
            cumulative_outlay,
        };

        (next, row)
    }
}
