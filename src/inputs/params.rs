//! Parsing of string inputs into typed, validated projection parameters
//!
//! All numeric parsing happens here, once, before a projection starts. The
//! engine only ever sees `BuyParams` and `RentParams`.

use super::data::{BuyConfig, DownPaymentType, RentConfig};
use crate::error::{ProjectionError, Result};
use log::warn;

/// Advisory upper bound for the mortgage rate (percent)
pub const ADVISORY_MAX_RATE: f64 = 20.0;

/// Advisory upper bound for the mortgage term (years)
pub const ADVISORY_MAX_YEARS: u32 = 50;

/// How maintenance cost is derived each year
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaintenanceMode {
    /// Annual percent of the current house value
    PercentOfValue(f64),
    /// Flat annual amount, escalated by the appreciation rate
    FlatAnnual(f64),
}

/// Typed purchase parameters. Rates are in percent, as entered.
#[derive(Debug, Clone, PartialEq)]
pub struct BuyParams {
    pub house_price: f64,
    pub down_payment: f64,
    pub mortgage_rate: f64,
    pub mortgage_years: u32,
    pub appreciation_rate: f64,
    pub annual_insurance: f64,
    pub insurance_increase_rate: f64,
    pub annual_property_tax: f64,
    pub property_tax_increase_rate: f64,
    pub monthly_hoa: f64,
    pub hoa_increase_rate: f64,
    pub buy_closing_cost_percent: f64,
    pub sell_closing_cost_percent: f64,
    pub maintenance: MaintenanceMode,
    pub federal_tax_rate: f64,
    pub state_tax_rate: f64,
}

impl BuyParams {
    /// Amount borrowed
    pub fn loan_amount(&self) -> f64 {
        self.house_price - self.down_payment
    }

    /// Closing costs paid at purchase
    pub fn buy_closing_costs(&self) -> f64 {
        self.house_price * self.buy_closing_cost_percent / 100.0
    }

    /// Cash committed at month 0: down payment plus purchase closing costs
    pub fn upfront_cash(&self) -> f64 {
        self.down_payment + self.buy_closing_costs()
    }

    /// Projection horizon in months
    pub fn total_months(&self) -> u32 {
        self.mortgage_years * 12
    }

    /// Combined marginal rate applied to deductible interest and property tax
    pub fn combined_tax_rate(&self) -> f64 {
        (self.federal_tax_rate + self.state_tax_rate) / 100.0
    }
}

/// Typed rental parameters. Rates are in percent, as entered.
#[derive(Debug, Clone, PartialEq)]
pub struct RentParams {
    pub monthly_rent: f64,
    pub rent_increase_rate: f64,
    pub annual_renters_insurance: f64,
    pub initial_investment: f64,
    pub investment_return_rate: f64,
}

/// Parse a required numeric field
pub fn parse_field(field: &'static str, value: &str) -> Result<f64> {
    let trimmed = value.trim();
    let parsed: f64 = trimmed.parse().map_err(|_| ProjectionError::Parse {
        field,
        value: value.to_string(),
    })?;

    if !parsed.is_finite() {
        return Err(ProjectionError::Parse {
            field,
            value: value.to_string(),
        });
    }

    Ok(parsed)
}

fn parse_non_negative(field: &'static str, value: &str) -> Result<f64> {
    let parsed = parse_field(field, value)?;
    if parsed < 0.0 {
        return Err(ProjectionError::degenerate(field, "must not be negative"));
    }
    Ok(parsed)
}

impl TryFrom<&BuyConfig> for BuyParams {
    type Error = ProjectionError;

    fn try_from(config: &BuyConfig) -> Result<Self> {
        let house_price = parse_field("housePrice", &config.house_price)?;
        if house_price <= 0.0 {
            return Err(ProjectionError::degenerate("housePrice", "must be greater than zero"));
        }

        let down_payment = match config.down_payment_type {
            DownPaymentType::Percent => {
                let pct = parse_non_negative("downPaymentPercent", &config.down_payment_percent)?;
                house_price * pct / 100.0
            }
            DownPaymentType::Amount => {
                parse_non_negative("downPaymentAmount", &config.down_payment_amount)?
            }
        };
        if down_payment > house_price {
            let field = match config.down_payment_type {
                DownPaymentType::Percent => "downPaymentPercent",
                DownPaymentType::Amount => "downPaymentAmount",
            };
            return Err(ProjectionError::degenerate(field, "down payment exceeds house price"));
        }

        let mortgage_rate = parse_non_negative("mortgageRate", &config.mortgage_rate)?;
        let mortgage_years = parse_years(&config.mortgage_years)?;

        if mortgage_rate > ADVISORY_MAX_RATE {
            warn!("mortgage rate {}% is above the advisory maximum of {}%", mortgage_rate, ADVISORY_MAX_RATE);
        }
        if mortgage_years > ADVISORY_MAX_YEARS {
            warn!("mortgage term {} years is above the advisory maximum of {}", mortgage_years, ADVISORY_MAX_YEARS);
        }

        let maintenance = if config.uses_maintenance_percent() {
            MaintenanceMode::PercentOfValue(parse_non_negative(
                "maintenancePercent",
                &config.maintenance_percent,
            )?)
        } else {
            MaintenanceMode::FlatAnnual(parse_non_negative(
                "maintenanceAmount",
                &config.maintenance_amount,
            )?)
        };

        Ok(Self {
            house_price,
            down_payment,
            mortgage_rate,
            mortgage_years,
            appreciation_rate: parse_growth_rate("appreciationRate", &config.appreciation_rate)?,
            annual_insurance: parse_non_negative("annualInsurance", &config.annual_insurance)?,
            insurance_increase_rate: parse_field("insuranceIncreaseRate", &config.insurance_increase_rate)?,
            annual_property_tax: parse_non_negative("propertyTax", &config.property_tax)?,
            property_tax_increase_rate: parse_field(
                "propertyTaxIncreaseRate",
                &config.property_tax_increase_rate,
            )?,
            monthly_hoa: parse_non_negative("monthlyHOA", &config.monthly_hoa)?,
            hoa_increase_rate: parse_field("hoaIncreaseRate", &config.hoa_increase_rate)?,
            buy_closing_cost_percent: parse_non_negative(
                "buyClosingCostPercent",
                &config.buy_closing_cost_percent,
            )?,
            sell_closing_cost_percent: parse_non_negative(
                "sellClosingCostPercent",
                &config.sell_closing_cost_percent,
            )?,
            maintenance,
            federal_tax_rate: parse_non_negative("federalTaxRate", &config.federal_tax_rate)?,
            state_tax_rate: parse_non_negative("stateTaxRate", &config.state_tax_rate)?,
        })
    }
}

impl TryFrom<&RentConfig> for RentParams {
    type Error = ProjectionError;

    fn try_from(config: &RentConfig) -> Result<Self> {
        Ok(Self {
            monthly_rent: parse_non_negative("monthlyRent", &config.monthly_rent)?,
            rent_increase_rate: parse_field("rentIncreaseRate", &config.rent_increase_rate)?,
            annual_renters_insurance: parse_non_negative("rentersInsurance", &config.renters_insurance)?,
            initial_investment: parse_non_negative("initialInvestment", &config.initial_investment)?,
            investment_return_rate: parse_growth_rate("investmentReturnRate", &config.investment_return_rate)?,
        })
    }
}

/// Mortgage term must be a positive whole number of years
fn parse_years(value: &str) -> Result<u32> {
    let years = parse_field("mortgageYears", value)?;
    if years <= 0.0 {
        return Err(ProjectionError::degenerate("mortgageYears", "must be at least one year"));
    }
    if years.fract() != 0.0 || years > u32::MAX as f64 / 12.0 {
        return Err(ProjectionError::degenerate("mortgageYears", "must be a whole number of years"));
    }
    Ok(years as u32)
}

/// Growth rates at or below -100% have no fractional-power monthly equivalent
fn parse_growth_rate(field: &'static str, value: &str) -> Result<f64> {
    let rate = parse_field(field, value)?;
    if rate <= -100.0 {
        return Err(ProjectionError::degenerate(field, "must be greater than -100%"));
    }
    Ok(rate)
}
