//! Raw scenario inputs, kept as decimal strings exactly as a form supplies them

use serde::{Deserialize, Serialize};

/// Which down payment field the user entered; the other one is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownPaymentType {
    /// `down_payment_percent` is authoritative
    #[default]
    Percent,
    /// `down_payment_amount` is authoritative
    Amount,
}

/// Purchase side of a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyConfig {
    /// Purchase price of the home
    pub house_price: String,

    /// Which down payment field is authoritative
    #[serde(default)]
    pub down_payment_type: DownPaymentType,

    /// Down payment as a percent of the house price
    #[serde(default)]
    pub down_payment_percent: String,

    /// Down payment as an absolute amount
    #[serde(default)]
    pub down_payment_amount: String,

    /// Mortgage annual interest rate (percent)
    pub mortgage_rate: String,

    /// Mortgage term in years; also sets the projection horizon
    pub mortgage_years: String,

    /// Informational only, not used by the engine
    #[serde(default)]
    pub zipcode: String,

    /// Annual house price appreciation (percent)
    pub appreciation_rate: String,

    /// Annual homeowner's insurance premium
    pub annual_insurance: String,
    pub insurance_increase_rate: String,

    /// Annual property tax
    pub property_tax: String,
    pub property_tax_increase_rate: String,

    #[serde(rename = "monthlyHOA")]
    pub monthly_hoa: String,
    pub hoa_increase_rate: String,

    /// Closing costs paid at purchase (percent of price)
    pub buy_closing_cost_percent: String,

    /// Closing costs paid at sale (percent of value at sale)
    pub sell_closing_cost_percent: String,

    /// Annual maintenance as a percent of current house value.
    /// Leave empty to use `maintenance_amount` instead.
    #[serde(default)]
    pub maintenance_percent: String,

    /// Flat annual maintenance, escalated with appreciation
    #[serde(default)]
    pub maintenance_amount: String,

    pub federal_tax_rate: String,
    pub state_tax_rate: String,
}

impl Default for BuyConfig {
    fn default() -> Self {
        Self {
            house_price: "650000".to_string(),
            down_payment_type: DownPaymentType::Percent,
            down_payment_percent: "20".to_string(),
            down_payment_amount: "130000".to_string(),
            mortgage_rate: "6.5".to_string(),
            mortgage_years: "30".to_string(),
            zipcode: "92101".to_string(),
            appreciation_rate: "3".to_string(),
            annual_insurance: "2000".to_string(),
            insurance_increase_rate: "3".to_string(),
            property_tax: "7150".to_string(),
            property_tax_increase_rate: "2".to_string(),
            monthly_hoa: "600".to_string(),
            hoa_increase_rate: "3".to_string(),
            buy_closing_cost_percent: "2".to_string(),
            sell_closing_cost_percent: "8".to_string(),
            maintenance_percent: "1".to_string(),
            maintenance_amount: "6500".to_string(),
            federal_tax_rate: "18".to_string(),
            state_tax_rate: "7".to_string(),
        }
    }
}

impl BuyConfig {
    /// Set the down payment as a percent and refresh the derived amount
    pub fn set_down_payment_percent(&mut self, percent: f64) {
        self.down_payment_type = DownPaymentType::Percent;
        self.down_payment_percent = percent.to_string();
        if let Ok(price) = self.house_price.trim().parse::<f64>() {
            self.down_payment_amount = (price * percent / 100.0).to_string();
        }
    }

    /// Set the down payment as an amount and refresh the derived percent
    pub fn set_down_payment_amount(&mut self, amount: f64) {
        self.down_payment_type = DownPaymentType::Amount;
        self.down_payment_amount = amount.to_string();
        if let Ok(price) = self.house_price.trim().parse::<f64>() {
            if price > 0.0 {
                self.down_payment_percent = (amount / price * 100.0).to_string();
            }
        }
    }

    /// Whether maintenance is a percent of value (as opposed to a flat amount)
    pub fn uses_maintenance_percent(&self) -> bool {
        !self.maintenance_percent.trim().is_empty()
    }
}

/// Rental side of a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentConfig {
    pub monthly_rent: String,

    /// Annual rent increase (percent); renter's insurance escalates at the same rate
    pub rent_increase_rate: String,

    /// Annual renter's insurance premium
    pub renters_insurance: String,

    /// Capital the renter keeps invested instead of buying
    /// (down payment plus purchase closing costs)
    pub initial_investment: String,

    /// Annual return on invested capital (percent)
    pub investment_return_rate: String,
}

impl Default for RentConfig {
    fn default() -> Self {
        Self::for_buy(&BuyConfig::default())
    }
}

impl RentConfig {
    /// Default rental inputs with the initial investment derived from `buy`
    pub fn for_buy(buy: &BuyConfig) -> Self {
        let initial = initial_investment_for(buy).unwrap_or(0.0);
        Self {
            monthly_rent: "3250".to_string(),
            rent_increase_rate: "5".to_string(),
            renters_insurance: "200".to_string(),
            initial_investment: initial.to_string(),
            investment_return_rate: "7".to_string(),
        }
    }
}

/// Down payment plus purchase closing costs, if the buy inputs are numeric
pub fn initial_investment_for(buy: &BuyConfig) -> Option<f64> {
    let price: f64 = buy.house_price.trim().parse().ok()?;
    let closing: f64 = buy.buy_closing_cost_percent.trim().parse().ok()?;
    let down = match buy.down_payment_type {
        DownPaymentType::Percent => {
            price * buy.down_payment_percent.trim().parse::<f64>().ok()? / 100.0
        }
        DownPaymentType::Amount => buy.down_payment_amount.trim().parse().ok()?,
    };
    Some(down + price * closing / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_initial_investment() {
        let rent = RentConfig::default();
        assert_eq!(rent.initial_investment, "143000");
    }

    #[test]
    fn test_down_payment_derivation() {
        let mut buy = BuyConfig::default();
        buy.set_down_payment_amount(65_000.0);
        assert_eq!(buy.down_payment_type, DownPaymentType::Amount);
        assert_eq!(buy.down_payment_percent, "10");

        buy.set_down_payment_percent(25.0);
        assert_eq!(buy.down_payment_amount, "162500");
    }

    #[test]
    fn test_camel_case_field_names() {
        let json = serde_json::to_value(BuyConfig::default()).unwrap();
        assert_eq!(json["housePrice"], "650000");
        assert_eq!(json["monthlyHOA"], "600");
        assert_eq!(json["downPaymentType"], "percent");
    }
}
