//! Cross-investment reconciliation of the buy and rent paths
//!
//! Both paths are compared on equal monthly cash outflow. Each month, the
//! cheaper path invests its saving: when buying costs more, the renter invests
//! the difference; when buying costs less, the owner does. The renter also
//! starts with the down payment and purchase closing costs invested.
//!
//! Net values and a mark-to-market capital gains settlement ("as if sold this
//! month") are then derived for every month.

use super::amortization::monthly_equivalent_rate;
use super::records::{BuyMonthRecord, RentMonthRecord};
use crate::assumptions::CapitalGainsTax;
use crate::error::{ProjectionError, Result};
use log::debug;

/// Brokerage-style account: contributed principal plus accrued interest
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InvestmentAccount {
    pub principal: f64,
    pub interest: f64,
}

impl InvestmentAccount {
    pub fn seeded(principal: f64) -> Self {
        Self {
            principal,
            interest: 0.0,
        }
    }

    pub fn value(&self) -> f64 {
        self.principal + self.interest
    }

    /// Gain over contributed principal
    pub fn gain(&self) -> f64 {
        self.interest
    }

    /// Accrue one month of growth on the current balance
    pub fn accrue(self, monthly_rate: f64) -> Self {
        Self {
            principal: self.principal,
            interest: self.interest + self.value() * monthly_rate,
        }
    }

    /// Add new principal; it first earns interest the following month
    pub fn contribute(self, amount: f64) -> Self {
        Self {
            principal: self.principal + amount,
            interest: self.interest,
        }
    }
}

/// Inputs the reconciler needs beyond the two series
#[derive(Debug, Clone)]
pub struct ReconcileTerms {
    /// Down payment plus purchase closing costs, seeded into the rent account
    pub upfront_cash: f64,
    pub house_price: f64,
    pub sell_closing_cost_percent: f64,
    /// Annual investment return (percent)
    pub investment_return_rate: f64,
    pub capital_gains: CapitalGainsTax,
}

/// Accounts carried between months
#[derive(Debug, Clone, Copy, PartialEq)]
struct Accounts {
    rent: InvestmentAccount,
    /// `None` until the first month buying is cheaper than renting
    buy: Option<InvestmentAccount>,
}

/// Where this month's cost difference goes
#[derive(Debug, Clone, Copy, PartialEq)]
enum Redirect {
    ToRent(f64),
    ToBuy(f64),
    Nothing,
}

impl Redirect {
    /// Exactly one side can receive the difference in any month
    fn for_difference(buy_total: f64, rent_total: f64) -> Self {
        let diff = buy_total - rent_total;
        if diff > 0.0 {
            Redirect::ToRent(diff)
        } else if diff < 0.0 {
            Redirect::ToBuy(-diff)
        } else {
            Redirect::Nothing
        }
    }
}

impl Accounts {
    fn step(self, redirect: Redirect, monthly_rate: f64) -> Self {
        let rent = self.rent.accrue(monthly_rate);
        let buy = self.buy.map(|acct| acct.accrue(monthly_rate));

        match redirect {
            Redirect::ToRent(amount) => Self {
                rent: rent.contribute(amount),
                buy,
            },
            Redirect::ToBuy(amount) => Self {
                rent,
                buy: Some(buy.unwrap_or_default().contribute(amount)),
            },
            Redirect::Nothing => Self { rent, buy },
        }
    }
}

/// Populate investment and net-value fields on both series in one pass.
///
/// Both series must have the same length and month numbering; misaligned
/// series are rejected rather than truncated.
pub fn reconcile(
    buy: Vec<BuyMonthRecord>,
    rent: Vec<RentMonthRecord>,
    terms: &ReconcileTerms,
) -> Result<(Vec<BuyMonthRecord>, Vec<RentMonthRecord>)> {
    if buy.len() != rent.len() {
        return Err(ProjectionError::degenerate(
            "rentData",
            format!("{} rent months against {} buy months", rent.len(), buy.len()),
        ));
    }
    if let Some((b, r)) = buy.iter().zip(&rent).find(|(b, r)| b.month != r.month) {
        return Err(ProjectionError::degenerate(
            "rentData",
            format!("rent month {} does not match buy month {}", r.month, b.month),
        ));
    }

    let monthly_rate = monthly_equivalent_rate(terms.investment_return_rate);
    let opening = Accounts {
        rent: InvestmentAccount::seeded(terms.upfront_cash),
        buy: None,
    };

    let (buy, rent): (Vec<_>, Vec<_>) = buy
        .into_iter()
        .zip(rent)
        .scan(opening, |accounts, (buy_row, rent_row)| {
            let redirect = Redirect::for_difference(buy_row.total_monthly, rent_row.total_monthly);
            let next = accounts.step(redirect, monthly_rate);

            if accounts.buy.is_none() && next.buy.is_some() {
                debug!("buy-side investing starts in month {}", buy_row.month);
            }
            *accounts = next;

            Some((
                settle_buy(buy_row, next.buy.unwrap_or_default(), redirect, terms),
                settle_rent(rent_row, next.rent, redirect, terms),
            ))
        })
        .unzip();

    Ok((buy, rent))
}

fn settle_buy(
    mut row: BuyMonthRecord,
    account: InvestmentAccount,
    redirect: Redirect,
    terms: &ReconcileTerms,
) -> BuyMonthRecord {
    row.investment_contribution = match redirect {
        Redirect::ToBuy(amount) => amount,
        _ => 0.0,
    };
    row.investment_principal = account.principal;
    row.investment_interest = account.interest;
    row.investment_value = account.value();

    row.selling_costs = row.house_value * terms.sell_closing_cost_percent / 100.0;
    row.net_value = row.equity - row.selling_costs - row.cumulative_outlay;
    row.net_value_after_deductions = row.net_value + row.cumulative_tax_savings;

    let house_gain = row.house_value - terms.house_price - row.cumulative_maintenance;
    let gain = house_gain + account.gain();
    row.capital_gains_tax = terms.capital_gains.residence_tax(gain);
    row.net_value_after_tax = row.net_value - row.capital_gains_tax;

    row
}

fn settle_rent(
    mut row: RentMonthRecord,
    account: InvestmentAccount,
    redirect: Redirect,
    terms: &ReconcileTerms,
) -> RentMonthRecord {
    row.investment_contribution = match redirect {
        Redirect::ToRent(amount) => amount,
        _ => 0.0,
    };
    row.investment_principal = account.principal;
    row.investment_interest = account.interest;
    row.investment_value = account.value();

    // Principal is capital diverted from buying; only growth counts as gain
    row.net_value = account.value() - row.cumulative_outlay - account.principal;
    row.capital_gains_tax = terms.capital_gains.investment_tax(account.gain());
    row.net_value_after_tax = row.net_value - row.capital_gains_tax;

    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn terms(rate: f64) -> ReconcileTerms {
        ReconcileTerms {
            upfront_cash: 100_000.0,
            house_price: 500_000.0,
            sell_closing_cost_percent: 6.0,
            investment_return_rate: rate,
            capital_gains: CapitalGainsTax::default(),
        }
    }

    fn series(buy_totals: &[f64], rent_totals: &[f64]) -> (Vec<BuyMonthRecord>, Vec<RentMonthRecord>) {
        let buy = buy_totals
            .iter()
            .enumerate()
            .map(|(i, &total)| {
                let mut row = BuyMonthRecord::new(i as u32 + 1);
                row.total_monthly = total;
                row.house_value = 500_000.0;
                row
            })
            .collect();
        let rent = rent_totals
            .iter()
            .enumerate()
            .map(|(i, &total)| {
                let mut row = RentMonthRecord::new(i as u32 + 1);
                row.total_monthly = total;
                row
            })
            .collect();
        (buy, rent)
    }

    #[test]
    fn test_account_contribution_earns_from_next_month() {
        let acct = InvestmentAccount::seeded(0.0).accrue(0.01).contribute(1000.0);
        assert_eq!(acct.interest, 0.0);
        let acct = acct.accrue(0.01);
        assert_relative_eq!(acct.interest, 10.0, epsilon = 1e-9);
        assert_relative_eq!(acct.value(), 1010.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rent_side_seeded_and_compounds() {
        let (buy, rent) = series(&[2000.0; 12], &[2000.0; 12]);
        let (_, rent) = reconcile(buy, rent, &terms(12.0)).unwrap();

        assert_eq!(rent[0].investment_principal, 100_000.0);
        // Compounds to exactly one year of 12% growth
        assert_relative_eq!(rent[11].investment_value, 112_000.0, epsilon = 1e-6);
        assert_relative_eq!(rent[11].investment_interest, 12_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_difference_goes_to_rent_when_buying_costs_more() {
        let (buy, rent) = series(&[3000.0, 3000.0], &[2000.0, 2000.0]);
        let (buy, rent) = reconcile(buy, rent, &terms(0.0)).unwrap();

        assert_eq!(rent[0].investment_contribution, 1000.0);
        assert_eq!(rent[1].investment_principal, 102_000.0);
        assert_eq!(buy[1].investment_value, 0.0);
        assert_eq!(buy[1].investment_contribution, 0.0);
    }

    #[test]
    fn test_buy_pool_starts_at_first_cheaper_month() {
        let (buy, rent) = series(&[3000.0, 1500.0, 2500.0, 1000.0], &[2000.0; 4]);
        let (buy, rent) = reconcile(buy, rent, &terms(12.0)).unwrap();

        assert_eq!(buy[0].investment_value, 0.0);
        assert_eq!(buy[1].investment_principal, 500.0);
        assert_eq!(buy[1].investment_interest, 0.0);

        // Month 3: buy pool compounds even though the renter receives the difference
        let r = monthly_equivalent_rate(12.0);
        assert_relative_eq!(buy[2].investment_interest, 500.0 * r, epsilon = 1e-9);
        assert_eq!(buy[2].investment_principal, 500.0);
        assert_eq!(rent[2].investment_contribution, 500.0);

        assert_eq!(buy[3].investment_principal, 1500.0);
    }

    #[test]
    fn test_misaligned_series_rejected() {
        let (buy, rent) = series(&[2000.0; 3], &[2000.0; 2]);
        let err = reconcile(buy, rent, &terms(7.0)).unwrap_err();
        assert_eq!(err.field(), "rentData");

        let (buy, mut rent) = series(&[2000.0; 2], &[2000.0; 2]);
        rent[1].month = 5;
        assert!(reconcile(buy, rent, &terms(7.0)).is_err());
    }

    #[test]
    fn test_equal_costs_redirect_nothing() {
        assert_eq!(Redirect::for_difference(2000.0, 2000.0), Redirect::Nothing);
        assert_eq!(Redirect::for_difference(2500.0, 2000.0), Redirect::ToRent(500.0));
        assert_eq!(Redirect::for_difference(1500.0, 2000.0), Redirect::ToBuy(500.0));
    }

    #[test]
    fn test_rent_net_value_counts_only_growth() {
        let (buy, rent) = series(&[2000.0], &[2000.0]);
        let (_, rent) = reconcile(buy, rent, &terms(12.0)).unwrap();

        let row = &rent[0];
        assert_relative_eq!(row.net_value, row.investment_interest - row.cumulative_outlay, epsilon = 1e-9);
        assert_relative_eq!(row.capital_gains_tax, row.investment_interest * 0.15, epsilon = 1e-9);
        assert_relative_eq!(row.net_value_after_tax, row.net_value - row.capital_gains_tax, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_return_gives_negative_rent_tax() {
        let (buy, rent) = series(&[2000.0; 12], &[2000.0; 12]);
        let (_, rent) = reconcile(buy, rent, &terms(-10.0)).unwrap();

        // One year at -10% on the 100k seed
        let row = &rent[11];
        assert_relative_eq!(row.investment_interest, -10_000.0, epsilon = 1e-6);
        assert_relative_eq!(row.capital_gains_tax, -1_500.0, epsilon = 1e-6);
        assert_relative_eq!(row.net_value_after_tax, row.net_value + 1_500.0, epsilon = 1e-6);
    }

    #[test]
    fn test_buy_capital_gains_exclusion() {
        let (mut buy, rent) = series(&[2000.0, 2000.0], &[2000.0, 2000.0]);
        buy[0].house_value = 700_000.0;
        buy[0].cumulative_maintenance = 10_000.0;
        buy[1].house_value = 900_000.0;
        buy[1].cumulative_maintenance = 20_000.0;

        let (buy, _) = reconcile(buy, rent, &terms(0.0)).unwrap();

        // 190k gain sits inside the exclusion
        assert_eq!(buy[0].capital_gains_tax, 0.0);
        // 380k gain: 130k taxable at 15%
        assert_relative_eq!(buy[1].capital_gains_tax, 19_500.0, epsilon = 1e-6);
        assert_relative_eq!(buy[1].selling_costs, 54_000.0, epsilon = 1e-6);
    }
}
