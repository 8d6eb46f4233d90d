//! CSV export of a finished projection
//!
//! One row per month (or per year, taking the first month of each year),
//! with a human label column and the buy and rent fields side by side.

use crate::projection::{BuyMonthRecord, ProjectionResult, RentMonthRecord};
use std::io::Write;

/// Row granularity of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    Month,
    #[default]
    Year,
}

const HEADER: [&str; 24] = [
    "Period",
    "House Value",
    "Remaining Principal",
    "Equity",
    "Mortgage Payment",
    "PMI",
    "Total Monthly (Buy)",
    "Cumulative Total (Buy)",
    "Cumulative Tax Savings",
    "Buy Investment Value",
    "Net Value (Buy)",
    "Net Value After Deductions",
    "Capital Gains Tax (Buy)",
    "Net Value After Tax (Buy)",
    "Rent",
    "Total Monthly (Rent)",
    "Cumulative Total (Rent)",
    "Investment Principal",
    "Investment Interest",
    "Investment Total",
    "Net Value (Rent)",
    "Capital Gains Tax (Rent)",
    "Net Value After Tax (Rent)",
    "Buy vs Rent",
];

/// Label for a row: `Year N` or `Month N`
pub fn period_label(granularity: Granularity, buy: &BuyMonthRecord) -> String {
    match granularity {
        Granularity::Month => format!("Month {}", buy.month),
        Granularity::Year => format!("Year {}", buy.year),
    }
}

fn record(granularity: Granularity, buy: &BuyMonthRecord, rent: &RentMonthRecord) -> Vec<String> {
    let money = |v: f64| format!("{:.2}", v);
    vec![
        period_label(granularity, buy),
        money(buy.house_value),
        money(buy.remaining_principal),
        money(buy.equity),
        money(buy.payment),
        money(buy.pmi),
        money(buy.total_monthly),
        money(buy.cumulative_outlay),
        money(buy.cumulative_tax_savings),
        money(buy.investment_value),
        money(buy.net_value),
        money(buy.net_value_after_deductions),
        money(buy.capital_gains_tax),
        money(buy.net_value_after_tax),
        money(rent.rent),
        money(rent.total_monthly),
        money(rent.cumulative_outlay),
        money(rent.investment_principal),
        money(rent.investment_interest),
        money(rent.investment_value),
        money(rent.net_value),
        money(rent.capital_gains_tax),
        money(rent.net_value_after_tax),
        money(buy.net_value_after_tax - rent.net_value_after_tax),
    ]
}

/// Write a projection as CSV
pub fn write_csv<W: Write>(writer: W, result: &ProjectionResult, granularity: Granularity) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    let step = match granularity {
        Granularity::Month => 1,
        Granularity::Year => 12,
    };
    for (buy, rent) in result.rows().step_by(step) {
        csv_writer.write_record(record(granularity, buy, rent))?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{ProjectionEngine, ProjectionRequest};

    fn export(granularity: Granularity) -> String {
        let result = ProjectionEngine::default().project(&ProjectionRequest::default()).unwrap();
        let mut buf = Vec::new();
        write_csv(&mut buf, &result, granularity).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_yearly_export() {
        let csv = export(Granularity::Year);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 31); // header + 30 years
        assert!(lines[0].starts_with("Period,House Value"));
        assert!(lines[1].starts_with("Year 1,"));
        assert!(lines[30].starts_with("Year 30,"));
    }

    #[test]
    fn test_monthly_export() {
        let csv = export(Granularity::Month);
        let mut reader = csv::Reader::from_reader(csv.as_bytes());

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 360);
        assert_eq!(&records[0][0], "Month 1");
        assert_eq!(&records[359][0], "Month 360");
        assert_eq!(records[0].len(), HEADER.len());
    }
}
