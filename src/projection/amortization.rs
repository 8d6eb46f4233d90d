//! Fixed-rate mortgage amortization and rate conversions

/// Interest/principal split of one scheduled payment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentSplit {
    pub interest: f64,
    pub principal: f64,
}

/// Fixed monthly payment for a fully amortizing loan.
///
/// Standard annuity formula `P·r·(1+r)^n / ((1+r)^n − 1)` with
/// `r = annual_rate_pct / 100 / 12` and `n = term_years · 12`. When
/// `(1+r)^n` rounds to exactly 1 (a zero or vanishingly small rate) the
/// formula degenerates to a division by zero, so it falls back to `P / n`.
///
/// Malformed inputs (non-positive term, non-finite values) yield a
/// non-finite result that the caller must reject.
pub fn monthly_payment(principal: f64, annual_rate_pct: f64, term_years: f64) -> f64 {
    let n = term_years * 12.0;
    let r = monthly_rate(annual_rate_pct);

    let growth = (1.0 + r).powf(n);
    if growth == 1.0 {
        return principal / n;
    }

    principal * r * growth / (growth - 1.0)
}

/// Nominal monthly rate for an annual percentage, as used for mortgage interest
pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    annual_rate_pct / 100.0 / 12.0
}

/// Monthly rate that compounds to exactly `annual_rate_pct` over 12 months
pub fn monthly_equivalent_rate(annual_rate_pct: f64) -> f64 {
    (1.0 + annual_rate_pct / 100.0).powf(1.0 / 12.0) - 1.0
}

/// Split a scheduled payment against the outstanding balance
pub fn split_payment(balance: f64, monthly_rate: f64, payment: f64) -> PaymentSplit {
    let interest = balance * monthly_rate;
    PaymentSplit {
        interest,
        principal: payment - interest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_payment() {
        // 650k house, 20% down, 6.5% for 30 years
        let payment = monthly_payment(520_000.0, 6.5, 30.0);
        assert!((payment - 3286.75).abs() < 1.0, "got {}", payment);

        // 2465/month corresponds to a 390k principal at the same rate and term
        let payment = monthly_payment(390_000.0, 6.5, 30.0);
        assert!((payment - 2465.0).abs() < 1.0, "got {}", payment);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        assert_eq!(monthly_payment(120_000.0, 0.0, 10.0), 1000.0);
    }

    #[test]
    fn test_tiny_rate_is_straight_line() {
        let payment = monthly_payment(520_000.0, 1e-14, 30.0);
        assert!(payment.is_finite());
        assert_relative_eq!(payment, 520_000.0 / 360.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_term_is_not_finite() {
        assert!(!monthly_payment(100_000.0, 5.0, 0.0).is_finite());
        assert!(!monthly_payment(100_000.0, 0.0, 0.0).is_finite());
    }

    #[test]
    fn test_monthly_equivalent_compounds_to_annual() {
        let r = monthly_equivalent_rate(7.0);
        assert_relative_eq!((1.0 + r).powi(12), 1.07, epsilon = 1e-12);
        assert!(r < 0.07 / 12.0);
    }

    #[test]
    fn test_split_payment() {
        let split = split_payment(100_000.0, monthly_rate(6.0), 600.0);
        assert_relative_eq!(split.interest, 500.0, epsilon = 1e-9);
        assert_relative_eq!(split.principal, 100.0, epsilon = 1e-9);
    }
}
