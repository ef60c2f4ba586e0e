//! Year-baseline proration and the derived tax summary

use super::aggregate::YearTotals;
use super::cpp::CppTable;
use super::TaxYear;
use crate::records::TaxBaseline;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Baseline taxes scaled to a filtered income subset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProratedTaxes {
    pub federal_tax: Decimal,
    pub provincial_tax: Decimal,
    pub cpp_contribution: Decimal,
    pub total_owed: Decimal,
}

/// Scale a whole-year baseline to a filtered income subset.
///
/// Linear in the income ratio: progressive brackets are not re-derived, so
/// the result is approximate when the subset's income mix differs from the
/// full year's. A zero or missing baseline income short-circuits to zero
/// taxes rather than dividing by zero.
pub fn reproportion(baseline: &TaxBaseline, filtered_income_total: Decimal) -> ProratedTaxes {
    let ratio = if baseline.gross_income > Decimal::ZERO {
        filtered_income_total / baseline.gross_income
    } else {
        Decimal::ZERO
    };
    log::debug!(
        "prorating baseline by {ratio} ({filtered_income_total} of {})",
        baseline.gross_income
    );

    let federal_tax = baseline.federal_tax * ratio;
    let provincial_tax = baseline.provincial_tax * ratio;
    let cpp_contribution = baseline.cpp_contribution * ratio;

    ProratedTaxes {
        federal_tax,
        provincial_tax,
        cpp_contribution,
        total_owed: federal_tax + provincial_tax + cpp_contribution,
    }
}

/// The derived per-year tax picture. Ephemeral: recomputed from the
/// snapshot on every run, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct TaxSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub deductible_expenses: Decimal,
    pub deductible_gst_credits: Decimal,
    pub net_income: Decimal,
    pub net_cashflow: Decimal,
    pub federal_tax: Decimal,
    pub provincial_tax: Decimal,
    pub cpp_contribution: Decimal,
    pub total_tax_owed: Decimal,
    /// Percentage of net income owed in tax; zero when net income is not
    /// positive
    pub effective_rate: Decimal,
}

/// Derive the year's summary from aggregated totals and the prorated
/// baseline.
pub fn tax_summary(totals: &YearTotals, baseline: &TaxBaseline) -> TaxSummary {
    let prorated = reproportion(baseline, totals.total_income);
    let net_income = totals.total_income - totals.deductible_expenses;
    let net_cashflow = totals.total_income - totals.total_expenses;
    let effective_rate = if net_income > Decimal::ZERO {
        prorated.total_owed / net_income * dec!(100)
    } else {
        Decimal::ZERO
    };

    TaxSummary {
        total_income: totals.total_income,
        total_expenses: totals.total_expenses,
        deductible_expenses: totals.deductible_expenses,
        deductible_gst_credits: totals.deductible_gst,
        net_income,
        net_cashflow,
        federal_tax: prorated.federal_tax,
        provincial_tax: prorated.provincial_tax,
        cpp_contribution: prorated.cpp_contribution,
        total_tax_owed: prorated.total_owed,
        effective_rate,
    }
}

/// Regular-employment figures entered by the user
#[derive(Debug, Clone, Copy, Default)]
pub struct EmploymentInput {
    pub income: Decimal,
    pub taxes_paid: Decimal,
    pub cpp_paid: Decimal,
}

/// Self-employment taxes blended with regular-employment income
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinedTaxes {
    pub federal_tax: Decimal,
    pub provincial_tax: Decimal,
    pub cpp_contribution: Decimal,
    pub cpp_cap_reached: bool,
    /// Signed: negative means a refund
    pub balance: Decimal,
    /// Balance floored at zero, the "amount owed" shown to the user
    pub amount_due: Decimal,
}

/// Blend regular-employment income into the self-employment summary.
///
/// Employment tax is estimated at the self-employment effective rate and
/// split federal/provincial in the same proportion as the baseline taxes
/// (an even split when both are zero). Employment CPP already remitted
/// reduces the self-employment CPP still owed.
pub fn combine_with_employment(
    summary: &TaxSummary,
    employment: &EmploymentInput,
    cpp: &CppTable,
    year: TaxYear,
) -> CombinedTaxes {
    let denominator = summary.federal_tax + summary.provincial_tax;
    let federal_share = if denominator.is_zero() {
        dec!(0.5)
    } else {
        summary.federal_tax / denominator
    };

    let employment_tax = employment.income * summary.effective_rate / dec!(100);
    let federal_tax = summary.federal_tax + employment_tax * federal_share;
    let provincial_tax = summary.provincial_tax + employment_tax * (Decimal::ONE - federal_share);

    let cpp_contribution =
        cpp.self_employed_owed(year, summary.cpp_contribution, employment.cpp_paid);
    let cpp_cap_reached = cpp.cap_reached(year, summary.cpp_contribution, employment.cpp_paid);

    let balance = federal_tax + provincial_tax + cpp_contribution - employment.taxes_paid;

    CombinedTaxes {
        federal_tax,
        provincial_tax,
        cpp_contribution,
        cpp_cap_reached,
        balance,
        amount_due: balance.max(Decimal::ZERO),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> TaxBaseline {
        TaxBaseline {
            gross_income: dec!(50000),
            federal_tax: dec!(5000),
            provincial_tax: dec!(2500),
            cpp_contribution: dec!(5000),
        }
    }

    fn totals(total_income: Decimal, deductible: Decimal) -> YearTotals {
        YearTotals {
            total_income,
            deductible_expenses: deductible,
            ..Default::default()
        }
    }

    #[test]
    fn full_year_income_returns_baseline_unchanged() {
        let prorated = reproportion(&baseline(), dec!(50000));
        assert_eq!(prorated.federal_tax, dec!(5000));
        assert_eq!(prorated.provincial_tax, dec!(2500));
        assert_eq!(prorated.cpp_contribution, dec!(5000));
        assert_eq!(prorated.total_owed, dec!(12500));
    }

    #[test]
    fn half_income_scales_linearly() {
        let prorated = reproportion(&baseline(), dec!(25000));
        assert_eq!(prorated.federal_tax, dec!(2500));
        assert_eq!(prorated.total_owed, dec!(6250));
    }

    #[test]
    fn zero_baseline_income_short_circuits() {
        let prorated = reproportion(&TaxBaseline::default(), dec!(30000));
        assert_eq!(prorated.total_owed, Decimal::ZERO);
    }

    #[test]
    fn summary_effective_rate_zero_guarded() {
        let summary = tax_summary(&totals(Decimal::ZERO, Decimal::ZERO), &baseline());
        assert_eq!(summary.effective_rate, Decimal::ZERO);

        // Deductions exceeding income also guard the rate
        let summary = tax_summary(&totals(dec!(1000), dec!(2000)), &baseline());
        assert_eq!(summary.net_income, dec!(-1000));
        assert_eq!(summary.effective_rate, Decimal::ZERO);
    }

    #[test]
    fn summary_carries_net_figures() {
        let year = YearTotals {
            total_income: dec!(50000),
            total_expenses: dec!(8000),
            deductible_expenses: dec!(5000),
            ..Default::default()
        };
        let summary = tax_summary(&year, &baseline());
        assert_eq!(summary.net_income, dec!(45000));
        assert_eq!(summary.net_cashflow, dec!(42000));
        assert_eq!(summary.total_tax_owed, dec!(12500));
        // 12500 / 45000 * 100
        assert_eq!(summary.effective_rate.round_dp(2), dec!(27.78));
    }

    #[test]
    fn combined_splits_employment_tax_by_baseline_ratio() {
        let summary = tax_summary(&totals(dec!(50000), Decimal::ZERO), &baseline());
        let employment = EmploymentInput {
            income: dec!(10000),
            taxes_paid: Decimal::ZERO,
            cpp_paid: Decimal::ZERO,
        };
        let combined =
            combine_with_employment(&summary, &employment, &CppTable::statutory(), TaxYear(2024));

        // Effective rate = 25%, employment tax = 2500, split 2:1
        let employment_tax = dec!(2500);
        let federal_share = dec!(5000) / dec!(7500);
        assert_eq!(
            combined.federal_tax,
            dec!(5000) + employment_tax * federal_share
        );
        assert_eq!(
            combined.provincial_tax,
            dec!(2500) + employment_tax * (Decimal::ONE - federal_share)
        );
    }

    #[test]
    fn combined_federal_share_defaults_to_even_split() {
        let no_tax_baseline = TaxBaseline {
            gross_income: dec!(50000),
            federal_tax: Decimal::ZERO,
            provincial_tax: Decimal::ZERO,
            cpp_contribution: dec!(4000),
        };
        let mut summary = tax_summary(&totals(dec!(50000), Decimal::ZERO), &no_tax_baseline);
        summary.effective_rate = dec!(10);

        let employment = EmploymentInput {
            income: dec!(10000),
            ..Default::default()
        };
        let combined =
            combine_with_employment(&summary, &employment, &CppTable::statutory(), TaxYear(2024));
        // 1000 of employment tax split evenly
        assert_eq!(combined.federal_tax, dec!(500));
        assert_eq!(combined.provincial_tax, dec!(500));
    }

    #[test]
    fn combined_cpp_reduced_by_employment_and_capped() {
        let summary = tax_summary(&totals(dec!(50000), Decimal::ZERO), &baseline());
        let employment = EmploymentInput {
            income: Decimal::ZERO,
            taxes_paid: Decimal::ZERO,
            cpp_paid: dec!(4000),
        };
        let combined =
            combine_with_employment(&summary, &employment, &CppTable::statutory(), TaxYear(2024));

        // min(4000 + 5000, 7735) - 4000
        assert_eq!(combined.cpp_contribution, dec!(3735.00));
        assert!(combined.cpp_cap_reached);
    }

    #[test]
    fn combined_refund_keeps_signed_balance() {
        let summary = tax_summary(&totals(dec!(50000), Decimal::ZERO), &baseline());
        let employment = EmploymentInput {
            income: Decimal::ZERO,
            taxes_paid: dec!(20000),
            cpp_paid: Decimal::ZERO,
        };
        let combined =
            combine_with_employment(&summary, &employment, &CppTable::statutory(), TaxYear(2024));

        // 5000 + 2500 + 5000 - 20000
        assert_eq!(combined.balance, dec!(-7500));
        assert_eq!(combined.amount_due, Decimal::ZERO);
    }
}
