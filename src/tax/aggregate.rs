//! Category totals and GST/HST summaries over a year's records

use super::deduction::DeductionContext;
use crate::records::{Category, ExpenseRecord, IncomeRecord};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Top-N truncation for the summary view's category breakdown
pub const TOP_CATEGORIES_SUMMARY: usize = 5;
/// Top-N truncation for the categories report
pub const TOP_CATEGORIES_REPORT: usize = 8;

/// Aggregated money totals for one tax year
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearTotals {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub deductible_expenses: Decimal,
    pub deductible_gst: Decimal,
    pub gst_hst_collected: Decimal,
    /// Payroll deductions withheld across the year's income records
    pub income_deductions: Decimal,
}

/// Reduce a year's records to money totals. Idempotent: nothing in the
/// inputs is mutated, so recomputation on every input change is safe.
pub fn year_totals(
    incomes: &[&IncomeRecord],
    expenses: &[&ExpenseRecord],
    ctx: &DeductionContext,
) -> YearTotals {
    let mut totals = YearTotals::default();

    for income in incomes {
        totals.total_income += income.amount;
        totals.gst_hst_collected += income.gst_hst_collected;
        if let Some(deductions) = &income.deductions {
            totals.income_deductions += deductions.total();
        }
    }

    for expense in expenses {
        totals.total_expenses += expense.amount;
        let deduction = ctx.classify(expense);
        totals.deductible_expenses += deduction.amount;
        totals.deductible_gst += deduction.gst;
    }

    totals
}

/// One category's expense total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: Decimal,
}

/// Expense totals grouped by category, largest first, truncated to `top`.
/// The sort is stable, so categories with equal totals keep the order
/// their first expense appeared in.
pub fn totals_by_category(expenses: &[&ExpenseRecord], top: usize) -> Vec<CategoryTotal> {
    let mut order: Vec<Category> = Vec::new();
    let mut sums: HashMap<Category, Decimal> = HashMap::new();

    for expense in expenses {
        if !sums.contains_key(&expense.category) {
            order.push(expense.category);
        }
        *sums.entry(expense.category).or_default() += expense.amount;
    }

    let mut totals: Vec<CategoryTotal> = order
        .into_iter()
        .map(|category| CategoryTotal {
            category,
            amount: sums[&category],
        })
        .collect();
    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals.truncate(top);
    totals
}

/// GST/HST position for a year: collected on income vs input tax credits
/// reclaimable on deductible expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GstHstSummary {
    pub collected: Decimal,
    pub input_tax_credits: Decimal,
    /// Positive = owing, negative = refund
    pub net_owing: Decimal,
}

pub fn gst_hst_summary(
    incomes: &[&IncomeRecord],
    expenses: &[&ExpenseRecord],
    ctx: &DeductionContext,
) -> GstHstSummary {
    let collected: Decimal = incomes.iter().map(|i| i.gst_hst_collected).sum();
    // Only the deductible share of GST counts as a credit
    let input_tax_credits: Decimal = expenses.iter().map(|e| ctx.classify(e).gst).sum();

    GstHstSummary {
        collected,
        input_tax_credits,
        net_owing: collected - input_tax_credits,
    }
}
