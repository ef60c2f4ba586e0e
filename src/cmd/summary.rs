//! Summary command - the full tax picture for a year

use crate::cmd::{self, format_balance, format_cad, format_cad_signed};
use crate::tax::{
    self, CombinedTaxes, CppTable, EmploymentInput, GstHstSummary, TaxSummary, TaxYear,
    TOP_CATEGORIES_SUMMARY,
};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct SummaryCommand {
    /// Snapshot JSON document (or "-" for stdin)
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Tax year to report (defaults to the current calendar year)
    #[arg(short, long, default_value_t = cmd::current_year())]
    year: i32,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// Summary data for JSON output
#[derive(Debug, Serialize)]
struct SummaryData {
    tax_year: i32,
    total_income: String,
    total_expenses: String,
    deductible_expenses: String,
    deductible_gst_credits: String,
    income_deductions: String,
    net_income: String,
    net_cashflow: String,
    federal_tax: String,
    provincial_tax: String,
    cpp_contribution: String,
    total_tax_owed: String,
    effective_rate_pct: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    combined: Option<CombinedData>,
    gst_hst: GstHstData,
    top_categories: Vec<CategoryData>,
}

#[derive(Debug, Serialize)]
struct CombinedData {
    employment_income: String,
    federal_tax: String,
    provincial_tax: String,
    cpp_contribution: String,
    cpp_cap_reached: bool,
    taxes_paid_on_employment: String,
    balance: String,
    amount_due: String,
}

#[derive(Debug, Serialize)]
struct GstHstData {
    collected: String,
    input_tax_credits: String,
    net_owing: String,
}

#[derive(Debug, Serialize)]
struct CategoryData {
    category: String,
    amount: String,
}

impl SummaryCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let snapshot = cmd::read_snapshot(&self.snapshot)?;
        let year = TaxYear(self.year);
        let cpp_table = CppTable::statutory();

        let incomes = tax::filter_by_year(&snapshot.incomes, year);
        let expenses = tax::filter_by_year(&snapshot.expenses, year);
        let ctx = snapshot.deduction_context(year);
        let baseline = snapshot.baseline_or_default();
        let profile = snapshot.profile_or_default();

        let totals = tax::year_totals(&incomes, &expenses, &ctx);
        let summary = tax::tax_summary(&totals, &baseline);
        let gst = tax::gst_hst_summary(&incomes, &expenses, &ctx);
        let top = tax::totals_by_category(&expenses, TOP_CATEGORIES_SUMMARY);

        let combined = (profile.employment_income > Decimal::ZERO).then(|| {
            let employment = EmploymentInput {
                income: profile.employment_income,
                taxes_paid: profile.taxes_paid_on_employment,
                cpp_paid: profile.cpp_paid_on_employment,
            };
            let taxes = tax::combine_with_employment(&summary, &employment, &cpp_table, year);
            (employment, taxes)
        });

        if self.json {
            self.print_json(&summary, &totals.income_deductions, &combined, &gst, &top)
        } else {
            self.print_summary(&summary, totals.income_deductions, &combined, &gst, &top);
            Ok(())
        }
    }

    fn print_summary(
        &self,
        summary: &TaxSummary,
        income_deductions: Decimal,
        combined: &Option<(EmploymentInput, CombinedTaxes)>,
        gst: &GstHstSummary,
        top: &[tax::CategoryTotal],
    ) {
        println!();
        println!("TAX SUMMARY ({})", self.year);
        println!();

        println!("INCOME");
        println!("  Total income: {}", format_cad(summary.total_income));
        println!("  GST/HST collected: {}", format_cad(gst.collected));
        if !income_deductions.is_zero() {
            println!("  Payroll deductions: {}", format_cad(income_deductions));
        }
        println!();

        println!("EXPENSES");
        println!("  Total expenses: {}", format_cad(summary.total_expenses));
        println!(
            "  Deductible: {}",
            format_cad(summary.deductible_expenses)
        );
        println!(
            "  Deductible GST (ITCs): {}",
            format_cad(summary.deductible_gst_credits)
        );
        println!();

        println!("TAX (prorated from baseline)");
        println!("  Net income: {}", format_cad_signed(summary.net_income));
        println!(
            "  Net cashflow: {}",
            format_cad_signed(summary.net_cashflow)
        );
        println!(
            "  Federal: {} | Provincial: {} | CPP: {}",
            format_cad(summary.federal_tax),
            format_cad(summary.provincial_tax),
            format_cad(summary.cpp_contribution)
        );
        println!("  Total: {}", format_balance(summary.total_tax_owed));
        println!("  Effective rate: {:.1}%", summary.effective_rate);
        println!();

        if let Some((employment, taxes)) = combined {
            println!("COMBINED WITH EMPLOYMENT");
            println!(
                "  Employment income: {}",
                format_cad(employment.income)
            );
            println!(
                "  Federal: {} | Provincial: {}",
                format_cad(taxes.federal_tax),
                format_cad(taxes.provincial_tax)
            );
            let cap_marker = if taxes.cpp_cap_reached {
                " (annual cap reached)"
            } else {
                ""
            };
            println!(
                "  CPP still owed: {}{}",
                format_cad(taxes.cpp_contribution),
                cap_marker
            );
            println!(
                "  Taxes already paid: {}",
                format_cad(employment.taxes_paid)
            );
            println!("  Balance: {}", format_balance(taxes.balance));
            println!("  Amount due: {}", format_cad(taxes.amount_due));
            println!();
        }

        println!("GST/HST");
        println!("  Collected: {}", format_cad(gst.collected));
        println!(
            "  Input tax credits: {}",
            format_cad(gst.input_tax_credits)
        );
        println!("  Net: {}", format_balance(gst.net_owing));
        println!();

        if !top.is_empty() {
            println!("TOP CATEGORIES");
            for (i, total) in top.iter().enumerate() {
                println!(
                    "  {}. {}: {}",
                    i + 1,
                    total.category.label(),
                    format_cad(total.amount)
                );
            }
            println!();
        }
    }

    fn print_json(
        &self,
        summary: &TaxSummary,
        income_deductions: &Decimal,
        combined: &Option<(EmploymentInput, CombinedTaxes)>,
        gst: &GstHstSummary,
        top: &[tax::CategoryTotal],
    ) -> anyhow::Result<()> {
        let data = SummaryData {
            tax_year: self.year,
            total_income: format!("{:.2}", summary.total_income),
            total_expenses: format!("{:.2}", summary.total_expenses),
            deductible_expenses: format!("{:.2}", summary.deductible_expenses),
            deductible_gst_credits: format!("{:.2}", summary.deductible_gst_credits),
            income_deductions: format!("{:.2}", income_deductions),
            net_income: format!("{:.2}", summary.net_income),
            net_cashflow: format!("{:.2}", summary.net_cashflow),
            federal_tax: format!("{:.2}", summary.federal_tax),
            provincial_tax: format!("{:.2}", summary.provincial_tax),
            cpp_contribution: format!("{:.2}", summary.cpp_contribution),
            total_tax_owed: format!("{:.2}", summary.total_tax_owed),
            effective_rate_pct: format!("{:.1}", summary.effective_rate),
            combined: combined.as_ref().map(|(employment, taxes)| CombinedData {
                employment_income: format!("{:.2}", employment.income),
                federal_tax: format!("{:.2}", taxes.federal_tax),
                provincial_tax: format!("{:.2}", taxes.provincial_tax),
                cpp_contribution: format!("{:.2}", taxes.cpp_contribution),
                cpp_cap_reached: taxes.cpp_cap_reached,
                taxes_paid_on_employment: format!("{:.2}", employment.taxes_paid),
                balance: format!("{:.2}", taxes.balance),
                amount_due: format!("{:.2}", taxes.amount_due),
            }),
            gst_hst: GstHstData {
                collected: format!("{:.2}", gst.collected),
                input_tax_credits: format!("{:.2}", gst.input_tax_credits),
                net_owing: format!("{:.2}", gst.net_owing),
            },
            top_categories: top
                .iter()
                .map(|t| CategoryData {
                    category: t.category.wire_name().to_string(),
                    amount: format!("{:.2}", t.amount),
                })
                .collect(),
        };

        println!("{}", serde_json::to_string_pretty(&data)?);
        Ok(())
    }
}
