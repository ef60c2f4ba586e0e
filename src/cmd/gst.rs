//! Gst command - GST/HST position for a year

use crate::cmd::{self, format_balance, format_cad};
use crate::tax::{self, TaxYear};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct GstCommand {
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

#[derive(Debug, Serialize)]
struct GstData {
    tax_year: i32,
    collected: String,
    input_tax_credits: String,
    net_owing: String,
    refund: bool,
}

impl GstCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let snapshot = cmd::read_snapshot(&self.snapshot)?;
        let year = TaxYear(self.year);

        let incomes = tax::filter_by_year(&snapshot.incomes, year);
        let expenses = tax::filter_by_year(&snapshot.expenses, year);
        let ctx = snapshot.deduction_context(year);
        let summary = tax::gst_hst_summary(&incomes, &expenses, &ctx);

        if self.json {
            let data = GstData {
                tax_year: self.year,
                collected: format!("{:.2}", summary.collected),
                input_tax_credits: format!("{:.2}", summary.input_tax_credits),
                net_owing: format!("{:.2}", summary.net_owing),
                refund: summary.net_owing.is_sign_negative() && !summary.net_owing.is_zero(),
            };
            println!("{}", serde_json::to_string_pretty(&data)?);
            return Ok(());
        }

        println!();
        println!("GST/HST SUMMARY ({})", self.year);
        println!();
        println!("  Collected: {}", format_cad(summary.collected));
        println!(
            "  Input tax credits: {}",
            format_cad(summary.input_tax_credits)
        );
        println!("  Net: {}", format_balance(summary.net_owing));
        println!();
        Ok(())
    }
}
