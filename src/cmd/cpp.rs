//! Cpp command - statutory parameters and contribution ceiling for a year

use crate::cmd::{self, format_cad};
use crate::tax::{CppTable, TaxYear};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct CppCommand {
    /// Tax year (defaults to the current calendar year)
    #[arg(short, long, default_value_t = cmd::current_year())]
    year: i32,

    /// Self-employment CPP the year needs (e.g. the prorated baseline figure)
    #[arg(long)]
    needed: Option<Decimal>,

    /// CPP already remitted through employment payroll
    #[arg(long, default_value_t = Decimal::ZERO)]
    paid: Decimal,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct CppData {
    tax_year: i32,
    parameters_year: i32,
    max_pensionable_earnings: String,
    basic_exemption: String,
    self_employed_rate: String,
    max_contribution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    contribution_owed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cap_reached: Option<bool>,
}

impl CppCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let table = CppTable::statutory();
        let year = TaxYear(self.year);
        let params = *table.parameters_for(year);
        let max_contribution = table.max_contribution(year);

        let owed = self
            .needed
            .map(|needed| table.self_employed_owed(year, needed, self.paid));
        let cap_reached = self
            .needed
            .map(|needed| table.cap_reached(year, needed, self.paid));

        if self.json {
            let data = CppData {
                tax_year: self.year,
                parameters_year: params.year,
                max_pensionable_earnings: format!("{:.2}", params.max_pensionable_earnings),
                basic_exemption: format!("{:.2}", params.basic_exemption),
                self_employed_rate: format!("{}", params.self_employed_rate),
                max_contribution: format!("{:.2}", max_contribution),
                contribution_owed: owed.map(|o| format!("{:.2}", o)),
                cap_reached,
            };
            println!("{}", serde_json::to_string_pretty(&data)?);
            return Ok(());
        }

        println!();
        println!("CPP ({})", self.year);
        if params.year != self.year {
            println!("  Using {} parameters (latest known year)", params.year);
        }
        println!();
        println!(
            "  Max pensionable earnings: {}",
            format_cad(params.max_pensionable_earnings)
        );
        println!(
            "  Basic exemption: {}",
            format_cad(params.basic_exemption)
        );
        println!("  Self-employed rate: {}", params.self_employed_rate);
        println!("  Max contribution: {}", format_cad(max_contribution));

        if let (Some(owed), Some(cap_reached)) = (owed, cap_reached) {
            println!();
            println!("  Already paid via employment: {}", format_cad(self.paid));
            let cap_marker = if cap_reached {
                " (annual cap reached)"
            } else {
                ""
            };
            println!("  Contribution owed: {}{}", format_cad(owed), cap_marker);
        }
        println!();
        Ok(())
    }
}
