//! Categories command - expense totals by category

use crate::cmd::{self, format_cad};
use crate::tax::{self, TaxYear, TOP_CATEGORIES_REPORT};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct CategoriesCommand {
    /// Snapshot JSON document (or "-" for stdin)
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Tax year to report (defaults to the current calendar year)
    #[arg(short, long, default_value_t = cmd::current_year())]
    year: i32,

    /// Number of categories to show
    #[arg(long, default_value_t = TOP_CATEGORIES_REPORT)]
    top: usize,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,

    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Debug, Serialize)]
struct CategoryData {
    category: String,
    amount: String,
}

#[derive(Debug, Serialize)]
struct CategoriesOutput {
    tax_year: i32,
    categories: Vec<CategoryData>,
}

impl CategoriesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let snapshot = cmd::read_snapshot(&self.snapshot)?;
        let year = TaxYear(self.year);

        let expenses = tax::filter_by_year(&snapshot.expenses, year);
        let totals = tax::totals_by_category(&expenses, self.top);

        if self.json {
            let output = CategoriesOutput {
                tax_year: self.year,
                categories: totals
                    .iter()
                    .map(|t| CategoryData {
                        category: t.category.wire_name().to_string(),
                        amount: format!("{:.2}", t.amount),
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        if totals.is_empty() {
            println!("No expenses found for {}", self.year);
            return Ok(());
        }

        let rows: Vec<CategoryRow> = totals
            .iter()
            .map(|t| CategoryRow {
                category: t.category.label().to_string(),
                amount: format_cad(t.amount),
            })
            .collect();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        Ok(())
    }
}
