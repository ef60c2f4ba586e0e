//! Transactions command - per-record listing with deductible amounts

use crate::cmd::{self, format_cad};
use crate::records::Category;
use crate::tax::{self, TaxYear};
use clap::{Args, ValueEnum};
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct TransactionsCommand {
    /// Snapshot JSON document (or "-" for stdin)
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Tax year to list (defaults to the current calendar year)
    #[arg(short, long, default_value_t = cmd::current_year())]
    year: i32,

    /// Only list one kind of record
    #[arg(short, long, value_enum)]
    kind: Option<KindFilter>,

    /// Only list expenses in this category (wire name, e.g. union_dues)
    #[arg(short, long)]
    category: Option<String>,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindFilter {
    Income,
    Expense,
}

/// Row for the transactions table output
#[derive(Debug, Clone, Tabled, serde::Serialize)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,

    #[tabled(rename = "Kind")]
    kind: String,

    #[tabled(rename = "Detail")]
    detail: String,

    #[tabled(rename = "Amount")]
    amount: String,

    #[tabled(rename = "GST")]
    gst: String,

    #[tabled(rename = "Deductible")]
    deductible: String,

    #[tabled(rename = "Deductible GST")]
    deductible_gst: String,
}

impl TransactionsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let snapshot = cmd::read_snapshot(&self.snapshot)?;
        let year = TaxYear(self.year);

        let category = match &self.category {
            Some(name) => Some(Category::parse(name).ok_or_else(|| {
                anyhow::anyhow!(
                    "unknown category '{}'; expected one of: {}",
                    name,
                    Category::ALL
                        .iter()
                        .map(|c| c.wire_name())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })?),
            None => None,
        };

        let ctx = snapshot.deduction_context(year);
        let mut rows = Vec::new();

        let list_incomes = !matches!(self.kind, Some(KindFilter::Expense)) && category.is_none();
        if list_incomes {
            for income in tax::filter_by_year(&snapshot.incomes, year) {
                rows.push(TransactionRow {
                    date: income.date.clone(),
                    kind: "Income".to_string(),
                    detail: income.income_type.label().to_string(),
                    amount: format_cad(income.amount),
                    gst: format_cad(income.gst_hst_collected),
                    deductible: "-".to_string(),
                    deductible_gst: "-".to_string(),
                });
            }
        }

        if !matches!(self.kind, Some(KindFilter::Income)) {
            for expense in tax::filter_by_year(&snapshot.expenses, year) {
                if category.is_some_and(|c| c != expense.category) {
                    continue;
                }
                let deduction = ctx.classify(expense);
                rows.push(TransactionRow {
                    date: expense.date.clone(),
                    kind: "Expense".to_string(),
                    detail: expense.category.label().to_string(),
                    amount: format_cad(expense.amount),
                    gst: format_cad(expense.gst_amount),
                    deductible: format_cad(deduction.amount),
                    deductible_gst: format_cad(deduction.gst),
                });
            }
        }

        if self.csv {
            self.write_csv(&rows)
        } else {
            self.print_table(&rows);
            Ok(())
        }
    }

    fn print_table(&self, rows: &[TransactionRow]) {
        if rows.is_empty() {
            println!("No transactions found for {}", self.year);
            return;
        }

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }

    fn write_csv(&self, rows: &[TransactionRow]) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_writer(io::stdout());
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
