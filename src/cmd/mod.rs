pub mod categories;
pub mod cpp;
pub mod gst;
pub mod schema;
pub mod summary;
pub mod transactions;

use crate::snapshot::Snapshot;
use chrono::Datelike;
use rust_decimal::Decimal;
use std::path::Path;

/// Read the snapshot document from a file path (or stdin with "-")
pub fn read_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    let snapshot = Snapshot::read(path)?;
    log::debug!(
        "snapshot: {} incomes, {} expenses, {} vehicles",
        snapshot.incomes.len(),
        snapshot.expenses.len(),
        snapshot.vehicles.len()
    );
    Ok(snapshot)
}

/// Default tax year for commands when -y is not given
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

pub(crate) fn format_cad(amount: Decimal) -> String {
    format!("${:.2}", amount)
}

pub(crate) fn format_cad_signed(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}

/// Label a signed balance as owing or refund; the magnitude is never shown
/// as a negative currency value.
pub(crate) fn format_balance(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("{} refund", format_cad(amount.abs()))
    } else {
        format!("{} owing", format_cad(amount))
    }
}
