//! Tax year selection from raw record dates

use crate::records::{ExpenseRecord, IncomeRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar tax year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaxYear(pub i32);

impl TaxYear {
    /// Extract the year from a `YYYY-MM-DD` date string.
    ///
    /// Takes the leading digit prefix and parses it as an integer, with no
    /// calendar validation: "2024-13-99" extracts 2024. The rest of the
    /// system scopes records by the same rule, so a stricter parse here
    /// would change which records a year includes.
    pub fn from_date_str(date: &str) -> Option<TaxYear> {
        let trimmed = date.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        trimmed[..end].parse::<i32>().ok().map(TaxYear)
    }
}

impl fmt::Display for TaxYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record carrying a raw `YYYY-MM-DD` date string
pub trait Dated {
    fn date_str(&self) -> &str;
}

impl Dated for IncomeRecord {
    fn date_str(&self) -> &str {
        &self.date
    }
}

impl Dated for ExpenseRecord {
    fn date_str(&self) -> &str {
        &self.date
    }
}

/// Retain records whose extracted year matches. Records with malformed
/// dates extract no year and are silently dropped.
pub fn filter_by_year<T: Dated>(records: &[T], year: TaxYear) -> Vec<&T> {
    records
        .iter()
        .filter(|r| TaxYear::from_date_str(r.date_str()) == Some(year))
        .collect()
}
