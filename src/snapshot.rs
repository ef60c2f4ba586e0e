//! The snapshot document - the engine's entire input, read in one pass

use crate::records::{
    ExpenseRecord, FieldDoc, IncomeRecord, Profile, TaxBaseline, Vehicle, VehicleUsage,
};
use crate::tax::{DeductionContext, TaxYear};
use crewtax_derive::FieldDocs;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid snapshot document: {0}")]
    Json(#[from] serde_json::Error),
}

/// One JSON document holding everything a computation pass needs. All
/// arrays default to empty; the baseline and profile are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, FieldDocs)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Income records, all years
    #[serde(default)]
    pub incomes: Vec<IncomeRecord>,
    /// Expense records, all years
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
    /// Vehicles expenses may be claimed against
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    /// Per-vehicle business-use percentages, one entry per (vehicle, year)
    #[serde(default)]
    pub vehicle_usage: Vec<VehicleUsage>,
    /// Whole-year baseline computed upstream; consumed, never recomputed
    #[serde(default)]
    pub baseline: Option<TaxBaseline>,
    /// User settings and regular-employment figures
    #[serde(default)]
    pub profile: Option<Profile>,
}

/// Resolves a vehicle's business-use share for a tax year.
///
/// This is the seam between the fetch boundary and the pure classifier:
/// the snapshot resolves from pre-fetched usage entries, tests resolve
/// from a plain map.
pub trait VehicleUsageResolver {
    fn business_use_percent(&self, vehicle_id: &str, year: TaxYear) -> Option<Decimal>;
}

impl VehicleUsageResolver for Snapshot {
    fn business_use_percent(&self, vehicle_id: &str, year: TaxYear) -> Option<Decimal> {
        self.vehicle_usage
            .iter()
            .find(|u| u.vehicle_id == vehicle_id && u.year == year.0)
            .map(|u| u.business_use_percent)
    }
}

impl Snapshot {
    /// Read the document from a file path, or stdin with "-"
    pub fn read(path: &Path) -> Result<Snapshot, SnapshotError> {
        if path.as_os_str() == "-" {
            Self::from_reader(io::stdin().lock())
        } else {
            Self::from_reader(BufReader::new(File::open(path)?))
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Snapshot, SnapshotError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Baseline for the proration engine. Missing upstream data degrades
    /// to zero-valued taxes rather than failing the summary.
    pub fn baseline_or_default(&self) -> TaxBaseline {
        match &self.baseline {
            Some(baseline) => baseline.clone(),
            None => {
                log::warn!("snapshot has no tax baseline; prorated taxes will be zero");
                TaxBaseline::default()
            }
        }
    }

    pub fn profile_or_default(&self) -> Profile {
        self.profile.clone().unwrap_or_default()
    }

    /// Assemble the classifier's context for one tax year: the home-office
    /// share and the resolved per-vehicle business-use lookup. Vehicles
    /// without an entry for the year are left out of the lookup, which the
    /// classifier treats as 100% business use.
    pub fn deduction_context(&self, year: TaxYear) -> DeductionContext {
        let vehicle_use = self
            .vehicles
            .iter()
            .filter_map(|v| {
                self.business_use_percent(&v.id, year)
                    .map(|percent| (v.id.clone(), percent))
            })
            .collect();

        DeductionContext {
            home_office_percent: self.profile_or_default().home_office_percent,
            vehicle_use,
        }
    }
}
