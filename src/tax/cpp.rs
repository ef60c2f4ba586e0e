//! Canada Pension Plan self-employment contributions

use super::TaxYear;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Statutory CPP parameters for one calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CppParameters {
    pub year: i32,
    pub max_pensionable_earnings: Decimal,
    pub basic_exemption: Decimal,
    pub self_employed_rate: Decimal,
}

/// Immutable lookup of per-year CPP parameters, injected at construction so
/// the yearly statutory update never touches calculation logic.
#[derive(Debug, Clone)]
pub struct CppTable {
    entries: Vec<CppParameters>,
}

impl CppTable {
    /// The published parameters, 2020 through 2026
    pub fn statutory() -> CppTable {
        CppTable::new(vec![
            CppParameters {
                year: 2020,
                max_pensionable_earnings: dec!(58700),
                basic_exemption: dec!(3500),
                self_employed_rate: dec!(0.1050),
            },
            CppParameters {
                year: 2021,
                max_pensionable_earnings: dec!(61600),
                basic_exemption: dec!(3500),
                self_employed_rate: dec!(0.1090),
            },
            CppParameters {
                year: 2022,
                max_pensionable_earnings: dec!(64900),
                basic_exemption: dec!(3500),
                self_employed_rate: dec!(0.1140),
            },
            CppParameters {
                year: 2023,
                max_pensionable_earnings: dec!(66600),
                basic_exemption: dec!(3500),
                self_employed_rate: dec!(0.1190),
            },
            CppParameters {
                year: 2024,
                max_pensionable_earnings: dec!(68500),
                basic_exemption: dec!(3500),
                self_employed_rate: dec!(0.1190),
            },
            CppParameters {
                year: 2025,
                max_pensionable_earnings: dec!(71300),
                basic_exemption: dec!(3500),
                self_employed_rate: dec!(0.1190),
            },
            CppParameters {
                year: 2026,
                max_pensionable_earnings: dec!(74200),
                basic_exemption: dec!(3500),
                self_employed_rate: dec!(0.1190),
            },
        ])
    }

    /// Build a table from explicit entries.
    ///
    /// Panics if `entries` is empty: a table with no parameters cannot
    /// answer any year.
    pub fn new(mut entries: Vec<CppParameters>) -> CppTable {
        assert!(!entries.is_empty(), "CPP table requires at least one year");
        entries.sort_by_key(|p| p.year);
        CppTable { entries }
    }

    /// Parameters for a year. Years outside the table fall back to the
    /// latest known entry rather than erroring.
    pub fn parameters_for(&self, year: TaxYear) -> &CppParameters {
        self.entries
            .iter()
            .find(|p| p.year == year.0)
            .unwrap_or_else(|| {
                let latest = self.entries.last().expect("table is never empty");
                log::warn!(
                    "no CPP parameters for {}, using {} parameters",
                    year,
                    latest.year
                );
                latest
            })
    }

    /// Annual self-employed contribution ceiling for a year
    pub fn max_contribution(&self, year: TaxYear) -> Decimal {
        let params = self.parameters_for(year);
        (params.max_pensionable_earnings - params.basic_exemption) * params.self_employed_rate
    }

    /// Self-employment CPP still owed, given the contribution the year
    /// needs and what was already remitted through employment payroll.
    /// Capped at the annual ceiling and never negative.
    pub fn self_employed_owed(
        &self,
        year: TaxYear,
        needed: Decimal,
        already_paid: Decimal,
    ) -> Decimal {
        let capped = (already_paid + needed).min(self.max_contribution(year));
        (capped - already_paid).max(Decimal::ZERO)
    }

    /// Display signal: did employment plus self-employment contributions
    /// hit the annual ceiling?
    pub fn cap_reached(&self, year: TaxYear, needed: Decimal, already_paid: Decimal) -> bool {
        already_paid + needed > self.max_contribution(year)
    }
}

impl Default for CppTable {
    fn default() -> Self {
        CppTable::statutory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_contribution_2024() {
        let table = CppTable::statutory();
        // (68500 - 3500) * 0.1190
        assert_eq!(table.max_contribution(TaxYear(2024)), dec!(7735.00));
    }

    #[test]
    fn unknown_year_falls_back_to_latest() {
        let table = CppTable::statutory();
        assert_eq!(
            table.max_contribution(TaxYear(1999)),
            table.max_contribution(TaxYear(2026))
        );
        assert_eq!(
            table.max_contribution(TaxYear(2030)),
            table.max_contribution(TaxYear(2026))
        );
    }

    #[test]
    fn owed_reduced_by_employment_contributions() {
        let table = CppTable::statutory();
        // min(4000 + 5000, 7735) - 4000 = 3735
        assert_eq!(
            table.self_employed_owed(TaxYear(2024), dec!(5000), dec!(4000)),
            dec!(3735.00)
        );
    }

    #[test]
    fn owed_uncapped_when_under_ceiling() {
        let table = CppTable::statutory();
        assert_eq!(
            table.self_employed_owed(TaxYear(2024), dec!(3000), dec!(1000)),
            dec!(3000)
        );
    }

    #[test]
    fn owed_never_negative() {
        let table = CppTable::statutory();
        // Employment contributions already exceed the ceiling
        assert_eq!(
            table.self_employed_owed(TaxYear(2024), dec!(500), dec!(9000)),
            Decimal::ZERO
        );
    }

    #[test]
    fn cap_reached_signal() {
        let table = CppTable::statutory();
        assert!(table.cap_reached(TaxYear(2024), dec!(5000), dec!(4000)));
        assert!(!table.cap_reached(TaxYear(2024), dec!(3000), dec!(1000)));
    }

    #[test]
    fn injected_table_overrides_statutory() {
        let table = CppTable::new(vec![CppParameters {
            year: 2024,
            max_pensionable_earnings: dec!(10000),
            basic_exemption: dec!(3500),
            self_employed_rate: dec!(0.10),
        }]);
        assert_eq!(table.max_contribution(TaxYear(2024)), dec!(650.000));
    }
}
