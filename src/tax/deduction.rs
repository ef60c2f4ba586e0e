//! Deductible portion of an expense, decided by its declared use type

use crate::records::{ExpenseRecord, ExpenseType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// Deductible portion of a single expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deduction {
    /// Deductible dollars (base cost plus PST share)
    pub amount: Decimal,
    /// Deductible GST, claimable as an input tax credit
    pub gst: Decimal,
}

/// Everything the classifier needs beyond the expense itself: the user's
/// home-office share and the per-vehicle business-use lookup for the
/// selected year, assembled before classification so the classifier stays
/// pure.
#[derive(Debug, Clone, Default)]
pub struct DeductionContext {
    /// Home-office share of the home (0-100); applied only when in (0, 100]
    pub home_office_percent: Option<Decimal>,
    /// Vehicle id -> business-use percent (0-100) for the selected year
    pub vehicle_use: HashMap<String, Decimal>,
}

impl DeductionContext {
    fn home_office_factor(&self) -> Option<Decimal> {
        self.home_office_percent
            .filter(|p| *p > Decimal::ZERO && *p <= dec!(100))
            .map(|p| p / dec!(100))
    }

    /// Vehicles absent from the lookup default to full business use
    fn vehicle_factor(&self, vehicle_id: Option<&str>) -> Decimal {
        vehicle_id
            .and_then(|id| self.vehicle_use.get(id))
            .map(|p| p / dec!(100))
            .unwrap_or(Decimal::ONE)
    }

    /// Classify one expense. Rules are evaluated in priority order and the
    /// first match wins. Pure and unrounded; rounding happens at display.
    pub fn classify(&self, expense: &ExpenseRecord) -> Deduction {
        if !expense.is_tax_deductible {
            return Deduction::default();
        }

        let base = expense.base_cost + expense.pst_amount;

        match expense.expense_type {
            ExpenseType::Personal => Deduction::default(),
            ExpenseType::HomeOfficeLiving => {
                let factor = self.home_office_factor().unwrap_or(Decimal::ONE);
                Deduction {
                    amount: base * factor,
                    gst: expense.gst_amount * factor,
                }
            }
            ExpenseType::Vehicle => {
                let factor = self.vehicle_factor(expense.vehicle_id.as_deref());
                Deduction {
                    amount: base * factor,
                    gst: expense.gst_amount * factor,
                }
            }
            ExpenseType::SelfEmployment => Deduction {
                amount: base,
                gst: expense.gst_amount,
            },
            ExpenseType::Mixed => {
                let mut factor = expense.business_use_percentage / dec!(100);
                // Home-office-category mixed expenses are scaled a second
                // time by the home-office share. The two percentages
                // compound: business share of the expense, then home-office
                // share of the home. Observed product behaviour, kept as-is
                // pending a compliance review.
                if expense.category.is_home_office_living() {
                    if let Some(home) = self.home_office_factor() {
                        factor *= home;
                    }
                }
                Deduction {
                    amount: expense.base_cost * factor + expense.pst_amount * factor,
                    gst: expense.gst_amount * factor,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Category;

    fn expense(expense_type: ExpenseType) -> ExpenseRecord {
        ExpenseRecord {
            id: "e1".to_string(),
            amount: dec!(112),
            base_cost: dec!(100),
            gst_amount: dec!(5),
            pst_amount: dec!(7),
            date: "2024-06-15".to_string(),
            category: Category::Supplies,
            subcategory: None,
            vehicle_id: None,
            expense_type,
            business_use_percentage: Decimal::ZERO,
            is_tax_deductible: true,
        }
    }

    #[test]
    fn non_deductible_is_zero_regardless_of_type() {
        let ctx = DeductionContext::default();
        for expense_type in [
            ExpenseType::Personal,
            ExpenseType::HomeOfficeLiving,
            ExpenseType::Vehicle,
            ExpenseType::SelfEmployment,
            ExpenseType::Mixed,
        ] {
            let mut e = expense(expense_type);
            e.is_tax_deductible = false;
            assert_eq!(ctx.classify(&e), Deduction::default());
        }
    }

    #[test]
    fn personal_is_zero() {
        let ctx = DeductionContext::default();
        assert_eq!(
            ctx.classify(&expense(ExpenseType::Personal)),
            Deduction::default()
        );
    }

    #[test]
    fn self_employment_fully_deductible() {
        let ctx = DeductionContext::default();
        let deduction = ctx.classify(&expense(ExpenseType::SelfEmployment));
        assert_eq!(deduction.amount, dec!(107));
        assert_eq!(deduction.gst, dec!(5));
    }

    #[test]
    fn home_office_without_percent_is_fully_deductible() {
        let ctx = DeductionContext::default();
        let deduction = ctx.classify(&expense(ExpenseType::HomeOfficeLiving));
        assert_eq!(deduction.amount, dec!(107));
        assert_eq!(deduction.gst, dec!(5));
    }

    #[test]
    fn home_office_percent_apportions_both_amounts() {
        let ctx = DeductionContext {
            home_office_percent: Some(dec!(40)),
            vehicle_use: HashMap::new(),
        };
        let deduction = ctx.classify(&expense(ExpenseType::HomeOfficeLiving));
        assert_eq!(deduction.amount, dec!(42.8));
        assert_eq!(deduction.gst, dec!(2.0));
    }

    #[test]
    fn home_office_percent_out_of_range_ignored() {
        for percent in [dec!(0), dec!(101), dec!(-10)] {
            let ctx = DeductionContext {
                home_office_percent: Some(percent),
                vehicle_use: HashMap::new(),
            };
            let deduction = ctx.classify(&expense(ExpenseType::HomeOfficeLiving));
            assert_eq!(deduction.amount, dec!(107));
        }
    }

    #[test]
    fn vehicle_apportioned_by_business_use() {
        let ctx = DeductionContext {
            home_office_percent: None,
            vehicle_use: HashMap::from([("V".to_string(), dec!(60))]),
        };
        let mut e = expense(ExpenseType::Vehicle);
        e.vehicle_id = Some("V".to_string());
        e.category = Category::Vehicle;

        let deduction = ctx.classify(&e);
        assert_eq!(deduction.amount, dec!(64.2));
        assert_eq!(deduction.gst, dec!(3.0));
    }

    #[test]
    fn vehicle_missing_from_lookup_defaults_to_full_use() {
        let ctx = DeductionContext::default();
        let mut e = expense(ExpenseType::Vehicle);
        e.vehicle_id = Some("unknown".to_string());

        let deduction = ctx.classify(&e);
        assert_eq!(deduction.amount, dec!(107));
        assert_eq!(deduction.gst, dec!(5));
    }

    #[test]
    fn mixed_uses_business_use_percentage() {
        let ctx = DeductionContext::default();
        let mut e = expense(ExpenseType::Mixed);
        e.business_use_percentage = dec!(50);

        let deduction = ctx.classify(&e);
        assert_eq!(deduction.amount, dec!(53.5));
        assert_eq!(deduction.gst, dec!(2.5));
    }

    #[test]
    fn mixed_unset_percentage_deducts_nothing() {
        let ctx = DeductionContext::default();
        let deduction = ctx.classify(&expense(ExpenseType::Mixed));
        assert_eq!(deduction.amount, Decimal::ZERO);
        assert_eq!(deduction.gst, Decimal::ZERO);
    }

    #[test]
    fn mixed_home_office_category_compounds_both_shares() {
        let ctx = DeductionContext {
            home_office_percent: Some(dec!(40)),
            vehicle_use: HashMap::new(),
        };
        let mut e = expense(ExpenseType::Mixed);
        e.category = Category::Rent;
        e.business_use_percentage = dec!(50);

        // 50% business use, then 40% home-office share: multiplicative
        let deduction = ctx.classify(&e);
        assert_eq!(deduction.amount, dec!(100) * dec!(0.2) + dec!(7) * dec!(0.2));
        assert_eq!(deduction.gst, dec!(1.0));
    }

    #[test]
    fn mixed_non_home_office_category_single_share() {
        let ctx = DeductionContext {
            home_office_percent: Some(dec!(40)),
            vehicle_use: HashMap::new(),
        };
        let mut e = expense(ExpenseType::Mixed);
        e.category = Category::Supplies;
        e.business_use_percentage = dec!(50);

        let deduction = ctx.classify(&e);
        assert_eq!(deduction.amount, dec!(53.5));
    }
}
