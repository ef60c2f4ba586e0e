//! Record types for the snapshot document - incomes, expenses, vehicles

use crewtax_derive::FieldDocs;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Schema information for one wire field, generated by `FieldDocs`
#[derive(Debug, Clone, Copy)]
pub struct FieldDoc {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// Income classification for a recorded payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IncomeType {
    UnionProduction,
    NonUnionProduction,
    RoyaltyResidual,
    #[default]
    Cash,
}

// Lenient by hand: unrecognized wire values become Cash with a warning
// instead of failing the whole document.
impl<'de> Deserialize<'de> for IncomeType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "union_production" => IncomeType::UnionProduction,
            "non_union_production" => IncomeType::NonUnionProduction,
            "royalty_residual" => IncomeType::RoyaltyResidual,
            "cash" => IncomeType::Cash,
            other => {
                log::warn!("unknown income type {:?}, treating as cash", other);
                IncomeType::Cash
            }
        })
    }
}

impl IncomeType {
    pub fn label(self) -> &'static str {
        match self {
            IncomeType::UnionProduction => "Union Production",
            IncomeType::NonUnionProduction => "Non-Union Production",
            IncomeType::RoyaltyResidual => "Royalty/Residual",
            IncomeType::Cash => "Cash",
        }
    }
}

/// Declared use of an expense, which decides how much of it is deductible.
/// Absent or unrecognized values fall back to `SelfEmployment` (fully
/// deductible) rather than being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseType {
    Personal,
    HomeOfficeLiving,
    Vehicle,
    #[default]
    SelfEmployment,
    Mixed,
}

impl<'de> Deserialize<'de> for ExpenseType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "personal" => ExpenseType::Personal,
            "home_office_living" => ExpenseType::HomeOfficeLiving,
            "vehicle" => ExpenseType::Vehicle,
            "mixed" => ExpenseType::Mixed,
            "self_employment" => ExpenseType::SelfEmployment,
            other => {
                log::warn!("unknown expense type {:?}, treating as self_employment", other);
                ExpenseType::SelfEmployment
            }
        })
    }
}

/// Expense category (closed set matching the trade's expense chart)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    AgentFees,
    UnionDues,
    Training,
    Equipment,
    EquipmentRental,
    Repairs,
    Supplies,
    Wardrobe,
    MakeupGrooming,
    PhoneInternet,
    OfficeExpenses,
    Advertising,
    MealsEntertainment,
    Travel,
    Vehicle,
    Parking,
    Insurance,
    ProfessionalFees,
    BankCharges,
    Rent,
    Utilities,
}

impl Category {
    pub const ALL: [Category; 21] = [
        Category::AgentFees,
        Category::UnionDues,
        Category::Training,
        Category::Equipment,
        Category::EquipmentRental,
        Category::Repairs,
        Category::Supplies,
        Category::Wardrobe,
        Category::MakeupGrooming,
        Category::PhoneInternet,
        Category::OfficeExpenses,
        Category::Advertising,
        Category::MealsEntertainment,
        Category::Travel,
        Category::Vehicle,
        Category::Parking,
        Category::Insurance,
        Category::ProfessionalFees,
        Category::BankCharges,
        Category::Rent,
        Category::Utilities,
    ];

    /// The snake_case wire name used in the snapshot document
    pub fn wire_name(self) -> &'static str {
        match self {
            Category::AgentFees => "agent_fees",
            Category::UnionDues => "union_dues",
            Category::Training => "training",
            Category::Equipment => "equipment",
            Category::EquipmentRental => "equipment_rental",
            Category::Repairs => "repairs",
            Category::Supplies => "supplies",
            Category::Wardrobe => "wardrobe",
            Category::MakeupGrooming => "makeup_grooming",
            Category::PhoneInternet => "phone_internet",
            Category::OfficeExpenses => "office_expenses",
            Category::Advertising => "advertising",
            Category::MealsEntertainment => "meals_entertainment",
            Category::Travel => "travel",
            Category::Vehicle => "vehicle",
            Category::Parking => "parking",
            Category::Insurance => "insurance",
            Category::ProfessionalFees => "professional_fees",
            Category::BankCharges => "bank_charges",
            Category::Rent => "rent",
            Category::Utilities => "utilities",
        }
    }

    /// Display label for tables and summaries
    pub fn label(self) -> &'static str {
        match self {
            Category::AgentFees => "Agent Fees",
            Category::UnionDues => "Union Dues",
            Category::Training => "Training",
            Category::Equipment => "Equipment",
            Category::EquipmentRental => "Equipment Rental",
            Category::Repairs => "Repairs",
            Category::Supplies => "Supplies",
            Category::Wardrobe => "Wardrobe",
            Category::MakeupGrooming => "Makeup & Grooming",
            Category::PhoneInternet => "Phone & Internet",
            Category::OfficeExpenses => "Office Expenses",
            Category::Advertising => "Advertising",
            Category::MealsEntertainment => "Meals & Entertainment",
            Category::Travel => "Travel",
            Category::Vehicle => "Vehicle",
            Category::Parking => "Parking",
            Category::Insurance => "Insurance",
            Category::ProfessionalFees => "Professional Fees",
            Category::BankCharges => "Bank Charges",
            Category::Rent => "Rent",
            Category::Utilities => "Utilities",
        }
    }

    /// Case-insensitive parse of a wire name (e.g. for CLI filters)
    pub fn parse(s: &str) -> Option<Category> {
        let wanted = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.wire_name().eq_ignore_ascii_case(wanted))
    }

    /// Categories that count as home-office/living costs. A `mixed` expense
    /// in one of these is additionally scaled by the home-office share.
    pub fn is_home_office_living(self) -> bool {
        matches!(
            self,
            Category::Rent | Category::Utilities | Category::PhoneInternet | Category::Insurance
        )
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-record payroll deductions withheld from a payment
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, FieldDocs)]
#[serde(rename_all = "camelCase")]
pub struct IncomeDeductions {
    /// Union dues withheld
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub dues: Decimal,
    /// Retirement plan contributions withheld
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub retirement: Decimal,
    /// Labour organization fees withheld
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub labour: Decimal,
    /// Buyout amounts withheld
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub buyout: Decimal,
    /// Pension contributions withheld
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub pension: Decimal,
    /// Insurance premiums withheld
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub insurance: Decimal,
}

impl IncomeDeductions {
    pub fn total(&self) -> Decimal {
        self.dues + self.retirement + self.labour + self.buyout + self.pension + self.insurance
    }
}

/// A recorded income payment, owned by the upstream store
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, FieldDocs)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRecord {
    /// Unique identifier from the upstream store
    pub id: String,
    /// Gross amount received
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub amount: Decimal,
    /// Date received (YYYY-MM-DD)
    pub date: String,
    /// Income classification (union_production, non_union_production, royalty_residual, cash)
    #[serde(default)]
    pub income_type: IncomeType,
    /// Payroll deductions withheld from this payment
    #[serde(default)]
    pub deductions: Option<IncomeDeductions>,
    /// GST/HST collected on this income
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub gst_hst_collected: Decimal,
}

/// A recorded expense, owned by the upstream store
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, FieldDocs)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    /// Unique identifier from the upstream store
    pub id: String,
    /// Total paid including sales taxes
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub amount: Decimal,
    /// Pre-tax cost
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub base_cost: Decimal,
    /// GST/HST portion of the amount
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub gst_amount: Decimal,
    /// PST portion of the amount
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub pst_amount: Decimal,
    /// Date incurred (YYYY-MM-DD)
    pub date: String,
    /// Expense category (snake_case wire name)
    pub category: Category,
    /// Free-form subcategory
    #[serde(default)]
    pub subcategory: Option<String>,
    /// Vehicle this expense belongs to, for vehicle-type expenses
    #[serde(default)]
    pub vehicle_id: Option<String>,
    /// Declared use (personal, home_office_living, vehicle, self_employment, mixed)
    #[serde(default)]
    pub expense_type: ExpenseType,
    /// Business-use share (0-100), applied only to mixed expenses
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub business_use_percentage: Decimal,
    /// Whether the expense is claimable at all
    #[serde(default = "default_true")]
    pub is_tax_deductible: bool,
}

/// A vehicle the user claims expenses against
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, FieldDocs)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Unique identifier from the upstream store
    pub id: String,
    /// Display name (e.g. "2019 Sprinter")
    pub name: String,
}

/// A vehicle's business-use share for one tax year
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, FieldDocs)]
#[serde(rename_all = "camelCase")]
pub struct VehicleUsage {
    /// Vehicle this entry applies to
    pub vehicle_id: String,
    /// Tax year this entry applies to
    pub year: i32,
    /// Business-use share of total use (0-100)
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub business_use_percent: Decimal,
}

/// Whole-year tax figures computed upstream. Authoritative for a full tax
/// year; the engine reproportions them, never recomputes brackets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, FieldDocs)]
#[serde(rename_all = "camelCase")]
pub struct TaxBaseline {
    /// Whole-year gross income the baseline was computed against
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub gross_income: Decimal,
    /// Whole-year federal tax
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub federal_tax: Decimal,
    /// Whole-year provincial tax
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub provincial_tax: Decimal,
    /// Whole-year self-employment CPP contribution
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub cpp_contribution: Decimal,
}

/// User-entered settings and regular-employment figures
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, FieldDocs)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Home-office share of the home (0-100); unset means no apportionment
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    #[schemars(with = "Option<f64>")]
    pub home_office_percent: Option<Decimal>,
    /// Regular-employment income to blend into the summary
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub employment_income: Decimal,
    /// Income tax already withheld through employment payroll
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub taxes_paid_on_employment: Decimal,
    /// CPP already remitted through employment payroll
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schemars(with = "f64")]
    pub cpp_paid_on_employment: Decimal,
}

fn default_true() -> bool {
    true
}

fn parse_lenient(value: serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::Number(n) => match n.to_string().parse() {
            Ok(d) => Some(d),
            Err(_) => {
                log::warn!("treating out-of-range number {} as 0", n);
                None
            }
        },
        serde_json::Value::String(s) => {
            let cleaned = s.trim().trim_start_matches('$').replace(',', "");
            match cleaned.parse() {
                Ok(d) => Some(d),
                Err(_) => {
                    log::warn!("treating non-numeric amount {:?} as 0", s);
                    None
                }
            }
        }
        other => {
            log::warn!("treating non-numeric amount {} as 0", other);
            None
        }
    }
}

/// Permissive money parsing: numbers, numeric strings (with optional "$" and
/// thousands separators), or null. Anything else becomes 0 with a warning -
/// bad data must never take down the summary.
pub(crate) fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(parse_lenient).unwrap_or(Decimal::ZERO))
}

/// As `lenient_decimal`, but absent/null/unparseable stays `None`
pub(crate) fn lenient_decimal_opt<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(parse_lenient))
}
