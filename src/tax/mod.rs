pub mod aggregate;
pub mod cpp;
pub mod deduction;
pub mod proration;
pub mod year;

// Flat public surface for the calculation engine.
pub use aggregate::{
    gst_hst_summary, totals_by_category, year_totals, CategoryTotal, GstHstSummary, YearTotals,
    TOP_CATEGORIES_REPORT, TOP_CATEGORIES_SUMMARY,
};
pub use cpp::{CppParameters, CppTable};
pub use deduction::{Deduction, DeductionContext};
pub use proration::{
    combine_with_employment, reproportion, tax_summary, CombinedTaxes, EmploymentInput,
    ProratedTaxes, TaxSummary,
};
pub use year::{filter_by_year, Dated, TaxYear};
