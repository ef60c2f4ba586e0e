//! Schema command - print the snapshot document contract

use crate::records::{
    ExpenseRecord, FieldDoc, IncomeDeductions, IncomeRecord, Profile, TaxBaseline, Vehicle,
    VehicleUsage,
};
use crate::snapshot::Snapshot;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema or fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the snapshot document
    JsonSchema,
    /// Annotated field listing
    Fields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::Fields => self.print_fields(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(Snapshot);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_fields(&self) -> anyhow::Result<()> {
        println!("Snapshot Document");
        println!("=================");

        let sections: &[(&str, &[FieldDoc])] = &[
            ("snapshot", Snapshot::field_docs()),
            ("incomes[]", IncomeRecord::field_docs()),
            ("incomes[].deductions", IncomeDeductions::field_docs()),
            ("expenses[]", ExpenseRecord::field_docs()),
            ("vehicles[]", Vehicle::field_docs()),
            ("vehicleUsage[]", VehicleUsage::field_docs()),
            ("baseline", TaxBaseline::field_docs()),
            ("profile", Profile::field_docs()),
        ];

        for (section, docs) in sections {
            println!();
            println!("{}", section);
            for doc in *docs {
                let req = if doc.required { "required" } else { "optional" };
                println!("  {:24} ({:8})  {}", doc.name, req, doc.description);
            }
        }

        println!();
        println!("All money fields accept a number, a numeric string, or null (read as 0).");
        println!("Dates are plain YYYY-MM-DD strings; the year is the leading digit prefix.");
        Ok(())
    }
}
