//! Schema command - print expected input formats

use crate::core::{LedgerRecord, RecordSet, ReportLayout};
use clap::Args;
use schemars::{schema_for, JsonSchema};
use serde::Deserialize;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema, fields or layout
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for a ledger history response
    JsonSchema,
    /// Record field descriptions
    Fields,
    /// JSON Schema for report layout files
    Layout,
}

/// Response envelope of the history endpoints
#[allow(dead_code)]
#[derive(Deserialize, JsonSchema)]
struct HistoryResponse {
    success: bool,
    data: RecordSet,
    #[serde(default)]
    message: Option<String>,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => {
                let schema = schema_for!(HistoryResponse);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::Fields => print_fields(),
            SchemaFormat::Layout => {
                let schema = schema_for!(ReportLayout);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
        }
        Ok(())
    }
}

fn print_fields() {
    println!("Ledger Record Fields");
    println!("====================");
    println!();
    for field in LedgerRecord::field_schema() {
        let req = if field.required { "required" } else { "optional" };
        println!("{:20} ({:8})  {}", field.name, req, field.description);
        for alias in field.aliases {
            println!("{:20}             also accepted as {}", "", alias);
        }
    }
    println!();
    println!("Any other field (amount, total, bonus, ...) is kept as sent and may be");
    println!("summed or shown in a layout; non-numeric values count as zero.");
}
