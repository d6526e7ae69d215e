//! History command - the filtered record list of one ledger

use super::render::{projection_table, write_projection_csv};
use super::{load_records, FilterArgs, GlobalOpts, KindArg, SourceArgs};
use crate::core::{filter_records, project, LedgerKind};
use clap::Args;
use std::io;

#[derive(Args, Debug)]
pub struct HistoryCommand {
    /// Ledger to show
    #[arg(value_enum)]
    kind: KindArg,

    #[command(flatten)]
    filter: FilterArgs,

    #[command(flatten)]
    source: SourceArgs,

    /// Output as CSV instead of formatted table
    #[arg(long, conflicts_with = "json")]
    csv: bool,

    /// Output the matching records as JSON
    #[arg(long)]
    json: bool,
}

impl HistoryCommand {
    pub fn exec(&self, global: &GlobalOpts) -> anyhow::Result<()> {
        let kind: LedgerKind = self.kind.into();
        let records = load_records(global, &self.source, kind)?;
        let filter = self.filter.filter_state(&global.default_currency);
        let rows = filter_records(&records, &filter);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }

        let projection = project(rows.iter().copied(), &kind.default_layout());
        if self.csv {
            return write_projection_csv(&projection, io::stdout());
        }

        if projection.is_empty() {
            println!("No records found matching filters");
            return Ok(());
        }
        println!("{} ({})", projection.title.to_uppercase(), filter.describe());
        println!("{}", projection_table(&projection));
        println!("{} of {} records", rows.len(), records.len());
        Ok(())
    }
}
