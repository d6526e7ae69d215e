//! Report command - project a ledger history into a printable document

mod html;

use super::render::write_projection_csv;
use super::{load_records, FilterArgs, GlobalOpts, KindArg, SourceArgs};
use crate::core::{filter_records, project, totals_by_currency, LedgerKind, ReportLayout};
use anyhow::Context;
use clap::Args;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ReportCommand {
    /// Ledger to report on
    #[arg(value_enum)]
    kind: KindArg,

    #[command(flatten)]
    filter: FilterArgs,

    #[command(flatten)]
    source: SourceArgs,

    /// JSON layout file with title and columns (default: the ledger's standard layout)
    #[arg(short, long, conflicts_with = "keys")]
    layout: Option<PathBuf>,

    /// Column heading (repeatable, one per --key)
    #[arg(long = "heading", requires = "keys")]
    headings: Vec<String>,

    /// Record field shown in a column (repeatable)
    #[arg(long = "key")]
    keys: Vec<String>,

    /// Field key whose values get the currency sign (repeatable)
    #[arg(long = "currency-key", requires = "keys")]
    currency_keys: Vec<String>,

    /// Report title when building columns from --heading/--key
    #[arg(long, requires = "keys")]
    title: Option<String>,

    /// Output file path (default: opens in browser)
    #[arg(short, long, conflicts_with = "csv")]
    output: Option<PathBuf>,

    /// Write the projected rows as CSV to stdout instead of a document
    #[arg(long)]
    csv: bool,
}

impl ReportCommand {
    pub fn exec(&self, global: &GlobalOpts) -> anyhow::Result<()> {
        let kind: LedgerKind = self.kind.into();
        let layout = self.layout(kind)?;

        let records = load_records(global, &self.source, kind)?;
        let filter = self.filter.filter_state(&global.default_currency);
        let rows = filter_records(&records, &filter);
        let projection = project(rows.iter().copied(), &layout);

        if self.csv {
            return write_projection_csv(&projection, io::stdout());
        }

        let currency_fields: Vec<&str> = layout
            .columns
            .iter()
            .filter(|c| c.currency)
            .map(|c| c.key.as_str())
            .collect();
        let totals = totals_by_currency(rows.iter().copied(), &currency_fields);
        let document = html::generate(&projection, &filter, &totals);

        if let Some(ref output_path) = self.output {
            std::fs::write(output_path, &document)
                .with_context(|| format!("writing {}", output_path.display()))?;
            println!("Report written to: {}", output_path.display());
        } else {
            // Write to temp file and open in browser
            let temp_path = std::env::temp_dir()
                .join(format!("ledgerview-{}.html", projection.fingerprint()));
            std::fs::write(&temp_path, &document)?;
            opener::open(&temp_path)?;
            println!("Opened report in browser: {}", temp_path.display());
        }
        log::info!("Report has {} rows", projection.rows.len());

        Ok(())
    }

    fn layout(&self, kind: LedgerKind) -> anyhow::Result<ReportLayout> {
        if let Some(path) = &self.layout {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            return ReportLayout::read_json(BufReader::new(file))
                .with_context(|| format!("reading layout {}", path.display()));
        }
        if self.keys.is_empty() {
            return Ok(kind.default_layout());
        }
        let headings = if self.headings.is_empty() {
            &self.keys
        } else {
            &self.headings
        };
        let title = match &self.title {
            Some(title) => title.clone(),
            None => format!("{} Report", kind.display()),
        };
        Ok(ReportLayout::from_parts(&title, headings, &self.keys, &self.currency_keys)?)
    }
}
