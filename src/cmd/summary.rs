//! Summary command - per-currency totals and period rollups

use super::{load_records, FilterArgs, GlobalOpts, KindArg, PeriodArg, SourceArgs};
use crate::core::{
    filter_records, format_amount, group_by_period, totals_by_currency, CurrencyTotals,
    FilterState, LedgerKind, Period, PeriodBucket, Totals,
};
use clap::Args;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
};

#[derive(Args, Debug)]
pub struct SummaryCommand {
    /// Ledger to summarise
    #[arg(value_enum)]
    kind: KindArg,

    #[command(flatten)]
    filter: FilterArgs,

    #[command(flatten)]
    source: SourceArgs,

    /// Field to total (repeatable); defaults depend on the ledger
    #[arg(short = 'f', long = "field")]
    fields: Vec<String>,

    /// Also break totals down by period; buckets run oldest first, undated last
    #[arg(short, long, value_enum)]
    by: Option<PeriodArg>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// Summary data for JSON output
#[derive(Debug, Serialize)]
struct SummaryData {
    ledger: String,
    filter: FilterState,
    record_count: usize,
    currencies: Vec<CurrencyTotals>,
    #[serde(skip_serializing_if = "Option::is_none")]
    period: Option<Period>,
    #[serde(skip_serializing_if = "Option::is_none")]
    buckets: Option<Vec<PeriodBucket>>,
}

impl SummaryCommand {
    pub fn exec(&self, global: &GlobalOpts) -> anyhow::Result<()> {
        let kind: LedgerKind = self.kind.into();
        let fields: Vec<String> = if self.fields.is_empty() {
            kind.default_sum_fields().iter().map(|f| f.to_string()).collect()
        } else {
            self.fields.clone()
        };

        let records = load_records(global, &self.source, kind)?;
        let filter = self.filter.filter_state(&global.default_currency);
        let rows = filter_records(&records, &filter);

        let mut currencies = totals_by_currency(rows.iter().copied(), &fields);
        if currencies.is_empty() {
            if let Some(code) = filter.selected_currency() {
                currencies.push(CurrencyTotals {
                    currency: Some(code.to_string()),
                    currency_sign: None,
                    count: 0,
                    totals: Totals::zero(&fields),
                });
            }
        }

        let period: Option<Period> = self.by.map(Into::into);
        let buckets = period.map(|p| group_by_period(rows.iter().copied(), p, &fields));

        let data = SummaryData {
            ledger: kind.display().to_string(),
            filter,
            record_count: rows.len(),
            currencies,
            period,
            buckets,
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&data)?);
        } else {
            print_summary(&data);
        }
        Ok(())
    }
}

fn print_summary(data: &SummaryData) {
    println!();
    println!(
        "{} SUMMARY ({})",
        data.ledger.to_uppercase(),
        data.filter.describe()
    );
    println!();

    if data.record_count == 0 {
        println!("No records found matching filters");
    }

    for group in &data.currencies {
        let currency = group.currency.as_deref().unwrap_or("(no currency)");
        println!("{} - {} records", currency, group.count);
        if group.count == 0 && group.totals.is_zero() {
            println!("  nothing recorded");
            println!();
            continue;
        }
        for total in group.totals.iter() {
            println!(
                "  {}: {}",
                total.field,
                format_amount(group.currency_sign.as_deref(), total.total)
            );
        }
        println!();
    }

    if let (Some(period), Some(buckets)) = (data.period, &data.buckets) {
        if buckets.is_empty() {
            return;
        }
        let label = match period {
            Period::Year => "YEAR",
            Period::Month => "MONTH",
            Period::Day => "DAY",
        };
        println!("BY {}", label);
        println!("{}", bucket_table(buckets));
        println!();
    }
}

fn bucket_table(buckets: &[PeriodBucket]) -> String {
    let mut builder = Builder::default();

    let fields: Vec<&str> = buckets
        .first()
        .map(|b| b.totals.iter().map(|t| t.field.as_str()).collect())
        .unwrap_or_default();

    let mut header = vec!["Period".to_string(), "Currency".to_string(), "Records".to_string()];
    for field in &fields {
        header.push(field.to_string());
        header.push(format!("{} (running)", field));
    }
    builder.push_record(header);

    for bucket in buckets {
        let sign = bucket.currency_sign.as_deref();
        let mut row = vec![
            bucket.period.clone().unwrap_or_else(|| "undated".to_string()),
            bucket.currency.clone().unwrap_or_else(|| "-".to_string()),
            bucket.count.to_string(),
        ];
        for field in &fields {
            let total = bucket.totals.get(field).unwrap_or_default();
            let running = bucket.running.get(field).unwrap_or_default();
            row.push(format_amount(sign, total));
            row.push(format_amount(sign, running));
        }
        builder.push_record(row);
    }

    builder
        .build()
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
        .to_string()
}
