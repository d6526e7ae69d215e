pub mod currency;
pub mod filter;
pub mod kind;
pub mod money;
pub mod projection;
pub mod record;
pub mod schema;
pub mod totals;

// Flat public surface for domain types and functions.
pub use currency::{CurrencySelection, DEFAULT_CURRENCY};
pub use filter::{filter_records, FilterState};
pub use kind::LedgerKind;
pub use money::format_amount;
#[allow(unused_imports)]
pub use projection::{project, Column, LayoutError, Projection, ReportLayout, PLACEHOLDER};
#[allow(unused_imports)]
pub use record::{read_records_json, LedgerRecord, Period, RecordError, RecordSet};
#[allow(unused_imports)]
pub use schema::SchemaField;
pub use totals::{group_by_period, totals_by_currency, CurrencyTotals, PeriodBucket, Totals};
