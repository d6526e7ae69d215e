pub mod history;
pub mod permissions;
pub mod render;
pub mod report;
pub mod schema;
pub mod summary;

use crate::api::{ApiClient, Permissions, Session};
use crate::core::{read_records_json, FilterState, LedgerKind, LedgerRecord, Period, RecordSet};
use crate::core::{CurrencySelection, DEFAULT_CURRENCY};
use anyhow::Context;
use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Connection and policy settings shared by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Base URL of the backend API
    #[arg(
        long,
        global = true,
        env = "LEDGERVIEW_BASE_URL",
        default_value = "http://localhost:8000/api"
    )]
    pub base_url: String,

    /// API token, sent as "Authorization: Token <value>"
    #[arg(long, global = true, env = "LEDGERVIEW_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// File containing the API token (used when --token is not given)
    #[arg(long, global = true, env = "LEDGERVIEW_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// Currency shown when neither --currency nor --any-currency is given
    #[arg(
        long,
        global = true,
        env = "LEDGERVIEW_DEFAULT_CURRENCY",
        default_value = DEFAULT_CURRENCY
    )]
    pub default_currency: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout_secs: u64,
}

impl GlobalOpts {
    pub fn client(&self) -> anyhow::Result<ApiClient> {
        let session = Session::resolve(&self.base_url, self.token.as_deref(), self.token_file.as_deref())
            .with_context(|| match &self.token_file {
                Some(path) => format!("reading token file {}", path.display()),
                None => "reading API token".to_string(),
            })?;
        if !session.has_token() {
            log::warn!("No API token configured; set --token or LEDGERVIEW_TOKEN");
        }
        Ok(ApiClient::new(session, Duration::from_secs(self.timeout_secs)))
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Expense,
    Credit,
    Salary,
}

impl From<KindArg> for LedgerKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Expense => LedgerKind::Expense,
            KindArg::Credit => LedgerKind::Credit,
            KindArg::Salary => LedgerKind::Salary,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum PeriodArg {
    Year,
    #[default]
    Month,
    Day,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Year => Period::Year,
            PeriodArg::Month => Period::Month,
            PeriodArg::Day => Period::Day,
        }
    }
}

/// Period and currency selection
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Year to show (e.g. 2024)
    #[arg(short, long, conflicts_with = "date")]
    pub year: Option<String>,

    /// Month to show, as the backend keys it (e.g. 03)
    #[arg(short, long, conflicts_with = "date")]
    pub month: Option<String>,

    /// Exact day to show (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Currency code to show (defaults to --default-currency)
    #[arg(short, long, conflicts_with = "any_currency")]
    pub currency: Option<String>,

    /// Show records in every currency
    #[arg(long)]
    pub any_currency: bool,
}

impl FilterArgs {
    pub fn filter_state(&self, default_currency: &str) -> FilterState {
        let mut filter = FilterState::new();
        if let Some(year) = &self.year {
            filter = filter.year(year.as_str());
        }
        if let Some(month) = &self.month {
            filter = filter.month(month.as_str());
        }
        if let Some(date) = &self.date {
            filter = filter.date(date.as_str());
        }
        let selection =
            CurrencySelection::resolve(default_currency, self.currency.as_deref(), self.any_currency);
        match selection.code() {
            Some(code) => filter.currency(code),
            None => filter,
        }
    }
}

/// Where ledger records come from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Read the history from a JSON file ("-" for stdin) instead of the API
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

/// Load a ledger history from the chosen source
pub fn load_records(
    global: &GlobalOpts,
    source: &SourceArgs,
    kind: LedgerKind,
) -> anyhow::Result<Vec<LedgerRecord>> {
    match &source.input {
        Some(path) => read_records(path),
        None => fetch_records(global, kind),
    }
}

/// Read records from a JSON file (or stdin with "-")
pub fn read_records(path: &Path) -> anyhow::Result<Vec<LedgerRecord>> {
    if path.as_os_str() == "-" {
        read_from_stdin()
    } else {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let records = read_records_json(BufReader::new(file))
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(records)
    }
}

fn read_from_stdin() -> anyhow::Result<Vec<LedgerRecord>> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    Ok(read_records_json(io::Cursor::new(buffer))?)
}

fn fetch_records(global: &GlobalOpts, kind: LedgerKind) -> anyhow::Result<Vec<LedgerRecord>> {
    let client = global.client()?;
    let permissions = Permissions::fetch(&client).context("checking permissions")?;
    permissions.require(kind.permission())?;

    let set: RecordSet = client
        .get(kind.endpoint())
        .with_context(|| format!("fetching {} history", kind.display().to_lowercase()))?;
    let records = set.into_records();
    log::info!("Fetched {} {} records", records.len(), kind.display().to_lowercase());
    Ok(records)
}
