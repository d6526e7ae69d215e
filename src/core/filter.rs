//! Period and currency filtering of ledger records

use super::record::{normalize_month, LedgerRecord};
use serde::Serialize;

/// The active history filter.
///
/// An exact date and a year/month selection exclude each other: selecting a
/// date clears year and month, selecting a year or month clears the date.
/// Empty selections clear the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    year: Option<String>,
    month: Option<String>,
    date: Option<String>,
    currency: Option<String>,
}

impl FilterState {
    /// A filter that matches every record
    pub fn new() -> Self {
        Self::default()
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.select_year(year);
        self
    }

    pub fn month(mut self, month: impl Into<String>) -> Self {
        self.select_month(month);
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.select_date(date);
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.select_currency(currency);
        self
    }

    pub fn select_year(&mut self, year: impl Into<String>) {
        self.year = selection(year);
        if self.year.is_some() {
            self.date = None;
        }
    }

    pub fn select_month(&mut self, month: impl Into<String>) {
        self.month = selection(month).map(|m| normalize_month(&m));
        if self.month.is_some() {
            self.date = None;
        }
    }

    pub fn select_date(&mut self, date: impl Into<String>) {
        self.date = selection(date);
        if self.date.is_some() {
            self.year = None;
            self.month = None;
        }
    }

    pub fn select_currency(&mut self, currency: impl Into<String>) {
        self.currency = selection(currency);
    }

    pub fn selected_year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    pub fn selected_month(&self) -> Option<&str> {
        self.month.as_deref()
    }

    pub fn selected_date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn selected_currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns `true` if the record satisfies every selected field
    pub fn matches(&self, record: &LedgerRecord) -> bool {
        matches_key(self.currency.as_deref(), record.currency_title.clone())
            && matches_key(self.year.as_deref(), record.year_key())
            && matches_key(self.month.as_deref(), record.month_key())
            && matches_key(self.date.as_deref(), record.day_key())
    }

    /// Short human description, e.g. `2024-03 BDT` or `All periods`
    pub fn describe(&self) -> String {
        let period = match (&self.date, &self.year, &self.month) {
            (Some(d), _, _) => d.clone(),
            (None, Some(y), Some(m)) => format!("{}-{}", y, m),
            (None, Some(y), None) => y.clone(),
            (None, None, Some(m)) => format!("month {}", m),
            (None, None, None) => "All periods".to_string(),
        };
        match &self.currency {
            Some(c) => format!("{} {}", period, c),
            None => period,
        }
    }
}

/// Apply the filter, keeping input order.
pub fn filter_records<'a>(records: &'a [LedgerRecord], filter: &FilterState) -> Vec<&'a LedgerRecord> {
    if filter.is_empty() {
        return records.iter().collect();
    }
    let kept: Vec<_> = records.iter().filter(|r| filter.matches(r)).collect();
    log::debug!(
        "Filter [{}] kept {} of {} records",
        filter.describe(),
        kept.len(),
        records.len()
    );
    kept
}

fn selection(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn matches_key(selected: Option<&str>, actual: Option<String>) -> bool {
    match selected {
        None => true,
        Some(want) => actual.as_deref() == Some(want),
    }
}
