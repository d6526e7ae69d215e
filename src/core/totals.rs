//! Sum totals over ledger records, overall, per currency and per period

use super::record::{LedgerRecord, Period};
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldTotal {
    pub field: String,
    pub total: Decimal,
}

/// Totals for a set of fields, in the order the fields were requested
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Totals(Vec<FieldTotal>);

impl Totals {
    /// Zero totals for the given fields. Repeated field names are kept once.
    pub fn zero<S: AsRef<str>>(fields: &[S]) -> Self {
        let mut totals: Vec<FieldTotal> = Vec::with_capacity(fields.len());
        for field in fields {
            let field = field.as_ref();
            if !totals.iter().any(|t| t.field == field) {
                totals.push(FieldTotal {
                    field: field.to_string(),
                    total: Decimal::ZERO,
                });
            }
        }
        Totals(totals)
    }

    fn add(&mut self, record: &LedgerRecord) {
        for t in self.0.iter_mut() {
            t.total = add_saturating(&t.field, t.total, record.numeric(&t.field));
        }
    }

    fn accumulate(&mut self, other: &Totals) {
        for (t, o) in self.0.iter_mut().zip(other.0.iter()) {
            t.total = add_saturating(&t.field, t.total, o.total);
        }
    }

    pub fn get(&self, field: &str) -> Option<Decimal> {
        self.0.iter().find(|t| t.field == field).map(|t| t.total)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldTotal> {
        self.0.iter()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|t| t.total.is_zero())
    }
}

/// Add two amounts, clamping to the representable range on overflow
fn add_saturating(field: &str, total: Decimal, value: Decimal) -> Decimal {
    total.checked_add(value).unwrap_or_else(|| {
        log::warn!("Total of {} overflowed and was capped", field);
        if value.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

/// Sum each field over the records. Missing or non-numeric values count as zero.
pub fn sum_fields<'a, I, S>(records: I, fields: &[S]) -> Totals
where
    I: IntoIterator<Item = &'a LedgerRecord>,
    S: AsRef<str>,
{
    let mut totals = Totals::zero(fields);
    for record in records {
        totals.add(record);
    }
    totals
}

/// Totals for one currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyTotals {
    pub currency: Option<String>,
    pub currency_sign: Option<String>,
    pub count: usize,
    pub totals: Totals,
}

/// Totals split by currency, in order of first appearance
pub fn totals_by_currency<'a, I, S>(records: I, fields: &[S]) -> Vec<CurrencyTotals>
where
    I: IntoIterator<Item = &'a LedgerRecord>,
    S: AsRef<str>,
{
    let mut groups: Vec<(Option<&str>, Vec<&LedgerRecord>)> = Vec::new();
    for record in records {
        let currency = record.currency();
        if currency.is_none() {
            log::warn!("Record {:?} has no currency", record.id);
        }
        match groups.iter_mut().find(|(c, _)| *c == currency) {
            Some((_, rows)) => rows.push(record),
            None => groups.push((currency, vec![record])),
        }
    }

    groups
        .into_iter()
        .map(|(currency, rows)| CurrencyTotals {
            currency: currency.map(str::to_string),
            currency_sign: first_sign(&rows),
            count: rows.len(),
            totals: sum_fields(rows.iter().copied(), fields),
        })
        .collect()
}

/// One (period, currency) bucket of a history rollup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodBucket {
    /// Period key, `None` for records without any date information
    pub period: Option<String>,
    pub currency: Option<String>,
    pub currency_sign: Option<String>,
    pub count: usize,
    pub totals: Totals,
    /// Cumulative totals for this currency up to and including this bucket
    pub running: Totals,
}

/// Group records into (period, currency) buckets and compute per-bucket and
/// running totals.
///
/// Buckets come out in ascending period order whatever the input order, with
/// undated records last. Buckets of the same period keep the order in which
/// their currency first appeared.
pub fn group_by_period<'a, I, S>(records: I, period: Period, fields: &[S]) -> Vec<PeriodBucket>
where
    I: IntoIterator<Item = &'a LedgerRecord>,
    S: AsRef<str>,
{
    let mut groups: Vec<(Option<String>, Option<&str>, Vec<&LedgerRecord>)> = Vec::new();
    for record in records {
        let key = record.period_key(period);
        let currency = record.currency();
        match groups
            .iter_mut()
            .find(|(k, c, _)| *k == key && *c == currency)
        {
            Some((_, _, rows)) => rows.push(record),
            None => groups.push((key, currency, vec![record])),
        }
    }
    groups.sort_by(|(a, _, _), (b, _, _)| period_order(a.as_deref(), b.as_deref()));

    let mut running: Vec<(Option<&str>, Totals)> = Vec::new();
    groups
        .into_iter()
        .map(|(key, currency, rows)| {
            let totals = sum_fields(rows.iter().copied(), fields);
            let idx = match running.iter().position(|(c, _)| *c == currency) {
                Some(idx) => idx,
                None => {
                    running.push((currency, Totals::zero(fields)));
                    running.len() - 1
                }
            };
            running[idx].1.accumulate(&totals);
            PeriodBucket {
                period: key,
                currency: currency.map(str::to_string),
                currency_sign: first_sign(&rows),
                count: rows.len(),
                totals,
                running: running[idx].1.clone(),
            }
        })
        .collect()
}

fn period_order(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn first_sign(rows: &[&LedgerRecord]) -> Option<String> {
    rows.iter().find_map(|r| r.sign()).map(str::to_string)
}
