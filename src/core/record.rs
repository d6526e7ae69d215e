use super::money::amount_or_zero;
use super::schema::SchemaField;
use chrono::NaiveDate;
use ledgerview_derive::FieldSchema;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::Read;

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("malformed record data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("backend reported failure: {0}")]
    Rejected(String),
    #[error("response envelope has no data")]
    MissingData,
}

/// A single credit, expense or salary line as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema, FieldSchema)]
pub struct LedgerRecord {
    /// Backend identifier (string or number)
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    /// Currency code, e.g. BDT or USD
    #[serde(default, alias = "currency__currency")]
    pub currency_title: Option<String>,
    /// Display glyph for the currency, e.g. ৳ or $
    #[serde(default)]
    pub currency_sign: Option<String>,
    /// Year period key; derived from start_date when absent
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: Option<String>,
    /// Month period key; derived from start_date (as MM) when absent
    #[serde(default, deserialize_with = "string_or_number")]
    pub month: Option<String>,
    /// Day period key; derived from start_date (as YYYY-MM-DD) when absent
    #[serde(default)]
    pub day: Option<String>,
    /// First day covered by the record (YYYY-MM-DD, may carry a time suffix)
    #[serde(default)]
    pub start_date: Option<String>,
    /// Last day covered by the record
    #[serde(default)]
    pub end_date: Option<String>,
    /// Every other backend field, including `amount`/`total` and salary components
    #[serde(flatten)]
    #[schemars(with = "BTreeMap<String, Value>")]
    pub fields: Map<String, Value>,
}

/// Period granularity for keys and buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Year,
    #[default]
    Month,
    Day,
}

impl LedgerRecord {
    /// Look up a field by its backend name.
    ///
    /// `amount` and `total` name the same value: whichever one the backend sent
    /// is returned for either key. Period keys are returned derived when the
    /// backend did not send them.
    pub fn field(&self, key: &str) -> Option<Value> {
        let text = |s: Option<String>| s.map(Value::String);
        match key {
            "id" => text(self.id.clone()),
            "currency_title" | "currency__currency" => text(self.currency_title.clone()),
            "currency_sign" => text(self.currency_sign.clone()),
            "year" => text(self.year_key()),
            "month" => text(self.month_key()),
            "day" => text(self.day_key()),
            "start_date" => text(self.start_date.clone()),
            "end_date" => text(self.end_date.clone()),
            "amount" | "total" => {
                let other = if key == "amount" { "total" } else { "amount" };
                self.fields
                    .get(key)
                    .filter(|v| !v.is_null())
                    .or_else(|| self.fields.get(other))
                    .cloned()
            }
            _ => self.fields.get(key).cloned(),
        }
    }

    /// Numeric value of a field; missing or non-numeric values are zero
    pub fn numeric(&self, key: &str) -> Decimal {
        amount_or_zero(self.field(key).as_ref())
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency_title.as_deref()
    }

    pub fn sign(&self) -> Option<&str> {
        self.currency_sign.as_deref()
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start_date.as_deref().and_then(parse_date_prefix)
    }

    pub fn year_key(&self) -> Option<String> {
        non_empty(&self.year).or_else(|| self.start().map(|d| d.format("%Y").to_string()))
    }

    pub fn month_key(&self) -> Option<String> {
        non_empty(&self.month)
            .map(|m| normalize_month(&m))
            .or_else(|| self.start().map(|d| d.format("%m").to_string()))
    }

    pub fn day_key(&self) -> Option<String> {
        non_empty(&self.day).or_else(|| self.start().map(|d| d.format("%Y-%m-%d").to_string()))
    }

    /// Bucket key at the given granularity. Month keys carry the year so that
    /// the same month of different years stays apart.
    pub fn period_key(&self, period: Period) -> Option<String> {
        match period {
            Period::Year => self.year_key(),
            Period::Month => match (self.year_key(), self.month_key()) {
                (Some(y), Some(m)) => Some(format!("{}-{}", y, m)),
                (None, m) => m,
                (Some(_), None) => None,
            },
            Period::Day => self.day_key(),
        }
    }
}

/// Shape of the `data` member of a ledger history response
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RecordSet {
    List(Vec<LedgerRecord>),
    /// Records keyed by currency code
    ByCurrency(BTreeMap<String, Vec<LedgerRecord>>),
}

impl RecordSet {
    /// Flatten into a single list. Records under a currency key that carry no
    /// currency of their own take the key.
    pub fn into_records(self) -> Vec<LedgerRecord> {
        match self {
            RecordSet::List(records) => records,
            RecordSet::ByCurrency(groups) => groups
                .into_iter()
                .flat_map(|(currency, records)| {
                    records.into_iter().map(move |mut record| {
                        if record.currency_title.as_deref().map_or(true, str::is_empty) {
                            record.currency_title = Some(currency.clone());
                        }
                        record
                    })
                })
                .collect(),
        }
    }
}

/// Read a ledger history from JSON.
///
/// Accepts the backend envelope (`{ success, data, message? }`) or a bare
/// record list / currency map.
pub fn read_records_json<R: Read>(reader: R) -> Result<Vec<LedgerRecord>, RecordError> {
    let value: Value = serde_json::from_reader(reader)?;
    let data = match value {
        Value::Object(mut obj) if obj.contains_key("success") => {
            let success = obj.get("success").and_then(Value::as_bool).unwrap_or(false);
            if !success {
                let message = obj
                    .get("message")
                    .and_then(Value::as_str)
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or("request was not successful")
                    .to_string();
                return Err(RecordError::Rejected(message));
            }
            match obj.remove("data") {
                None | Some(Value::Null) => return Err(RecordError::MissingData),
                Some(data) => data,
            }
        }
        other => other,
    };
    let set: RecordSet = serde_json::from_value(data)?;
    let records = set.into_records();
    log::info!("Read {} ledger records", records.len());
    Ok(records)
}

fn parse_date_prefix(s: &str) -> Option<NaiveDate> {
    let head = s.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Two-digit form of a numeric month (`3` → `03`); other text is only trimmed
pub fn normalize_month(month: &str) -> String {
    let month = month.trim();
    match month.parse::<u32>() {
        Ok(n @ 1..=12) if month.bytes().all(|b| b.is_ascii_digit()) => format!("{:02}", n),
        _ => month.to_string(),
    }
}

fn non_empty(s: &Option<String>) -> Option<String> {
    s.as_ref().filter(|s| !s.trim().is_empty()).cloned()
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, found {}",
            other
        ))),
    }
}
