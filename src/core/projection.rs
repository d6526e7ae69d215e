//! Row-major projection of records for tabular reports

use super::record::LedgerRecord;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::io::Read;

/// Shown in place of null or missing values
pub const PLACEHOLDER: &str = "-";

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("layout has no columns")]
    Empty,
    #[error("{headings} headings given for {keys} field keys")]
    Mismatch { headings: usize, keys: usize },
    #[error("currency field '{0}' is not one of the layout's field keys")]
    UnknownCurrencyField(String),
    #[error("invalid layout file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One report column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Column {
    /// Column heading
    pub heading: String,
    /// Record field to show
    pub key: String,
    /// Prefix values with the record's currency sign
    #[serde(default)]
    pub currency: bool,
}

/// Report descriptor: title plus columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportLayout {
    pub title: String,
    pub columns: Vec<Column>,
}

impl ReportLayout {
    /// Build a layout from parallel heading and key lists, marking the keys in
    /// `currency_keys` as currency columns.
    pub fn from_parts<S: AsRef<str>>(
        title: &str,
        headings: &[S],
        keys: &[S],
        currency_keys: &[S],
    ) -> Result<Self, LayoutError> {
        if headings.len() != keys.len() {
            return Err(LayoutError::Mismatch {
                headings: headings.len(),
                keys: keys.len(),
            });
        }
        if let Some(unknown) = currency_keys
            .iter()
            .find(|c| !keys.iter().any(|k| k.as_ref() == c.as_ref()))
        {
            return Err(LayoutError::UnknownCurrencyField(unknown.as_ref().to_string()));
        }
        let columns = headings
            .iter()
            .zip(keys.iter())
            .map(|(heading, key)| Column {
                heading: heading.as_ref().to_string(),
                key: key.as_ref().to_string(),
                currency: currency_keys.iter().any(|c| c.as_ref() == key.as_ref()),
            })
            .collect();
        ReportLayout {
            title: title.to_string(),
            columns,
        }
        .validated()
    }

    /// Read a layout from JSON
    pub fn read_json<R: Read>(reader: R) -> Result<Self, LayoutError> {
        let layout: ReportLayout = serde_json::from_reader(reader)?;
        layout.validated()
    }

    fn validated(self) -> Result<Self, LayoutError> {
        if self.columns.is_empty() {
            return Err(LayoutError::Empty);
        }
        Ok(self)
    }

    pub fn headings(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.heading.clone()).collect()
    }
}

/// Projected report content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    pub title: String,
    pub headings: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Projection {
    /// Short content hash over headings and cells, stable for identical reports
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.title.as_bytes());
        for cell in self.headings.iter().chain(self.rows.iter().flatten()) {
            hasher.update([0x1f_u8]);
            hasher.update(cell.as_bytes());
        }
        hex::encode(hasher.finalize())[..12].to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Project records into report rows. One output row per input record, in order.
pub fn project<'a, I>(records: I, layout: &ReportLayout) -> Projection
where
    I: IntoIterator<Item = &'a LedgerRecord>,
{
    let rows = records
        .into_iter()
        .map(|record| {
            layout
                .columns
                .iter()
                .map(|column| project_cell(record, column))
                .collect()
        })
        .collect();
    Projection {
        title: layout.title.clone(),
        headings: layout.headings(),
        rows,
    }
}

fn project_cell(record: &LedgerRecord, column: &Column) -> String {
    let Some(text) = record.field(&column.key).as_ref().and_then(stringify) else {
        return PLACEHOLDER.to_string();
    };
    match (column.currency, record.sign()) {
        (true, Some(sign)) => format!("{}{}", sign, text),
        _ => text,
    }
}

fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(value: Value) -> LedgerRecord {
        serde_json::from_value(value).unwrap()
    }

    fn layout() -> ReportLayout {
        ReportLayout::from_parts(
            "Expenses",
            &["Date", "Purpose", "Amount"],
            &["start_date", "purpose", "amount"],
            &["amount"],
        )
        .unwrap()
    }

    #[test]
    fn currency_fields_get_the_sign() {
        let records = vec![rec(json!({
            "start_date": "2024-01-02",
            "purpose": "Rent",
            "amount": "1200.00",
            "currency_sign": "৳",
        }))];
        let projection = project(&records, &layout());
        assert_eq!(projection.headings, vec!["Date", "Purpose", "Amount"]);
        assert_eq!(projection.rows[0], vec!["2024-01-02", "Rent", "৳1200.00"]);
    }

    #[test]
    fn missing_values_use_placeholder() {
        let records = vec![rec(json!({ "purpose": null, "currency_sign": "$" }))];
        let projection = project(&records, &layout());
        assert_eq!(projection.rows[0], vec![PLACEHOLDER; 3]);
    }

    #[test]
    fn values_are_stringified_as_is() {
        let records = vec![rec(json!({ "purpose": 42, "amount": 7.5 }))];
        let projection = project(&records, &layout());
        assert_eq!(projection.rows[0], vec!["-", "42", "7.5"]);
    }

    #[test]
    fn never_drops_rows() {
        let records: Vec<_> = (0..5)
            .map(|i| {
                let amount = if i % 2 == 0 { Value::Null } else { json!("1") };
                rec(json!({ "id": i, "amount": amount }))
            })
            .collect();
        let projection = project(&records, &layout());
        assert_eq!(projection.rows.len(), records.len());
        assert!(project(&Vec::<LedgerRecord>::new(), &layout()).is_empty());
    }

    #[test]
    fn keeps_row_order() {
        let records = vec![
            rec(json!({ "purpose": "first" })),
            rec(json!({ "purpose": "second" })),
        ];
        let projection = project(&records, &layout());
        assert_eq!(projection.rows[0][1], "first");
        assert_eq!(projection.rows[1][1], "second");
    }

    #[test]
    fn layout_parts_must_line_up() {
        let err = ReportLayout::from_parts("x", &["A"], &["a", "b"], &[]).unwrap_err();
        assert!(matches!(err, LayoutError::Mismatch { headings: 1, keys: 2 }));

        let err = ReportLayout::from_parts("x", &["A"], &["a"], &["b"]).unwrap_err();
        assert!(matches!(err, LayoutError::UnknownCurrencyField(f) if f == "b"));

        let err = ReportLayout::from_parts::<&str>("x", &[], &[], &[]).unwrap_err();
        assert!(matches!(err, LayoutError::Empty));
    }

    #[test]
    fn layout_from_json() {
        let json = r#"{
            "title": "Salaries",
            "columns": [
                { "heading": "Employee", "key": "employee" },
                { "heading": "Paid", "key": "amount", "currency": true }
            ]
        }"#;
        let layout = ReportLayout::read_json(json.as_bytes()).unwrap();
        assert_eq!(layout.title, "Salaries");
        assert!(!layout.columns[0].currency);
        assert!(layout.columns[1].currency);

        let empty = r#"{ "title": "Nothing", "columns": [] }"#;
        assert!(matches!(
            ReportLayout::read_json(empty.as_bytes()),
            Err(LayoutError::Empty)
        ));
    }

    #[test]
    fn fingerprint_tracks_content() {
        let a = vec![rec(json!({ "purpose": "Rent" }))];
        let b = vec![rec(json!({ "purpose": "Fuel" }))];
        let pa = project(&a, &layout());
        assert_eq!(pa.fingerprint(), project(&a, &layout()).fingerprint());
        assert_ne!(pa.fingerprint(), project(&b, &layout()).fingerprint());
        assert_eq!(pa.fingerprint().len(), 12);
    }
}
