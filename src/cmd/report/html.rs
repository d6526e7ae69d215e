//! Self-contained HTML document for a projected report.

use crate::core::{format_amount, CurrencyTotals, FilterState, Projection};

const CSS: &str = r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 2rem; color: #222; }
h1 { font-size: 1.4rem; margin-bottom: 0.2rem; }
.subtitle { color: #666; margin-bottom: 1.5rem; }
table { border-collapse: collapse; width: 100%; font-size: 0.9rem; }
th, td { border: 1px solid #ccc; padding: 0.35rem 0.6rem; }
th { background: #f3f3f3; text-align: left; }
td { text-align: right; }
td:first-child { text-align: left; }
.empty { color: #888; font-style: italic; }
.totals { margin-top: 1.5rem; }
.totals td, .totals th { border: none; padding: 0.2rem 0.6rem; }
footer { margin-top: 2rem; color: #999; font-size: 0.75rem; }
@media print { body { margin: 0; } footer { position: fixed; bottom: 0; } }
"#;

/// Generate the report document
pub fn generate(projection: &Projection, filter: &FilterState, totals: &[CurrencyTotals]) -> String {
    let title = escape(&projection.title);

    let header: String = projection
        .headings
        .iter()
        .map(|h| format!("<th>{}</th>", escape(h)))
        .collect();

    let body = if projection.rows.is_empty() {
        format!(
            r#"<tr><td class="empty" colspan="{}">No records found matching filters</td></tr>"#,
            projection.headings.len().max(1)
        )
    } else {
        projection
            .rows
            .iter()
            .map(|row| {
                let cells: String = row.iter().map(|c| format!("<td>{}</td>", escape(c))).collect();
                format!("<tr>{}</tr>\n", cells)
            })
            .collect()
    };

    let totals_rows: String = totals
        .iter()
        .flat_map(|group| {
            let currency = group.currency.as_deref().unwrap_or("-");
            let sign = group.currency_sign.as_deref();
            let count = group.count;
            group.totals.iter().map(move |t| {
                format!(
                    "<tr><th>{} {}</th><td>{}</td><td>{} records</td></tr>\n",
                    escape(currency),
                    escape(&t.field),
                    escape(&format_amount(sign, t.total)),
                    count
                )
            })
        })
        .collect();
    let totals_section = if totals_rows.is_empty() {
        String::new()
    } else {
        format!(
            r#"<table class="totals"><tbody>
{}</tbody></table>"#,
            totals_rows
        )
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <div class="subtitle">{subtitle}</div>
    <table>
        <thead><tr>{header}</tr></thead>
        <tbody>
{body}        </tbody>
    </table>
    {totals_section}
    <footer>Generated {generated} &middot; {rows} rows &middot; ref {fingerprint}</footer>
</body>
</html>
"##,
        title = title,
        css = CSS,
        subtitle = escape(&filter.describe()),
        header = header,
        body = body,
        totals_section = totals_section,
        generated = chrono::Local::now().format("%Y-%m-%d %H:%M"),
        rows = projection.rows.len(),
        fingerprint = projection.fingerprint(),
    )
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
