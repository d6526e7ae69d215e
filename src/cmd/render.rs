//! Terminal and CSV rendering of projected rows

use crate::core::Projection;
use std::io::Write;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

pub fn projection_table(projection: &Projection) -> String {
    let mut builder = Builder::default();
    builder.push_record(projection.headings.iter().cloned());
    for row in &projection.rows {
        builder.push_record(row.iter().cloned());
    }
    builder
        .build()
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string()
}

pub fn write_projection_csv<W: Write>(projection: &Projection, writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&projection.headings)?;
    for row in &projection.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection() -> Projection {
        Projection {
            title: "Expense History".to_string(),
            headings: vec!["Purpose".to_string(), "Amount".to_string()],
            rows: vec![
                vec!["Rent, March".to_string(), "৳1200.00".to_string()],
                vec!["Fuel".to_string(), "-".to_string()],
            ],
        }
    }

    #[test]
    fn csv_has_header_and_rows() {
        let mut out = Vec::new();
        write_projection_csv(&projection(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Purpose,Amount");
        assert_eq!(lines[1], "\"Rent, March\",৳1200.00");
        assert_eq!(lines[2], "Fuel,-");
    }

    #[test]
    fn table_contains_cells() {
        let table = projection_table(&projection());
        assert!(table.contains("Purpose"));
        assert!(table.contains("৳1200.00"));
        assert!(table.contains("Fuel"));
    }
}
