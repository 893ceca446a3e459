use crate::error::Result;
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    tracing::info!(path = %path.display(), rows = rows.len(), "wrote board export");
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Markdown table of the first `max_rows` rows.
pub fn render_table<T>(rows: &[T], max_rows: usize) -> String
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(slice).with(Style::markdown()).to_string()
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("{}\n", render_table(rows, max_rows));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExpirationBoardRow, FleetRow, Status};

    #[test]
    fn renders_markdown_with_header() {
        let rows = vec![FleetRow {
            id: "T-10".into(),
            plate: "AB123CD".into(),
            model: "Scania".into(),
            year: "2019".into(),
        }];
        let out = render_table(&rows, 5);
        assert!(out.contains("| Unit"));
        assert!(out.contains("AB123CD"));
        assert_eq!(render_table::<FleetRow>(&[], 5), "(no rows)");
    }

    #[test]
    fn writes_csv_and_json_exports() {
        let dir = tempfile::tempdir().unwrap();
        let rows = vec![ExpirationBoardRow {
            holder: "T-10".into(),
            document: "Seguro".into(),
            expiry_date: "31/12/2099".into(),
            days_left: 27393,
            status: Status::Ok,
        }];
        let csv_path = dir.path().join("board.csv");
        write_csv(&csv_path, &rows).unwrap();
        let text = std::fs::read_to_string(&csv_path).unwrap();
        assert!(text.starts_with("Holder,Document,ExpiryDate,DaysLeft,Status"));
        assert!(text.contains("T-10,Seguro,31/12/2099,27393,ok"));

        let json_path = dir.path().join("rows.json");
        write_json(&json_path, &rows).unwrap();
        let v: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(v[0]["Status"], "ok");
    }
}
