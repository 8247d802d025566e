use crate::models::TradeRecord;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save fetched evolution records as CSV with header.
pub fn save_csv<P: AsRef<Path>>(records: &[TradeRecord], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("year", "exports", "imports", "balance"))?;
    for r in records {
        wtr.serialize((r.year, r.exports, r.imports, r.balance))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save fetched evolution records as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(records: &[TradeRecord], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(records)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let records = vec![TradeRecord {
            year: 2020,
            exports: 1_250_000.0,
            imports: 980_000.5,
            balance: 269_999.5,
        }];
        save_csv(&records, &csvp).unwrap();
        save_json(&records, &jsonp).unwrap();
        let csv_text = std::fs::read_to_string(&csvp).unwrap();
        assert!(csv_text.starts_with("year,exports,imports,balance"));
        let json_text = std::fs::read_to_string(&jsonp).unwrap();
        assert!(json_text.contains("\"exports\": 1250000.0"));
    }
}
