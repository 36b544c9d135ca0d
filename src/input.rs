//! CSV input: one header row, one numeric column per series.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};

/// Reads one column of `path` as an ordered series.
///
/// `column` is a header name or a zero-based index; the first column is
/// used when it is `None`. Every row must hold a finite number in that
/// column; gaps are rejected rather than skipped.
pub fn read_series_csv(path: &Path, column: Option<&str>) -> Result<Vec<f64>> {
    let file =
        File::open(path).with_context(|| format!("failed to open input: {}", path.display()))?;
    read_series(BufReader::new(file), column)
        .with_context(|| format!("failed to read series from {}", path.display()))
}

fn read_series<R: Read>(reader: R, column: Option<&str>) -> Result<Vec<f64>> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers().context("failed to read CSV header")?.clone();

    let col_idx = match column {
        None => 0,
        Some(name) => headers
            .iter()
            .position(|h| h.trim() == name)
            .or_else(|| name.parse::<usize>().ok().filter(|&i| i < headers.len()))
            .ok_or_else(|| anyhow!("column {name:?} not found (available: {headers:?})"))?,
    };

    let mut values = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("malformed CSV record at row {}", row + 1))?;
        let field = record
            .get(col_idx)
            .ok_or_else(|| anyhow!("row {} has no column {col_idx}", row + 1))?
            .trim();
        let value: f64 = field
            .parse()
            .with_context(|| format!("row {}: {field:?} is not a number", row + 1))?;
        if !value.is_finite() {
            bail!("row {}: non-finite value {field:?}", row + 1);
        }
        values.push(value);
    }
    if values.is_empty() {
        bail!("no data rows");
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_first_column_by_default() {
        let data = "conc,flag\n12.5,0\n13.0,1\n";
        assert_eq!(read_series(data.as_bytes(), None).unwrap(), vec![12.5, 13.0]);
    }

    #[test]
    fn selects_by_name_or_index() {
        let data = "week,conc\n1,12.5\n2,13.0\n";
        assert_eq!(read_series(data.as_bytes(), Some("conc")).unwrap(), vec![12.5, 13.0]);
        assert_eq!(read_series(data.as_bytes(), Some("0")).unwrap(), vec![1.0, 2.0]);
        assert!(read_series(data.as_bytes(), Some("flow")).is_err());
        assert!(read_series(data.as_bytes(), Some("2")).is_err());
    }

    #[test]
    fn gaps_are_rejected() {
        let data = "conc\n12.5\n\n13.0\nNA\n";
        let err = read_series(data.as_bytes(), None).unwrap_err();
        assert!(format!("{err:#}").contains("not a number"));
        assert!(read_series("conc\n".as_bytes(), None).is_err());
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("weekly.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "conc").unwrap();
        writeln!(file, "4.2").unwrap();
        writeln!(file, "3.9").unwrap();
        drop(file);
        assert_eq!(read_series_csv(&path, None).unwrap(), vec![4.2, 3.9]);
        assert!(read_series_csv(&dir.path().join("missing.csv"), None).is_err());
    }
}
