//! Plain-text numeric table readers.
//!
//! Two layouts are supported:
//! - comma-separated tables with a header row and an integer nanosecond
//!   timestamp in column 0 (`read_stamped_csv`)
//! - whitespace-separated tables without header, `#` comments allowed
//!   (`read_whitespace_table`)

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{LoadError, Result};
use crate::trajectory::TimestampNs;

/// Rows of a timestamped table. `rows[i]` holds columns 1.. of the file row
/// whose timestamp is `stamps[i]`.
#[derive(Debug, Clone, Default)]
pub struct StampedTable {
    pub stamps: Vec<TimestampNs>,
    pub rows: Vec<Vec<f64>>,
}

impl StampedTable {
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    /// Iterates `(stamp, payload)` in file order.
    pub fn iter(&self) -> impl Iterator<Item = (TimestampNs, &[f64])> + '_ {
        self.stamps
            .iter()
            .copied()
            .zip(self.rows.iter().map(Vec::as_slice))
    }
}

/// Returns the path unchanged if it exists.
pub fn check_file_exists(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.exists() {
        Ok(path.to_path_buf())
    } else {
        Err(LoadError::FileNotFound(path.to_path_buf()))
    }
}

/// Parses an integer nanosecond timestamp.
pub fn parse_timestamp_ns(field: &str) -> Option<TimestampNs> {
    field.trim().parse().ok()
}

/// Parses a numeric field. Empty fields read as NaN.
fn parse_value(field: &str) -> Option<f64> {
    let field = field.trim();
    if field.is_empty() {
        return Some(f64::NAN);
    }
    field.parse().ok()
}

/// Reads the records of a comma-separated table, paired with their line
/// numbers.
///
/// The first line is a header and is skipped whatever it holds. Later rows
/// whose first field starts with `#` are comments.
pub(crate) fn read_csv_records(path: impl AsRef<Path>) -> Result<Vec<(usize, StringRecord)>> {
    let path = check_file_exists(path)?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_path(&path)
        .map_err(|source| LoadError::Csv {
            path: path.clone(),
            source,
        })?;

    let mut records = Vec::new();
    for rec in rdr.records() {
        let rec = rec.map_err(|source| LoadError::Csv {
            path: path.clone(),
            source,
        })?;
        if rec.get(0).is_some_and(|field| field.starts_with('#')) {
            continue;
        }
        let line = rec.position().map(|p| p.line() as usize).unwrap_or(0);
        records.push((line, rec));
    }
    Ok(records)
}

/// Parses every field of a row as a number.
pub(crate) fn parse_fields<'a>(
    path: &Path,
    line: usize,
    fields: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<f64>> {
    fields
        .into_iter()
        .map(|field| {
            parse_value(field)
                .ok_or_else(|| LoadError::parse(path, line, format!("invalid number `{}`", field)))
        })
        .collect()
}

/// Reads a comma-separated table whose first row is a header and whose first
/// column is a nanosecond timestamp.
///
/// Every data row must carry at least `min_payload` columns after the stamp.
pub fn read_stamped_csv(path: impl AsRef<Path>, min_payload: usize) -> Result<StampedTable> {
    let path = path.as_ref();
    let mut table = StampedTable::default();
    for (line, rec) in read_csv_records(path)? {
        if rec.len() < min_payload + 1 {
            return Err(LoadError::parse(
                path,
                line,
                format!("expected at least {} columns, got {}", min_payload + 1, rec.len()),
            ));
        }

        let stamp = parse_timestamp_ns(&rec[0]).ok_or_else(|| {
            LoadError::parse(path, line, format!("invalid nanosecond timestamp `{}`", &rec[0]))
        })?;
        let payload = parse_fields(path, line, rec.iter().skip(1))?;

        table.stamps.push(stamp);
        table.rows.push(payload);
    }
    Ok(table)
}

/// Reads a whitespace-separated numeric table. Blank lines and lines starting
/// with `#` are skipped; every row needs at least `min_cols` columns.
pub fn read_whitespace_table(path: impl AsRef<Path>, min_cols: usize) -> Result<Vec<Vec<f64>>> {
    let path = check_file_exists(path)?;
    let file = File::open(&path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;

    let mut rows = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let row = trimmed
            .split_whitespace()
            .map(|field| {
                field.parse::<f64>().map_err(|_| {
                    LoadError::parse(&path, line_no, format!("invalid number `{}`", field))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        if row.len() < min_cols {
            return Err(LoadError::parse(
                &path,
                line_no,
                format!("expected at least {} columns, got {}", min_cols, row.len()),
            ));
        }
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::write_file;
    use tempfile::tempdir;

    #[test]
    fn test_timestamp_keeps_nanosecond_precision() {
        // Beyond 2^53 neighbouring stamps collapse to the same f64.
        let a = parse_timestamp_ns(" 1403636579763555584 ").unwrap();
        let b = parse_timestamp_ns("1403636579763555585").unwrap();
        assert_eq!(a, 1_403_636_579_763_555_584);
        assert_eq!(b - a, 1);
        assert_eq!(a as f64, b as f64);
    }

    #[test]
    fn test_timestamp_rejects_float_text() {
        assert!(parse_timestamp_ns("1.5e9").is_none());
        assert!(parse_timestamp_ns("").is_none());
    }

    #[test]
    fn test_read_stamped_csv_skips_header() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "t.csv",
            "# timestamp, x, y\n100, 1.0, 2.0\n200, 3.0, 4.0\n",
        );

        let table = read_stamped_csv(&path, 2).unwrap();
        assert_eq!(table.stamps, vec![100, 200]);
        assert_eq!(table.rows[1], vec![3.0, 4.0]);
    }

    #[test]
    fn test_read_stamped_csv_empty_field_is_nan() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "t.csv", "h\n100,,2.0\n");

        let table = read_stamped_csv(&path, 2).unwrap();
        assert!(table.rows[0][0].is_nan());
        assert_eq!(table.rows[0][1], 2.0);
    }

    #[test]
    fn test_read_stamped_csv_skips_comment_lines() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "t.csv",
            "# timestamp, x, y\n# units: m\n100, 1.0, 2.0\n# gap\n200, 3.0, 4.0\n",
        );

        let table = read_stamped_csv(&path, 2).unwrap();
        assert_eq!(table.stamps, vec![100, 200]);
    }

    #[test]
    fn test_read_csv_records_header_without_marker() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "t.csv", "a, b\n1, 2\n# note\n3, 4\n");

        let records = read_csv_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, 2);
        assert_eq!(&records[1].1[1], "4");
    }

    #[test]
    fn test_read_stamped_csv_short_row() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "t.csv", "h\n100,1.0\n");

        let err = read_stamped_csv(&path, 3).unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_read_stamped_csv_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_stamped_csv(dir.path().join("nope.csv"), 1).unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound(_)));
    }

    #[test]
    fn test_read_whitespace_table() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "t.txt",
            "# id x y\n1 0.5\t2\n\n2   1e-3 4\n",
        );

        let rows = read_whitespace_table(&path, 3).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![1.0, 0.5, 2.0]);
        assert_eq!(rows[1][1], 1e-3);
    }

    #[test]
    fn test_read_whitespace_table_bad_number() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "t.txt", "1 2 x\n");

        let err = read_whitespace_table(&path, 3).unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 1, .. }));
    }
}
