//! Timestamp / frame-id correspondence tables.

use std::collections::HashMap;
use std::path::Path;

use super::table::{parse_timestamp_ns, read_csv_records, read_whitespace_table};
use crate::error::{LoadError, Result};

/// Lookup from an estimate key to its ground-truth key.
///
/// Keys are nanosecond timestamps for the CSV format and frame ids for the
/// legacy layouts. When a key appears twice the later row wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchTable {
    lut: HashMap<i64, i64>,
    pairs: Vec<(i64, i64)>,
}

impl MatchTable {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (i64, i64)>) -> Self {
        let pairs: Vec<(i64, i64)> = pairs.into_iter().collect();
        let lut = pairs.iter().copied().collect();
        Self { lut, pairs }
    }

    /// Ground-truth key matched to `es_key`, if any.
    pub fn get(&self, es_key: i64) -> Option<i64> {
        self.lut.get(&es_key).copied()
    }

    pub fn contains(&self, es_key: i64) -> bool {
        self.lut.contains_key(&es_key)
    }

    /// Number of distinct estimate keys.
    pub fn len(&self) -> usize {
        self.lut.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lut.is_empty()
    }

    /// Pairs in file order, duplicates included.
    pub fn pairs(&self) -> &[(i64, i64)] {
        &self.pairs
    }

    pub fn as_map(&self) -> &HashMap<i64, i64> {
        &self.lut
    }
}

/// Reads a comma-separated match file: header row, then
/// `es_timestamp, gt_timestamp` integer pairs.
pub fn read_match_csv(path: impl AsRef<Path>) -> Result<MatchTable> {
    let path = path.as_ref();
    let mut pairs = Vec::new();
    for (line, rec) in read_csv_records(path)? {
        if rec.len() != 2 {
            return Err(LoadError::parse(
                path,
                line,
                format!("expected 2 columns, got {}", rec.len()),
            ));
        }

        let es = parse_timestamp_ns(&rec[0]);
        let gt = parse_timestamp_ns(&rec[1]);
        match (es, gt) {
            (Some(es), Some(gt)) => pairs.push((es, gt)),
            _ => {
                return Err(LoadError::parse(
                    path,
                    line,
                    format!("invalid match pair `{}, {}`", &rec[0], &rec[1]),
                ));
            }
        }
    }
    Ok(MatchTable::from_pairs(pairs))
}

/// Reads a whitespace-separated match file of frame ids (no header).
pub fn read_match_whitespace(path: impl AsRef<Path>) -> Result<MatchTable> {
    let rows = read_whitespace_table(path, 2)?;
    Ok(MatchTable::from_pairs(
        rows.iter().map(|row| (row[0] as i64, row[1] as i64)),
    ))
}
