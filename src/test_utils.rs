//! Fixture helpers shared by the unit tests.

use std::fs;
use std::path::{Path, PathBuf};

/// Writes `contents` to `dir/name` and returns the full path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write fixture");
    path
}
