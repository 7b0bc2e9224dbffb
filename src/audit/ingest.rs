//! Discovery and loading of access-log CSV exports.
//!
//! Input paths may be files or directories. Directories are walked
//! recursively for `*.csv`, `*.csv.gz` and `*.csv.zst`. Every file is read
//! into a [`RawTable`] on its own rayon worker; a file that cannot be read
//! becomes an [`IngestionError`] and the rest of the batch carries on.

use crate::audit::error::IngestionError;
use crate::audit::types::RawTable;
use crate::utils::parallel::process_files_parallel;
use crate::utils::reader::{inner_file_name, open_file};
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Tables read from a batch of inputs, plus the files that failed.
#[derive(Debug, Default)]
pub struct Ingested {
    pub files_discovered: usize,
    /// Successfully read tables, in sorted-path order.
    pub tables: Vec<RawTable>,
    pub errors: Vec<IngestionError>,
}

/// Whether a directory entry looks like an access-log export.
pub fn is_access_log(path: &Path) -> bool {
    inner_file_name(path)
        .map(|name| name.to_ascii_lowercase().ends_with(".csv"))
        .unwrap_or(false)
}

/// Expand input paths into a sorted, de-duplicated list of files.
///
/// Files named directly are taken whatever their extension; directories
/// contribute only files passing [`is_access_log`]. A path that does not
/// exist is an error.
pub fn discover_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            for entry in WalkDir::new(path).follow_links(true) {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        log::warn!("Skipping unreadable directory entry: {}", e);
                        continue;
                    }
                };
                if entry.file_type().is_file() && is_access_log(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        } else {
            bail!("Input path does not exist: {}", path.display());
        }
    }

    files.sort();
    files.dedup();
    log::debug!("Discovered {} input files", files.len());
    Ok(files)
}

/// Read one CSV export. Rows may be ragged; the normalizer pads them.
pub fn read_table(path: &Path) -> Result<RawTable, IngestionError> {
    let reader = open_file(path).map_err(|e| IngestionError::new(path, format!("{:#}", e)))?;
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| IngestionError::new(path, e))?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestionError::new(path, "no header row"));
    }

    let mut rows = Vec::new();
    for (idx, record) in csv_reader.records().enumerate() {
        let record = record
            .map_err(|e| IngestionError::new(path, format!("row {}: {}", idx + 1, e)))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable::new(path, headers, rows))
}

/// Discover and read every input file in parallel.
pub fn ingest(paths: &[PathBuf]) -> Result<Ingested> {
    let files = discover_files(paths)?;
    if files.is_empty() {
        bail!("No access-log CSV files found in the given paths");
    }

    let results = process_files_parallel(&files, "Reading", read_table);

    let mut ingested = Ingested {
        files_discovered: files.len(),
        ..Default::default()
    };
    for result in results {
        match result.data {
            Ok(table) => {
                log::debug!(
                    "Read {} rows from {}",
                    table.rows.len(),
                    result.path.display()
                );
                ingested.tables.push(table);
            }
            Err(e) => {
                log::warn!("{}", e);
                ingested.errors.push(e);
            }
        }
    }

    Ok(ingested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_access_log() {
        assert!(is_access_log(Path::new("a/jan.csv")));
        assert!(is_access_log(Path::new("a/jan.CSV")));
        assert!(is_access_log(Path::new("jan.csv.gz")));
        assert!(is_access_log(Path::new("jan.csv.zst")));
        assert!(!is_access_log(Path::new("jan.json")));
        assert!(!is_access_log(Path::new("jan.gz")));
        assert!(!is_access_log(Path::new("notes.txt")));
    }

    #[test]
    fn test_discover_walks_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.csv"), "name\n").unwrap();
        fs::write(dir.path().join("nested/a.csv"), "name\n").unwrap();
        fs::write(dir.path().join("readme.txt"), "ignore").unwrap();

        let files = discover_files(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("b.csv"));
        assert!(files[1].ends_with("nested/a.csv"));

        // the same file named twice is read once
        let twice = discover_files(&[dir.path().join("b.csv"), dir.path().join("b.csv")]).unwrap();
        assert_eq!(twice.len(), 1);
    }

    #[test]
    fn test_discover_missing_path() {
        assert!(discover_files(&[PathBuf::from("/nonexistent/exports")]).is_err());
    }

    #[test]
    fn test_read_table_ragged_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.csv");
        fs::write(
            &path,
            "Name,Reason,Case #\nJ. Doe,theft\nA. Roe,\"hit\nand run\",WHP1,extra\n",
        )
        .unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.headers, vec!["Name", "Reason", "Case #"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["J. Doe", "theft"]);
        assert_eq!(table.rows[1][1], "hit\nand run");
    }

    #[test]
    fn test_read_empty_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();

        let err = read_table(&path).unwrap_err();
        assert_eq!(err.path, path);
    }

    #[test]
    fn test_ingest_skips_bad_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.csv"), "Name,Reason\nJ. Doe,theft\n").unwrap();
        fs::write(dir.path().join("b.csv"), "").unwrap();
        fs::write(dir.path().join("c.csv.gz"), "not gzip data").unwrap();

        let ingested = ingest(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(ingested.files_discovered, 3);
        assert_eq!(ingested.tables.len(), 1);
        assert_eq!(ingested.errors.len(), 2);
        assert!(ingested.tables[0].source.ends_with("a.csv"));
    }

    #[test]
    fn test_ingest_nothing_found() {
        let dir = TempDir::new().unwrap();
        assert!(ingest(&[dir.path().to_path_buf()]).is_err());
    }
}
