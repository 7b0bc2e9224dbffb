//! Parallel per-file processing.
//!
//! Each input file is handed to a rayon worker. Workers share nothing but
//! the progress bar; results come back in the order of the input slice, so
//! callers that merge them get the same output whatever the scheduling.

use crate::utils::progress::ProgressBar;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Result of processing a single file
#[derive(Debug)]
pub struct FileProcessResult<T> {
    pub path: PathBuf,
    pub data: T,
}

/// Run `processor` over every file in parallel.
///
/// The processor's output is kept as-is, so a per-file `Result` lets one
/// bad file fail without affecting the others.
pub fn process_files_parallel<T, F>(
    files: &[PathBuf],
    label: &str,
    processor: F,
) -> Vec<FileProcessResult<T>>
where
    T: Send,
    F: Fn(&Path) -> T + Send + Sync,
{
    if files.is_empty() {
        return Vec::new();
    }

    eprintln!("Processing {} files in parallel...", files.len());
    let progress = ProgressBar::new(files.len(), label);

    let results: Vec<FileProcessResult<T>> = files
        .par_iter()
        .map(|path| {
            let data = processor(path);
            progress.inc();
            FileProcessResult {
                path: path.clone(),
                data,
            }
        })
        .collect();

    progress.finish_with_message(&format!("Processed {} files", files.len()));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_keep_input_order() {
        let files: Vec<PathBuf> = (0..50).map(|i| PathBuf::from(format!("f{i:02}.csv"))).collect();

        let results = process_files_parallel(&files, "Testing", |path| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.len())
                .unwrap_or(0)
        });

        assert_eq!(results.len(), 50);
        for (result, file) in results.iter().zip(&files) {
            assert_eq!(&result.path, file);
            assert_eq!(result.data, 3);
        }
    }

    #[test]
    fn test_per_file_errors_are_isolated() {
        let files = vec![PathBuf::from("good.csv"), PathBuf::from("bad.csv")];

        let results = process_files_parallel(&files, "Testing", |path| {
            if path.ends_with("bad.csv") {
                Err("unreadable")
            } else {
                Ok(1)
            }
        });

        assert_eq!(results[0].data, Ok(1));
        assert_eq!(results[1].data, Err("unreadable"));
    }

    #[test]
    fn test_no_files() {
        let results = process_files_parallel(&[], "Testing", |_| 0);
        assert!(results.is_empty());
    }
}
