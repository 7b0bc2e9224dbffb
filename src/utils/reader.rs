//! File reader with transparent decompression.
//!
//! Access-log exports are often archived compressed; `.csv.gz` and
//! `.csv.zst` files are read as if they were plain CSV.
//!
//! ```no_run
//! use lpr_audit_tools::utils::reader::open_file;
//!
//! let reader = open_file("exports/2025-01.csv.gz").unwrap();
//! let mut csv = csv::Reader::from_reader(reader);
//! for row in csv.records() {
//!     let row = row.unwrap();
//!     println!("{:?}", row.get(0));
//! }
//! ```

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Compression layer detected from a file's last extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Zstd,
}

impl Compression {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("gz") => Compression::Gzip,
            Some(ext) if ext.eq_ignore_ascii_case("zst") => Compression::Zstd,
            _ => Compression::None,
        }
    }
}

/// File name with any compression extension removed, e.g.
/// `jan.csv.gz` becomes `jan.csv`.
pub fn inner_file_name(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    match Compression::from_path(path) {
        Compression::None => Some(name),
        _ => name.rsplit_once('.').map(|(inner, _)| inner),
    }
}

/// Open a file, decompressing according to its extension.
pub fn open_file(path: impl AsRef<Path>) -> Result<Box<dyn Read + Send>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;

    Ok(match Compression::from_path(path) {
        Compression::Gzip => Box::new(GzDecoder::new(file)),
        Compression::Zstd => Box::new(zstd::Decoder::new(file).with_context(|| {
            format!("Failed to create zstd decoder for: {}", path.display())
        })?),
        Compression::None => Box::new(file),
    })
}
