//! Utility functions and helpers.
//!
//! This module provides common functionality used across multiple commands:
//!
//! - [`reader`] - File reader with automatic decompression
//! - [`parallel`] - Per-file parallel processing with rayon
//! - [`progress`] - Progress tracking and display utilities
//! - [`time`] - Access-log timestamp parsing and formatting
//! - [`format`] - Number and text formatting for console tables
//! - [`export`] - CSV and JSON report writers
//!
//! # Examples
//!
//! ## Parsing timestamps
//!
//! ```
//! use lpr_audit_tools::utils::time::parse_timestamp;
//!
//! let ts = parse_timestamp("01/03/2025, 11:15:00 PM CST").unwrap();
//! assert_eq!(ts.to_string(), "2025-01-03 23:15:00");
//! ```
//!
//! ## Reading compressed exports
//!
//! ```no_run
//! use lpr_audit_tools::utils::reader::open_file;
//!
//! // Automatically decompresses .gz and .zst files
//! let reader = open_file("exports/2025-01.csv.gz").unwrap();
//! let csv = csv::Reader::from_reader(reader);
//! ```

pub mod export;
pub mod format;
pub mod parallel;
pub mod progress;
pub mod reader;
pub mod time;
