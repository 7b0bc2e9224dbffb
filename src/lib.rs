//! # LPR Audit Tools
//!
//! Command-line tools for auditing licence-plate-reader (LPR) network access
//! logs, such as the search-audit CSVs a Flock Safety deployment exports.
//!
//! ## Overview
//!
//! Every search an officer runs against the camera network is logged with
//! the officer's name, a free-text reason, an optional case number, the
//! searched time window and the number of networks and devices queried.
//! This crate turns a directory of those exports into an audit report:
//!
//! - **Schema normalization** - exports from different agencies and months
//!   disagree on header spelling and column sets; they are merged into one
//!   canonical record set without losing columns.
//! - **Temporal parsing** - search windows and search times are parsed and
//!   each search is bucketed into business hours, evening or night.
//! - **Reason classification** - each justification is assigned one of
//!   eight audit-risk categories by an ordered, configurable rule table.
//! - **Aggregation** - searches per officer, top reasons, network usage,
//!   category distribution and case-number coverage.
//! - **Suspicious-access detection** - night-time searches with no case
//!   number and a concerning, cryptic, ambiguous or missing reason, plus
//!   bursts of uncased searches.
//!
//! ## Architecture
//!
//! - [`audit`] - pipeline stages and record types
//! - [`commands`] - one module per CLI subcommand
//! - [`config`] - TOML configuration with embedded defaults
//! - [`utils`] - reading, parallelism, progress, formatting and export
//!
//! ## Example Usage
//!
//! ```bash
//! # Full report, exported as CSV tables
//! lpr-audit analyze exports/ --output-dir reports/
//!
//! # Flagged searches only, as JSON
//! lpr-audit suspicious exports/ --output flagged.json
//!
//! # Try the classifier on ad-hoc reasons
//! lpr-audit classify "stolen vehicle WHP25009165" "btmv" "protest"
//!
//! # Compressed exports work seamlessly
//! lpr-audit officers exports/2025-01.csv.gz
//! ```
//!
//! ## Library use
//!
//! ```no_run
//! use lpr_audit_tools::audit::report::{run_pipeline, AnalysisOptions};
//! use lpr_audit_tools::config::Config;
//! use std::path::PathBuf;
//!
//! let config = Config::load(None).unwrap();
//! let analysis = run_pipeline(
//!     &[PathBuf::from("exports")],
//!     &config,
//!     &AnalysisOptions::default(),
//! )
//! .unwrap();
//! println!("{} suspicious searches", analysis.report.suspicious_searches.len());
//! ```

pub mod audit;
pub mod commands;
pub mod config;
pub mod utils;
