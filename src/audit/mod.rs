//! Access-log audit pipeline.
//!
//! Stages run in this order, each a pure function of the previous stage's
//! output except ingestion:
//!
//! - [`ingest`] - discover CSV exports and read them in parallel
//! - [`normalizer`] - canonical column names and the diagonal union
//! - [`temporal`] - timestamps, search-window duration, time-of-day bucket
//! - [`classifier`] - reason category from an ordered rule table
//! - [`aggregate`] - per-officer, per-reason and per-category statistics
//! - [`detector`] - suspicious searches, uncased concerning reasons, bursts
//! - [`report`] - wires the stages together into an [`report::AuditReport`]
//!
//! Record types for every stage live in [`types`]; errors in [`error`].

pub mod aggregate;
pub mod classifier;
pub mod detector;
pub mod error;
pub mod ingest;
pub mod normalizer;
pub mod report;
pub mod temporal;
pub mod types;
