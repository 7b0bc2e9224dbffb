//! Progress bar utilities using indicatif
//!
//! Wraps indicatif's `ProgressBar` so every command reports file ingestion
//! the same way. The bar is drawn on stderr and hidden when stderr is not a
//! terminal.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

/// Progress bar over a known number of work items (files).
pub struct ProgressBar {
    bar: IndicatifBar,
}

impl ProgressBar {
    pub fn new(total: usize, label: &str) -> Self {
        let bar = IndicatifBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {percent:>3}% ({pos}/{len}) {eta}")
            .map(|s| s.progress_chars("█░"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar.set_message(label.to_string());

        Self { bar }
    }

    /// Mark one more item done. Safe to call from worker threads.
    pub fn inc(&self) {
        self.bar.inc(1);
    }

    pub fn finish_with_message(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}
