//! Grouped statistics over classified records.
//!
//! Every function here is a pure reduction. Results are sorted by count
//! (descending) with a fully specified tie-break, so the output does not
//! depend on the order records were read in.

use crate::audit::types::{ClassifiedRecord, ReasonCategory, TimePeriod};
use crate::utils::format::percentage;
use serde::Serialize;
use std::collections::HashMap;

/// Number of reasons in the global top-reasons table.
pub const DEFAULT_TOP_REASONS: usize = 15;
/// Officers covered by the per-officer reason breakdown.
pub const DEFAULT_TOP_OFFICERS: usize = 10;
/// Reasons listed per officer.
pub const DEFAULT_REASONS_PER_OFFICER: usize = 3;
/// Sample reasons listed per category.
pub const DEFAULT_CATEGORY_SAMPLES: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfficerCount {
    pub officer: String,
    pub searches: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasonCount {
    pub reason: Option<String>,
    pub count: usize,
}

/// Share of searches whose reason mentions "inv" (investigation, inv, …).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestigationShare {
    pub total: usize,
    pub matching: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfficerReasons {
    pub officer: String,
    pub total_searches: usize,
    pub top_reasons: Vec<ReasonCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkUsage {
    pub officer: String,
    /// Mean over searches that report a network count.
    pub avg_networks_per_search: Option<f64>,
    pub max_networks_searched: Option<u64>,
    pub total_searches: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: ReasonCategory,
    pub count: usize,
    pub percentage: f64,
    pub missing_case_number: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReasons {
    pub category: ReasonCategory,
    pub count: usize,
    pub top_reasons: Vec<ReasonCount>,
}

/// How many searches carry no case number at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseCoverage {
    pub total: usize,
    pub missing_case_number: usize,
    pub missing_percentage: f64,
    /// Searches with neither a case number nor a reason.
    pub missing_case_and_reason: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodCount {
    pub time_period: TimePeriod,
    pub count: usize,
    pub percentage: f64,
}

/// Searches per officer, busiest first; ties by name.
pub fn officer_search_counts(records: &[ClassifiedRecord]) -> Vec<OfficerCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.officer_name()).or_insert(0) += 1;
    }

    let mut out: Vec<OfficerCount> = counts
        .into_iter()
        .map(|(officer, searches)| OfficerCount {
            officer: officer.to_string(),
            searches,
        })
        .collect();
    out.sort_by(|a, b| b.searches.cmp(&a.searches).then_with(|| a.officer.cmp(&b.officer)));
    out
}

/// Rank reason strings by occurrence; ties by reason, null first.
fn rank_reasons<'a>(reasons: impl Iterator<Item = Option<&'a str>>, n: usize) -> Vec<ReasonCount> {
    let mut counts: HashMap<Option<&str>, usize> = HashMap::new();
    for reason in reasons {
        *counts.entry(reason).or_insert(0) += 1;
    }

    let mut ranked: Vec<(Option<&str>, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(n)
        .map(|(reason, count)| ReasonCount {
            reason: reason.map(str::to_string),
            count,
        })
        .collect()
}

/// The `n` most frequent reason strings.
pub fn top_reasons(records: &[ClassifiedRecord], n: usize) -> Vec<ReasonCount> {
    rank_reasons(records.iter().map(|r| r.record().reason.as_deref()), n)
}

/// Percentage of all searches whose reason contains "inv", case-insensitively.
pub fn investigation_share(records: &[ClassifiedRecord]) -> InvestigationShare {
    let total = records.len();
    let matching = records
        .iter()
        .filter_map(|r| r.record().reason.as_deref())
        .filter(|reason| reason.to_lowercase().contains("inv"))
        .count();

    InvestigationShare {
        total,
        matching,
        percentage: percentage(matching, total),
    }
}

/// Top reasons of each of the `officers` busiest officers.
pub fn officer_top_reasons(
    records: &[ClassifiedRecord],
    officers: usize,
    reasons: usize,
) -> Vec<OfficerReasons> {
    officer_search_counts(records)
        .into_iter()
        .take(officers)
        .map(|OfficerCount { officer, searches }| {
            let top_reasons = rank_reasons(
                records
                    .iter()
                    .filter(|r| r.officer_name() == officer)
                    .map(|r| r.record().reason.as_deref()),
                reasons,
            );
            OfficerReasons {
                officer,
                total_searches: searches,
                top_reasons,
            }
        })
        .collect()
}

/// Mean and max networks searched per officer, busiest first.
pub fn network_usage(records: &[ClassifiedRecord]) -> Vec<NetworkUsage> {
    #[derive(Default)]
    struct Acc {
        total: usize,
        sum: u64,
        reported: usize,
        max: Option<u64>,
    }

    let mut by_officer: HashMap<&str, Acc> = HashMap::new();
    for record in records {
        let acc = by_officer.entry(record.officer_name()).or_default();
        acc.total += 1;
        if let Some(n) = record.record().total_networks_searched {
            acc.sum += n;
            acc.reported += 1;
            acc.max = Some(acc.max.map_or(n, |m| m.max(n)));
        }
    }

    let mut out: Vec<NetworkUsage> = by_officer
        .into_iter()
        .map(|(officer, acc)| NetworkUsage {
            officer: officer.to_string(),
            avg_networks_per_search: (acc.reported > 0)
                .then(|| acc.sum as f64 / acc.reported as f64),
            max_networks_searched: acc.max,
            total_searches: acc.total,
        })
        .collect();
    out.sort_by(|a, b| {
        b.total_searches
            .cmp(&a.total_searches)
            .then_with(|| a.officer.cmp(&b.officer))
    });
    out
}

/// Count, share and missing-case-number count per category present.
pub fn category_distribution(records: &[ClassifiedRecord]) -> Vec<CategoryCount> {
    let mut counts: HashMap<ReasonCategory, (usize, usize)> = HashMap::new();
    for record in records {
        let entry = counts.entry(record.reason_category).or_insert((0, 0));
        entry.0 += 1;
        if !record.record().has_case_number() {
            entry.1 += 1;
        }
    }

    let total = records.len();
    let mut out: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, (count, missing))| CategoryCount {
            category,
            count,
            percentage: percentage(count, total),
            missing_case_number: missing,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    out
}

/// Most frequent reasons within each category, largest category first.
pub fn category_reasons(records: &[ClassifiedRecord], n: usize) -> Vec<CategoryReasons> {
    category_distribution(records)
        .into_iter()
        .map(|c| CategoryReasons {
            category: c.category,
            count: c.count,
            top_reasons: rank_reasons(
                records
                    .iter()
                    .filter(|r| r.reason_category == c.category)
                    .map(|r| r.record().reason.as_deref()),
                n,
            ),
        })
        .collect()
}

pub fn case_coverage(records: &[ClassifiedRecord]) -> CaseCoverage {
    let total = records.len();
    let missing_case_number = records
        .iter()
        .filter(|r| !r.record().has_case_number())
        .count();
    let missing_case_and_reason = records
        .iter()
        .filter(|r| !r.record().has_case_number() && r.record().reason().is_none())
        .count();

    CaseCoverage {
        total,
        missing_case_number,
        missing_percentage: percentage(missing_case_number, total),
        missing_case_and_reason,
    }
}

/// Searches per time-of-day bucket, in bucket order, zeros included.
pub fn time_period_distribution(records: &[ClassifiedRecord]) -> Vec<PeriodCount> {
    let total = records.len();
    TimePeriod::ALL
        .iter()
        .map(|&period| {
            let count = records.iter().filter(|r| r.time_period() == period).count();
            PeriodCount {
                time_period: period,
                count,
                percentage: percentage(count, total),
            }
        })
        .collect()
}
