//! Reason classification.
//!
//! A [`ReasonClassifier`] is an ordered rule table of `(category, matcher)`
//! pairs built from [`ClassifierConfig`]. Rules are tried top to bottom and
//! the first match wins, so a reason such as `stolen vehicle WHP25009165`
//! is `legitimate` even though it also carries a case number.
//!
//! | # | Category       | Matches                                          |
//! |---|----------------|--------------------------------------------------|
//! | 1 | `legitimate`   | any investigative term                           |
//! | 2 | `case_number`  | a department prefix immediately followed by digits |
//! | 3 | `concerning`   | any improper-use term                            |
//! | 4 | `ambiguous`    | any department shorthand                         |
//! | 5 | `null`         | missing or blank reason                          |
//! | 6 | `cryptic`      | fewer than `cryptic_max_len` characters          |
//! | 7 | `numeric_code` | digits only                                      |
//! | 8 | `uncategorized`| anything else                                    |
//!
//! Every input, including `None`, maps to exactly one category.

use crate::audit::error::ConfigError;
use crate::audit::types::{ClassifiedRecord, ReasonCategory, TemporalRecord};
use crate::config::ClassifierConfig;
use regex::{Regex, RegexBuilder};

/// How a rule decides whether a reason belongs to its category.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Case-insensitive regex searched anywhere in the reason.
    Pattern(Regex),
    /// Reason is absent or blank.
    Missing,
    /// Reason has fewer than this many characters.
    ShorterThan(usize),
    /// Reason is made only of ASCII digits.
    AllDigits,
    /// Always matches; closes the table.
    Fallback,
    /// Never matches; stands in for an empty vocabulary.
    Never,
}

impl Matcher {
    /// Whether `reason` satisfies this matcher. Only [`Matcher::Missing`]
    /// and [`Matcher::Fallback`] can match a missing reason.
    pub fn matches(&self, reason: Option<&str>) -> bool {
        match (self, reason) {
            (Matcher::Missing, r) => r.map_or(true, |s| s.trim().is_empty()),
            (Matcher::Fallback, _) => true,
            (Matcher::Never, _) | (_, None) => false,
            (Matcher::Pattern(re), Some(r)) => re.is_match(r),
            (Matcher::ShorterThan(n), Some(r)) => r.chars().count() < *n,
            (Matcher::AllDigits, Some(r)) => !r.is_empty() && r.chars().all(|c| c.is_ascii_digit()),
        }
    }
}

/// One row of the rule table.
#[derive(Debug, Clone)]
pub struct Rule {
    pub category: ReasonCategory,
    pub matcher: Matcher,
}

/// Ordered rule table assigning a [`ReasonCategory`] to a reason string.
#[derive(Debug, Clone)]
pub struct ReasonClassifier {
    rules: Vec<Rule>,
}

impl ReasonClassifier {
    /// Build the rule table from vocabulary configuration.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, ConfigError> {
        let rules = vec![
            Rule {
                category: ReasonCategory::Legitimate,
                matcher: vocabulary_matcher("legitimate", &config.legitimate)?,
            },
            Rule {
                category: ReasonCategory::CaseNumber,
                matcher: Matcher::Pattern(case_number_pattern(&config.case_number_prefixes)?),
            },
            Rule {
                category: ReasonCategory::Concerning,
                matcher: vocabulary_matcher("concerning", &config.concerning)?,
            },
            Rule {
                category: ReasonCategory::Ambiguous,
                matcher: vocabulary_matcher("ambiguous", &config.ambiguous)?,
            },
            Rule {
                category: ReasonCategory::Null,
                matcher: Matcher::Missing,
            },
            Rule {
                category: ReasonCategory::Cryptic,
                matcher: Matcher::ShorterThan(config.cryptic_max_len),
            },
            Rule {
                category: ReasonCategory::NumericCode,
                matcher: Matcher::AllDigits,
            },
            Rule {
                category: ReasonCategory::Uncategorized,
                matcher: Matcher::Fallback,
            },
        ];
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Category of a reason; total over all inputs.
    pub fn classify(&self, reason: Option<&str>) -> ReasonCategory {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(reason))
            .map_or(ReasonCategory::Uncategorized, |rule| rule.category)
    }

    pub fn classify_record(&self, record: TemporalRecord) -> ClassifiedRecord {
        let reason_category = self.classify(record.record.reason.as_deref());
        ClassifiedRecord {
            temporal: record,
            reason_category,
        }
    }

    pub fn classify_records(&self, records: Vec<TemporalRecord>) -> Vec<ClassifiedRecord> {
        records
            .into_iter()
            .map(|r| self.classify_record(r))
            .collect()
    }
}

/// One case-insensitive alternation of escaped literal terms.
fn vocabulary_matcher(list: &str, terms: &[String]) -> Result<Matcher, ConfigError> {
    if terms.is_empty() {
        return Ok(Matcher::Never);
    }
    let pattern = terms
        .iter()
        .map(|t| regex::escape(t.trim()))
        .collect::<Vec<_>>()
        .join("|");
    compile(list, &pattern).map(Matcher::Pattern)
}

/// `(prefix|prefix|...)\d+`, anywhere in the reason.
fn case_number_pattern(prefixes: &[String]) -> Result<Regex, ConfigError> {
    let alternation = prefixes
        .iter()
        .map(|p| regex::escape(p.trim()))
        .collect::<Vec<_>>()
        .join("|");
    compile("case_number_prefixes", &format!(r"(?:{})\d+", alternation))
}

fn compile(list: &str, pattern: &str) -> Result<Regex, ConfigError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ConfigError::Pattern {
            list: list.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn classifier() -> ReasonClassifier {
        ReasonClassifier::from_config(&Config::builtin().unwrap().classifier).unwrap()
    }

    #[test]
    fn test_legitimate_beats_case_number() {
        let c = classifier();
        assert_eq!(
            c.classify(Some("stolen vehicle WHP25009165")),
            ReasonCategory::Legitimate
        );
    }

    #[test]
    fn test_case_number_alone() {
        let c = classifier();
        assert_eq!(c.classify(Some("whp25009165")), ReasonCategory::CaseNumber);
        assert_eq!(c.classify(Some("CSPC2400112")), ReasonCategory::CaseNumber);
        assert_eq!(c.classify(Some("ref gep123 follow up")), ReasonCategory::CaseNumber);
    }

    #[test]
    fn test_prefix_without_digits_is_not_case_number() {
        let c = classifier();
        assert_ne!(c.classify(Some("whp report")), ReasonCategory::CaseNumber);
    }

    #[test]
    fn test_concerning_beats_ambiguous() {
        let c = classifier();
        // "test" is in both vocabularies, "btmv" only in ambiguous
        assert_eq!(c.classify(Some("test btmv")), ReasonCategory::Concerning);
        assert_eq!(
            c.classify(Some("Background Check uucc")),
            ReasonCategory::Concerning
        );
    }

    #[test]
    fn test_ambiguous_shorthand() {
        let c = classifier();
        assert_eq!(c.classify(Some("btmv")), ReasonCategory::Ambiguous);
        assert_eq!(c.classify(Some("LPR hit voop")), ReasonCategory::Ambiguous);
    }

    #[test]
    fn test_case_number_beats_concerning() {
        let c = classifier();
        assert_eq!(c.classify(Some("protest WRP2500012")), ReasonCategory::CaseNumber);
    }

    #[test]
    fn test_null_empty_and_whitespace() {
        let c = classifier();
        assert_eq!(c.classify(None), ReasonCategory::Null);
        assert_eq!(c.classify(Some("")), ReasonCategory::Null);
        assert_eq!(c.classify(Some("   ")), ReasonCategory::Null);
    }

    #[test]
    fn test_cryptic_before_numeric() {
        let c = classifier();
        assert_eq!(c.classify(Some("xq")), ReasonCategory::Cryptic);
        assert_eq!(c.classify(Some("1234")), ReasonCategory::Cryptic);
        assert_eq!(c.classify(Some("25009165")), ReasonCategory::NumericCode);
    }

    #[test]
    fn test_uncategorized() {
        let c = classifier();
        assert_eq!(c.classify(Some("follow up on lead")), ReasonCategory::Uncategorized);
        assert_eq!(c.classify(Some("12345a")), ReasonCategory::Uncategorized);
    }

    #[test]
    fn test_totality() {
        let c = classifier();
        let inputs = [
            None,
            Some(""),
            Some(" \t\n"),
            Some("0"),
            Some("000000000000"),
            Some("ünïcödé"),
            Some("(?i).*[regex]"),
            Some("hit & run 123"),
            Some("WHP"),
        ];
        for input in inputs {
            let category = c.classify(input);
            assert!(ReasonCategory::ALL.contains(&category));
        }
    }

    #[test]
    fn test_vocabulary_terms_are_literal() {
        let c = classifier();
        // "h&r" and "hit & run" contain no regex syntax but must still match
        assert_eq!(c.classify(Some("H&R on main st")), ReasonCategory::Legitimate);
        // a dot in the reason must not act as a wildcard against the terms
        assert_eq!(c.classify(Some("b.tmv")), ReasonCategory::Uncategorized);
    }

    #[test]
    fn test_rule_table_order() {
        let c = classifier();
        let order: Vec<ReasonCategory> = c.rules().iter().map(|r| r.category).collect();
        assert_eq!(order, ReasonCategory::ALL.to_vec());
    }

    #[test]
    fn test_custom_vocabulary() {
        let mut config = Config::builtin().unwrap().classifier;
        config.concerning = vec!["personal".to_string()];
        config.case_number_prefixes = vec!["rpd".to_string()];
        let c = ReasonClassifier::from_config(&config).unwrap();

        assert_eq!(c.classify(Some("personal errand")), ReasonCategory::Concerning);
        assert_eq!(c.classify(Some("RPD-1")), ReasonCategory::Uncategorized);
        assert_eq!(c.classify(Some("rpd2025001")), ReasonCategory::CaseNumber);
        assert_eq!(c.classify(Some("whp25009165")), ReasonCategory::Uncategorized);
    }

    #[test]
    fn test_empty_vocabulary_never_matches() {
        let mut config = Config::builtin().unwrap().classifier;
        config.legitimate.clear();
        let c = ReasonClassifier::from_config(&config).unwrap();
        assert_eq!(c.classify(Some("stolen vehicle")), ReasonCategory::Uncategorized);
    }
}
