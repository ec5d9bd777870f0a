//! Pattern compilation and matching

use crate::error::PatternCompilationError;
use crate::pattern::{CandidatePattern, PatternKind};
use citeprobe_domain::Placeholder;
use regex::Regex;
use tracing::warn;

/// A substring of document text matched by one candidate pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    /// The matched substring
    pub text: String,

    /// Source of the pattern that matched
    pub pattern: String,

    /// Fields the pattern was built from
    pub fields: Vec<Placeholder>,

    /// Pass the pattern belongs to
    pub kind: PatternKind,
}

/// Candidate patterns after compilation
///
/// Patterns that fail to compile are kept as [`PatternCompilationError`]
/// values rather than aborting the run.
#[derive(Debug, Clone, Default)]
pub struct CompiledPatterns {
    compiled: Vec<(CandidatePattern, Regex)>,
    failures: Vec<PatternCompilationError>,
}

impl CompiledPatterns {
    /// Compile every candidate, separating successes from failures
    pub fn compile(candidates: &[CandidatePattern]) -> Self {
        let mut compiled = Vec::with_capacity(candidates.len());
        let mut failures = Vec::new();

        for candidate in candidates {
            match Regex::new(&candidate.pattern) {
                Ok(regex) => compiled.push((candidate.clone(), regex)),
                Err(e) => {
                    warn!("Skipping pattern '{}': {}", candidate.pattern, e);
                    failures.push(PatternCompilationError {
                        pattern: candidate.pattern.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Self { compiled, failures }
    }

    /// Number of usable patterns
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    /// Whether no pattern compiled
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    /// Patterns that failed to compile
    pub fn failures(&self) -> &[PatternCompilationError] {
        &self.failures
    }

    /// Iterate over the usable candidates
    pub fn patterns(&self) -> impl Iterator<Item = &CandidatePattern> {
        self.compiled.iter().map(|(candidate, _)| candidate)
    }

    /// Run every pattern over `text`, collecting all non-overlapping matches
    /// of each pattern in pattern order
    pub fn run(&self, text: &str) -> Vec<PatternMatch> {
        self.compiled
            .iter()
            .flat_map(|(candidate, regex)| {
                regex.find_iter(text).map(move |m| PatternMatch {
                    text: m.as_str().to_string(),
                    pattern: candidate.pattern.clone(),
                    fields: candidate.fields.clone(),
                    kind: candidate.kind,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(pattern: &str) -> CandidatePattern {
        CandidatePattern {
            pattern: pattern.to_string(),
            fields: vec![Placeholder::Sku],
            kind: PatternKind::Secondary,
        }
    }

    #[test]
    fn test_malformed_pattern_is_reported_and_skipped() {
        let compiled = CompiledPatterns::compile(&[candidate("AF(1828"), candidate("AF1828")]);

        assert_eq!(compiled.len(), 1);
        assert_eq!(compiled.failures().len(), 1);
        assert_eq!(compiled.failures()[0].pattern, "AF(1828");
        assert_eq!(compiled.run("goat anti AF1828 and AF1828").len(), 2);
    }

    #[test]
    fn test_run_collects_matches_from_every_pattern() {
        let compiled = CompiledPatterns::compile(&[candidate("CD4.{0,4}RM"), candidate("RM4")]);
        let matches = compiled.run("CD4 (RM4-5)");

        let texts: Vec<&str> = matches.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["CD4 (RM", "RM4"]);
        assert_eq!(matches[0].pattern, "CD4.{0,4}RM");
    }

    #[test]
    fn test_no_matches() {
        let compiled = CompiledPatterns::compile(&[candidate("GK1\\.5")]);
        assert!(compiled.run("nothing to see").is_empty());
        assert!(CompiledPatterns::default().is_empty());
    }
}
