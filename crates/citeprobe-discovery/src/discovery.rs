//! Two-pass pattern discovery over document text

use crate::config::DiscoveryConfig;
use crate::error::{DiscoveryError, PatternCompilationError};
use crate::generalize::{generalize, GeneralizedPattern};
use crate::matcher::{CompiledPatterns, PatternMatch};
use crate::pattern::{propose_primary, propose_secondary, PatternKind};
use citeprobe_domain::EntityDescriptor;
use citeprobe_synthesizer::VariantSet;
use std::collections::HashMap;
use tracing::debug;

/// A match together with its generalized form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovered {
    /// The raw match
    pub matched: PatternMatch,

    /// The match rewritten with placeholder tokens
    pub generalized: GeneralizedPattern,
}

/// Result of running discovery over one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryOutcome {
    /// Pass that produced the matches, `None` when neither matched
    pub pass: Option<PatternKind>,

    /// Matches in pattern order
    pub discovered: Vec<Discovered>,
}

impl DiscoveryOutcome {
    /// Whether nothing matched
    pub fn is_empty(&self) -> bool {
        self.discovered.is_empty()
    }
}

/// Pattern discovery for one entity
///
/// Candidate patterns are built and compiled once; [`PatternDiscovery::discover`]
/// can then run over any number of documents.
pub struct PatternDiscovery {
    cues: VariantSet,
    primary: CompiledPatterns,
    secondary: CompiledPatterns,
}

impl PatternDiscovery {
    /// Build discovery for an entity
    pub fn new(entity: &EntityDescriptor, config: &DiscoveryConfig) -> Result<Self, DiscoveryError> {
        Self::from_cues(VariantSet::for_entity(entity), config)
    }

    /// Build discovery from a precomputed variant set
    pub fn from_cues(cues: VariantSet, config: &DiscoveryConfig) -> Result<Self, DiscoveryError> {
        config.validate().map_err(DiscoveryError::Config)?;

        let primary = CompiledPatterns::compile(&propose_primary(&cues, config));
        let secondary = CompiledPatterns::compile(&propose_secondary(&cues, config));

        debug!(
            "Compiled {} primary and {} secondary patterns ({} failed)",
            primary.len(),
            secondary.len(),
            primary.failures().len() + secondary.failures().len()
        );

        Ok(Self {
            cues,
            primary,
            secondary,
        })
    }

    /// The entity's variant set
    pub fn cues(&self) -> &VariantSet {
        &self.cues
    }

    /// Compiled primary patterns
    pub fn primary(&self) -> &CompiledPatterns {
        &self.primary
    }

    /// Compiled secondary patterns
    pub fn secondary(&self) -> &CompiledPatterns {
        &self.secondary
    }

    /// Patterns from either pass that failed to compile
    pub fn compilation_failures(&self) -> impl Iterator<Item = &PatternCompilationError> {
        self.primary
            .failures()
            .iter()
            .chain(self.secondary.failures())
    }

    /// Run discovery over one document
    ///
    /// Secondary patterns run only when no primary pattern matched, and their
    /// matches are never merged with primary ones.
    pub fn discover(&self, text: &str) -> DiscoveryOutcome {
        let (pass, matches) = match self.primary.run(text) {
            matches if !matches.is_empty() => (PatternKind::Primary, matches),
            _ => (PatternKind::Secondary, self.secondary.run(text)),
        };

        if matches.is_empty() {
            return DiscoveryOutcome::default();
        }

        let discovered = matches
            .into_iter()
            .map(|matched| {
                let generalized = generalize(&self.cues, &matched.text);
                Discovered {
                    matched,
                    generalized,
                }
            })
            .collect();

        DiscoveryOutcome {
            pass: Some(pass),
            discovered,
        }
    }
}

/// Frequency of generalized patterns across documents
#[derive(Debug, Clone, Default)]
pub struct PatternTally {
    counts: HashMap<String, usize>,
}

impl PatternTally {
    /// Create an empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one generalized pattern
    pub fn record(&mut self, pattern: &GeneralizedPattern) {
        *self.counts.entry(pattern.text().to_string()).or_insert(0) += 1;
    }

    /// Count every pattern of an outcome
    pub fn record_outcome(&mut self, outcome: &DiscoveryOutcome) {
        for discovered in &outcome.discovered {
            self.record(&discovered.generalized);
        }
    }

    /// Number of distinct patterns
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Patterns by descending frequency, ties in lexical order
    pub fn ranked(&self) -> Vec<(String, usize)> {
        let mut ranked: Vec<(String, usize)> = self
            .counts
            .iter()
            .map(|(pattern, count)| (pattern.clone(), *count))
            .collect();
        ranked.sort_by(|(pa, ca), (pb, cb)| cb.cmp(ca).then_with(|| pa.cmp(pb)));
        ranked
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use citeprobe_synthesizer::expand_template;
    use proptest::prelude::*;

    proptest! {
        /// Property: substituting an entity's own values back into a
        /// generalized primary match reproduces the match
        #[test]
        fn test_generalized_match_round_trips(
            target in "[A-Z]{2}[0-9]",
            clone_id in "[A-Z]{2}[0-9]{1,2}",
            manufacturer in "[A-Z][A-Z]{2,5}",
            before in "[a-z ]{0,12}",
            gap in "[a-z (,;#]{1,10}",
            after in "[a-z ]{0,12}",
        ) {
            let entity = EntityDescriptor::new(
                "99999",
                Some(clone_id.as_str()),
                manufacturer.as_str(),
                Some(target.as_str()),
            );
            let discovery = PatternDiscovery::new(&entity, &DiscoveryConfig::default())
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            let text = format!("{} {}{}{} {}", before, target, gap, clone_id, after);
            let outcome = discovery.discover(&text);

            prop_assert_eq!(outcome.pass, Some(PatternKind::Primary));
            for discovered in &outcome.discovered {
                let template = discovered.generalized.to_template();
                let queries = expand_template(&template, discovery.cues())
                    .map_err(|e| TestCaseError::fail(e.to_string()))?;
                prop_assert!(
                    queries.contains(&discovered.matched.text),
                    "{:?} not reproduced by {:?}",
                    discovered.matched.text,
                    template
                );
            }
        }
    }
}
