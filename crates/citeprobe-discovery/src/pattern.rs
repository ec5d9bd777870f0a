//! Candidate pattern construction

use crate::config::DiscoveryConfig;
use citeprobe_domain::Placeholder;
use citeprobe_synthesizer::VariantSet;

/// Field pairs whose co-occurrence indicates an entity mention
///
/// Each pair is also tried in reverse order.
const PRIMARY_PAIRS: [(Placeholder, Placeholder); 4] = [
    (Placeholder::Target, Placeholder::Sku),
    (Placeholder::Sku, Placeholder::Manufacturer),
    (Placeholder::Clone, Placeholder::Manufacturer),
    (Placeholder::Target, Placeholder::Clone),
];

/// Fields that are distinctive enough to match on their own
const SECONDARY_FIELDS: [Placeholder; 2] = [Placeholder::Sku, Placeholder::Clone];

/// Which pass a pattern belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Two fields within a bounded gap
    Primary,

    /// A single field with surrounding context; runs only as a fallback
    Secondary,
}

/// A regex pattern built from entity field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePattern {
    /// Regex source
    pub pattern: String,

    /// Fields the pattern was built from, in pattern order
    pub fields: Vec<Placeholder>,

    /// Primary or secondary pass
    pub kind: PatternKind,
}

/// Render one field as a non-capturing alternation of its variants
///
/// Longer variants come first so the leftmost match is also the longest one.
/// Returns `None` when the field is unknown.
fn alternation(cues: &VariantSet, field: Placeholder, escape: bool) -> Option<String> {
    let mut values: Vec<&str> = cues
        .get(field)
        .values()
        .iter()
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .collect();

    if values.is_empty() {
        return None;
    }

    values.sort_by(|a, b| b.len().cmp(&a.len()));

    let rendered: Vec<String> = values
        .into_iter()
        .map(|v| {
            if escape {
                regex::escape(v)
            } else {
                v.to_string()
            }
        })
        .collect();

    Some(format!("(?:{})", rendered.join("|")))
}

/// Build the primary patterns for an entity
///
/// Pairs with an unknown field are skipped.
pub fn propose_primary(cues: &VariantSet, config: &DiscoveryConfig) -> Vec<CandidatePattern> {
    let gap = format!(".{{0,{}}}", config.max_gap);
    let mut patterns = Vec::new();

    for (left, right) in PRIMARY_PAIRS {
        let (Some(a), Some(b)) = (
            alternation(cues, left, config.escape_field_values),
            alternation(cues, right, config.escape_field_values),
        ) else {
            continue;
        };

        patterns.push(CandidatePattern {
            pattern: format!("{}{}{}", a, gap, b),
            fields: vec![left, right],
            kind: PatternKind::Primary,
        });
        patterns.push(CandidatePattern {
            pattern: format!("{}{}{}", b, gap, a),
            fields: vec![right, left],
            kind: PatternKind::Primary,
        });
    }

    patterns
}

/// Build the secondary (fallback) patterns for an entity
pub fn propose_secondary(cues: &VariantSet, config: &DiscoveryConfig) -> Vec<CandidatePattern> {
    let window = format!(".{{0,{}}}", config.secondary_window);

    SECONDARY_FIELDS
        .into_iter()
        .filter_map(|field| {
            let value = alternation(cues, field, config.escape_field_values)?;
            Some(CandidatePattern {
                pattern: format!(
                    r"{w}(?:^|[\s[:punct:]]){v}(?:[\s[:punct:]]|$){w}",
                    w = window,
                    v = value
                ),
                fields: vec![field],
                kind: PatternKind::Secondary,
            })
        })
        .collect()
}

/// All candidate patterns, primary first
pub fn propose_patterns(cues: &VariantSet, config: &DiscoveryConfig) -> Vec<CandidatePattern> {
    let mut patterns = propose_primary(cues, config);
    patterns.extend(propose_secondary(cues, config));
    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use citeprobe_domain::EntityDescriptor;

    fn cues(clone_id: Option<&str>) -> VariantSet {
        VariantSet::for_entity(&EntityDescriptor::new(
            "100401",
            clone_id,
            "BioLegend",
            Some("CD4"),
        ))
    }

    #[test]
    fn test_primary_pairs_and_reverses() {
        let patterns = propose_primary(&cues(Some("GK1.5")), &DiscoveryConfig::default());

        assert_eq!(patterns.len(), 8);
        assert!(patterns.iter().all(|p| p.kind == PatternKind::Primary));
        assert_eq!(patterns[0].pattern, "(?:CD4).{0,16}(?:100401)");
        assert_eq!(patterns[1].pattern, "(?:100401).{0,16}(?:CD4)");
        assert_eq!(patterns[1].fields, vec![Placeholder::Sku, Placeholder::Target]);
    }

    #[test]
    fn test_unknown_clone_skips_pairs() {
        let patterns = propose_primary(&cues(None), &DiscoveryConfig::default());

        assert_eq!(patterns.len(), 4);
        assert!(patterns
            .iter()
            .all(|p| !p.fields.contains(&Placeholder::Clone)));
    }

    #[test]
    fn test_values_are_escaped() {
        let patterns = propose_primary(&cues(Some("GK1.5")), &DiscoveryConfig::default());
        let clone_pattern = patterns
            .iter()
            .find(|p| p.fields == vec![Placeholder::Clone, Placeholder::Manufacturer])
            .unwrap();

        assert!(clone_pattern.pattern.contains(r"GK1\.5"));
        assert!(clone_pattern.pattern.contains(r"GK 1\.5"));
    }

    #[test]
    fn test_alternation_longest_first() {
        let entity = EntityDescriptor::new("550", None, "Bio Rad", None);
        let cues = VariantSet::for_entity(&entity);
        let rendered = alternation(&cues, Placeholder::Manufacturer, false).unwrap();
        assert_eq!(rendered, "(?:Bio-Rad|Bio Rad|BioRad)");
    }

    #[test]
    fn test_secondary_patterns() {
        let patterns = propose_secondary(&cues(Some("GK1.5")), &DiscoveryConfig::default());

        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].fields, vec![Placeholder::Sku]);
        assert_eq!(
            patterns[0].pattern,
            r".{0,24}(?:^|[\s[:punct:]])(?:100401)(?:[\s[:punct:]]|$).{0,24}"
        );
        assert!(patterns.iter().all(|p| p.kind == PatternKind::Secondary));
    }

    #[test]
    fn test_propose_patterns_orders_primary_first() {
        let patterns = propose_patterns(&cues(None), &DiscoveryConfig::default());
        assert_eq!(patterns.len(), 5);
        assert_eq!(patterns.last().unwrap().kind, PatternKind::Secondary);
    }
}
