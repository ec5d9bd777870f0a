//! Core Synthesizer implementation

use crate::config::SynthesizerConfig;
use crate::error::SynthesisError;
use crate::template::{QueryTemplate, Segment, TemplateSet};
use crate::variants::{VariantSet, Variants};
use citeprobe_domain::{EntityDescriptor, Placeholder};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// A single boolean query built from many synthesized queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeQuery {
    /// The composite query text
    pub text: String,

    /// Number of member queries
    pub query_count: usize,
}

impl CompositeQuery {
    /// Length in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the composite has no members
    pub fn is_empty(&self) -> bool {
        self.query_count == 0
    }

    /// Whether the composite fits a downstream length ceiling
    pub fn fits_within(&self, max_length: usize) -> bool {
        self.len() <= max_length
    }
}

/// Join queries with a boolean OR, using each query as-is
pub fn combine(queries: &[String]) -> CompositeQuery {
    CompositeQuery {
        text: queries.join(" OR "),
        query_count: queries.len(),
    }
}

/// Join queries with a boolean OR, wrapping each one in parentheses
pub fn combine_grouped(queries: &[String]) -> CompositeQuery {
    let grouped: Vec<String> = queries.iter().map(|q| format!("({})", q)).collect();
    CompositeQuery {
        text: grouped.join(" OR "),
        query_count: queries.len(),
    }
}

/// Expand one template against a variant set
///
/// Returns an empty list when the template references an unknown field.
/// Otherwise every placeholder is replaced by each of its values in turn, so a
/// template with two placeholders of three values each yields nine queries.
/// Substituted values are never rescanned for tokens.
pub fn expand_template(
    template: &QueryTemplate,
    cues: &VariantSet,
) -> Result<Vec<String>, SynthesisError> {
    let segments = template.segments();

    let mut fills: Vec<(Placeholder, &[String])> = Vec::new();
    for placeholder in Placeholder::ALL {
        if !segments.contains(&Segment::Field(placeholder)) {
            continue;
        }

        match cues.get(placeholder) {
            Variants::Known(values) if !values.is_empty() => {
                fills.push((placeholder, values.as_slice()))
            }
            _ => {
                debug!(
                    "Dropping template '{}': {} is unknown",
                    template.text(),
                    placeholder
                );
                return Ok(Vec::new());
            }
        }
    }

    // Later placeholders vary slowest
    let mut assignments: Vec<Vec<(Placeholder, &str)>> = vec![Vec::new()];
    for (placeholder, values) in fills {
        assignments = values
            .iter()
            .flat_map(|value| {
                assignments.iter().map(move |assigned| {
                    let mut assigned = assigned.clone();
                    assigned.push((placeholder, value.as_str()));
                    assigned
                })
            })
            .collect();
    }

    let queries: Vec<String> = assignments
        .iter()
        .map(|assigned| render(&segments, assigned))
        .collect();

    let unsupported = segments.iter().find_map(|segment| match segment {
        Segment::Unsupported(token) => Some(*token),
        _ => None,
    });
    if let (Some(token), Some(query)) = (unsupported, queries.first()) {
        return Err(SynthesisError::UnresolvedPlaceholder {
            template: template.text().to_string(),
            query: query.clone(),
            token: token.to_string(),
        });
    }

    Ok(queries)
}

fn render(segments: &[Segment<'_>], assigned: &[(Placeholder, &str)]) -> String {
    let mut query = String::new();
    for segment in segments {
        match segment {
            Segment::Literal(text) | Segment::Unsupported(text) => query.push_str(text),
            Segment::Field(placeholder) => {
                if let Some((_, value)) = assigned.iter().find(|(p, _)| p == placeholder) {
                    query.push_str(value);
                }
            }
        }
    }
    query
}

/// The Synthesizer expands entities against the template library
pub struct QuerySynthesizer {
    templates: Arc<TemplateSet>,
    config: SynthesizerConfig,
}

impl QuerySynthesizer {
    /// Create a new Synthesizer
    pub fn new(templates: Arc<TemplateSet>, config: SynthesizerConfig) -> Self {
        Self { templates, config }
    }

    /// Create a Synthesizer with the built-in templates and default configuration
    pub fn with_builtin_templates() -> Self {
        Self::new(Arc::new(TemplateSet::builtin()), SynthesizerConfig::default())
    }

    /// The template library in use
    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    /// The configuration in use
    pub fn config(&self) -> &SynthesizerConfig {
        &self.config
    }

    /// Synthesize the de-duplicated queries for one entity
    ///
    /// Callers must not rely on query order.
    pub fn synthesize(&self, entity: &EntityDescriptor) -> Result<Vec<String>, SynthesisError> {
        let cues = VariantSet::for_entity(entity);
        let queries = self.synthesize_from_cues(&cues)?;

        debug!(
            "Synthesized {} queries for {} from {} templates (v{})",
            queries.len(),
            entity.id(),
            self.templates.len(),
            self.templates.version
        );

        Ok(queries)
    }

    /// Synthesize queries from a precomputed variant set
    pub fn synthesize_from_cues(&self, cues: &VariantSet) -> Result<Vec<String>, SynthesisError> {
        let mut seen = HashSet::new();
        let mut queries = Vec::new();

        for template in self.templates.iter() {
            for query in expand_template(template, cues)? {
                if seen.insert(query.clone()) {
                    queries.push(query);
                }
            }
        }

        Ok(queries)
    }

    /// Build the composite query, grouping members when configured
    pub fn compose(&self, queries: &[String]) -> CompositeQuery {
        if self.config.group_queries {
            combine_grouped(queries)
        } else {
            combine(queries)
        }
    }

    /// Whether a composite query fits the configured length ceiling
    pub fn fits(&self, composite: &CompositeQuery) -> bool {
        composite.fits_within(self.config.max_query_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citeprobe_domain::Manufacturer;

    fn biolegend() -> EntityDescriptor {
        EntityDescriptor::new("100401", Some("GK1.5"), "BioLegend", Some("CD4"))
    }

    fn synthesizer(templates: &[&str]) -> QuerySynthesizer {
        let set = TemplateSet::new(1, templates.iter().map(|t| QueryTemplate::new(*t)).collect());
        QuerySynthesizer::new(Arc::new(set), SynthesizerConfig::default())
    }

    #[test]
    fn test_sku_manufacturer_template() {
        let queries = synthesizer(&["$SKU $MANUFACTURER"]).synthesize(&biolegend()).unwrap();
        assert_eq!(queries, vec!["100401 BioLegend".to_string()]);
    }

    #[test]
    fn test_clone_template_uses_clone_variants() {
        let queries = synthesizer(&[r#""$MANUFACTURER clone $CLONE""#])
            .synthesize(&biolegend())
            .unwrap();

        assert!(queries.contains(&r#""BioLegend clone GK1.5""#.to_string()));
        assert!(queries.contains(&r#""BioLegend clone GK 1.5""#.to_string()));
        assert_eq!(queries.len(), 4);
    }

    #[test]
    fn test_combinatorial_fan_out() {
        let entity = EntityDescriptor::new("MCA1653F", Some("CC8"), "Bio Rad", Some("CD4"));
        let queries = synthesizer(&["$MANUFACTURER $CLONE"]).synthesize(&entity).unwrap();

        // 3 manufacturer renderings x 2 clone renderings
        assert_eq!(queries.len(), 6);
        assert!(queries.contains(&"BioRad CC 8".to_string()));
        assert!(queries.contains(&"Bio-Rad CC8".to_string()));
    }

    #[test]
    fn test_unknown_field_drops_whole_template() {
        let entity = EntityDescriptor::new("AF1828", None, "R&D Systems", Some("TREM2"));
        let queries = synthesizer(&[r#""$MANUFACTURER clone $CLONE""#, "$SKU $MANUFACTURER"])
            .synthesize(&entity)
            .unwrap();

        assert_eq!(queries.len(), 3);
        assert!(queries.iter().all(|q| !q.contains("clone")));
        assert!(queries.iter().all(|q| !q.contains('$')));
    }

    #[test]
    fn test_unsupported_placeholder_is_an_error() {
        let result = synthesizer(&["$SKU $MANUFACTURER", "$SKU $VENDOR"]).synthesize(&biolegend());

        match result {
            Err(SynthesisError::UnresolvedPlaceholder { token, query, .. }) => {
                assert_eq!(token, "$VENDOR");
                assert_eq!(query, "100401 $VENDOR");
            }
            other => panic!("Expected UnresolvedPlaceholder, got {:?}", other),
        }
    }

    #[test]
    fn test_dollar_in_field_value_is_not_a_placeholder() {
        let entity = EntityDescriptor::new("$100", None, "BioLegend", Some("CD4"));
        let queries = synthesizer(&["$SKU $MANUFACTURER"]).synthesize(&entity).unwrap();
        assert_eq!(queries, vec!["$100 BioLegend".to_string()]);
    }

    #[test]
    fn test_escaped_dollar_expands_to_literal() {
        let queries = synthesizer(&["$TARGET ($$USD12) $SKU"])
            .synthesize(&biolegend())
            .unwrap();
        assert_eq!(queries, vec!["CD4 ($USD12) 100401".to_string()]);
    }

    #[test]
    fn test_queries_are_deduplicated_across_templates() {
        let queries = synthesizer(&["$SKU $MANUFACTURER", "$SKU $MANUFACTURER", "$SKU"])
            .synthesize(&biolegend())
            .unwrap();
        assert_eq!(queries.len(), 2);
    }

    #[test]
    fn test_alternative_manufacturers() {
        let entity = EntityDescriptor::new(
            "550280",
            Some("RM4-5"),
            Manufacturer::Alternatives(vec!["BD Biosciences".into(), "BD Pharmingen".into()]),
            Some("CD4"),
        );
        let queries = synthesizer(&["$SKU $MANUFACTURER"]).synthesize(&entity).unwrap();
        assert_eq!(queries.len(), 2);
        assert!(queries.contains(&"550280 BD Pharmingen".to_string()));
    }

    #[test]
    fn test_builtin_templates_for_catalog_entity() {
        let queries = QuerySynthesizer::with_builtin_templates()
            .synthesize(&biolegend())
            .unwrap();

        assert!(queries.contains(&"100401 BioLegend".to_string()));
        assert!(queries.contains(&r#""CD4 \(Clone #GK1.5, BioLegend""#.to_string()));
        assert!(queries.iter().all(|q| !q.contains("$")));
    }

    #[test]
    fn test_combine_as_is() {
        let composite = combine(&["a b".to_string(), "\"c d\"".to_string()]);
        assert_eq!(composite.text, "a b OR \"c d\"");
        assert_eq!(composite.query_count, 2);
        assert_eq!(composite.len(), 12);
    }

    #[test]
    fn test_combine_grouped() {
        let composite = combine_grouped(&["a b".to_string(), "c".to_string()]);
        assert_eq!(composite.text, "(a b) OR (c)");
    }

    #[test]
    fn test_compose_respects_config() {
        let set = Arc::new(TemplateSet::builtin());
        let plain = QuerySynthesizer::new(
            set,
            SynthesizerConfig {
                group_queries: false,
                max_query_length: 5,
            },
        );
        let composite = plain.compose(&["abc".to_string(), "def".to_string()]);
        assert_eq!(composite.text, "abc OR def");
        assert!(!plain.fits(&composite));
        assert!(combine(&[]).is_empty());
    }
}
