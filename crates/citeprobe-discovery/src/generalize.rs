//! Generalization of matched text into reusable templates

use citeprobe_domain::Placeholder;
use citeprobe_synthesizer::{QueryTemplate, VariantSet};
use std::collections::BTreeSet;

/// Characters escaped by [`GeneralizedPattern::escaped`]
const TEMPLATE_META: &[char] = &['(', ')', '.', '{', '}'];

/// A matched substring rewritten with placeholder tokens
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneralizedPattern {
    text: String,
    placeholders: BTreeSet<Placeholder>,
}

impl GeneralizedPattern {
    /// The generalized text, in template syntax
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Placeholders substituted into the text
    pub fn placeholders(&self) -> &BTreeSet<Placeholder> {
        &self.placeholders
    }

    /// Whether any field value was found in the match
    pub fn is_entity_independent(&self) -> bool {
        !self.placeholders.is_empty()
    }

    /// The pattern as a query template
    pub fn to_template(&self) -> QueryTemplate {
        QueryTemplate::new(self.text.clone())
    }

    /// The pattern with parentheses, braces and dots backslash-escaped
    pub fn escaped(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        for c in self.text.chars() {
            if TEMPLATE_META.contains(&c) {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }
}

/// Replace every occurrence of an entity's variant values with placeholder tokens
///
/// The text is scanned once, left to right. At each position the longest
/// matching value wins; equal-length values prefer the more specific field
/// (clone, then SKU, target, manufacturer). Inserted tokens are never rescanned,
/// so one field's value cannot consume characters of another field's token.
/// Literal dollar signs are written `$$` so the text stays a valid template.
pub fn generalize(cues: &VariantSet, matched: &str) -> GeneralizedPattern {
    let mut candidates: Vec<(Placeholder, &str)> =
        cues.values().filter(|(_, value)| !value.is_empty()).collect();
    candidates.sort_by(|(pa, a), (pb, b)| {
        b.len()
            .cmp(&a.len())
            .then(pa.specificity_rank().cmp(&pb.specificity_rank()))
    });

    let mut text = String::with_capacity(matched.len());
    let mut placeholders = BTreeSet::new();
    let mut rest = matched;

    while let Some(c) = rest.chars().next() {
        match candidates.iter().find(|(_, value)| rest.starts_with(value)) {
            Some((placeholder, value)) => {
                text.push_str(placeholder.token());
                placeholders.insert(*placeholder);
                rest = &rest[value.len()..];
            }
            None => {
                if c == '$' {
                    text.push('$');
                }
                text.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    GeneralizedPattern { text, placeholders }
}
