//! Query templates

use crate::error::SynthesisError;
use citeprobe_domain::Placeholder;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Matches a `$$` escape or any `$NAME`-shaped token, supported or not
pub(crate) static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(?:\$|\w+)").expect("token pattern is valid"));

/// One piece of a parsed template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    /// Text copied into every query
    Literal(&'a str),
    /// A supported placeholder
    Field(Placeholder),
    /// A `$NAME` token that is not a supported placeholder
    Unsupported(&'a str),
}

/// A query pattern with named placeholders
///
/// Literal text, quoting and grouping markup are kept verbatim; only
/// `$TARGET`, `$CLONE`, `$MANUFACTURER` and `$SKU` are substituted. A literal
/// dollar sign is written `$$`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryTemplate {
    text: String,
}

impl QueryTemplate {
    /// Create a template from its text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Template text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Escape literal text for use inside a template
    pub fn escape_literal(text: &str) -> String {
        text.replace('$', "$$")
    }

    /// Whether the template references a placeholder
    pub fn references(&self, placeholder: Placeholder) -> bool {
        self.segments().contains(&Segment::Field(placeholder))
    }

    /// Placeholders referenced by the template, in canonical order
    pub fn placeholders(&self) -> Vec<Placeholder> {
        let segments = self.segments();
        Placeholder::ALL
            .into_iter()
            .filter(|p| segments.contains(&Segment::Field(*p)))
            .collect()
    }

    /// `$NAME` tokens that are not supported placeholders
    pub fn unsupported_tokens(&self) -> Vec<String> {
        self.segments()
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Unsupported(token) => Some(token.to_string()),
                _ => None,
            })
            .collect()
    }

    /// Split the text into literals, placeholders and unsupported tokens
    pub(crate) fn segments(&self) -> Vec<Segment<'_>> {
        let mut segments = Vec::new();
        let mut last = 0;

        for m in TOKEN_RE.find_iter(&self.text) {
            if m.start() > last {
                segments.push(Segment::Literal(&self.text[last..m.start()]));
            }
            let token = m.as_str();
            segments.push(if token == "$$" {
                Segment::Literal(&token[..1])
            } else {
                match Placeholder::ALL.into_iter().find(|p| p.token() == token) {
                    Some(placeholder) => Segment::Field(placeholder),
                    None => Segment::Unsupported(token),
                }
            });
            last = m.end();
        }

        if last < self.text.len() {
            segments.push(Segment::Literal(&self.text[last..]));
        }
        segments
    }
}

/// The versioned, immutable library of query templates
///
/// Adding or removing a template changes synthesis output for every entity,
/// so the set carries a version number as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSet {
    /// Version of the template library
    pub version: u32,

    /// Templates in declaration order
    pub templates: Vec<QueryTemplate>,
}

impl TemplateSet {
    /// Create a template set
    pub fn new(version: u32, templates: Vec<QueryTemplate>) -> Self {
        Self { version, templates }
    }

    /// The built-in template library (version 1)
    ///
    /// The `\(` sequences are passed through to the search engine, which
    /// treats them as literal parentheses inside a phrase.
    pub fn builtin() -> Self {
        Self::new(
            1,
            vec![
                QueryTemplate::new("$SKU $MANUFACTURER"),
                QueryTemplate::new(r#""$TARGET \(Clone #$CLONE, $MANUFACTURER""#),
                QueryTemplate::new(r#""$TARGET antibody \($CLONE; $MANUFACTURER""#),
                QueryTemplate::new(r#""$MANUFACTURER clone $CLONE""#),
                QueryTemplate::new(r#""$MANUFACTURER, clone $CLONE""#),
            ],
        )
    }

    /// Parse line-oriented template text
    ///
    /// One template per line. Blank lines and lines starting with `#` are
    /// disabled entries.
    pub fn parse_lines(version: u32, text: &str) -> Self {
        let templates = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(QueryTemplate::new)
            .collect();
        Self::new(version, templates)
    }

    /// Number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the set has no templates
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over templates
    pub fn iter(&self) -> impl Iterator<Item = &QueryTemplate> {
        self.templates.iter()
    }

    /// Reject templates that reference unsupported placeholders
    pub fn validate(&self) -> Result<(), SynthesisError> {
        for template in &self.templates {
            if let Some(token) = template.unsupported_tokens().into_iter().next() {
                return Err(SynthesisError::Template(format!(
                    "template '{}' references unsupported placeholder {}",
                    template.text(),
                    token
                )));
            }
        }
        Ok(())
    }

    /// Load and validate a template set from TOML
    ///
    /// ```toml
    /// version = 2
    /// templates = ["$SKU $MANUFACTURER", "\"$MANUFACTURER clone $CLONE\""]
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self, SynthesisError> {
        let set: TemplateSet = toml::from_str(toml_str)
            .map_err(|e| SynthesisError::Template(format!("Failed to parse TOML: {}", e)))?;
        set.validate()?;
        Ok(set)
    }

    /// Serialize the template set to TOML
    pub fn to_toml(&self) -> Result<String, SynthesisError> {
        toml::to_string_pretty(self)
            .map_err(|e| SynthesisError::Template(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        let template = QueryTemplate::new(r#""$TARGET \(Clone #$CLONE, $MANUFACTURER""#);
        assert_eq!(
            template.placeholders(),
            vec![Placeholder::Target, Placeholder::Clone, Placeholder::Manufacturer]
        );
        assert!(!template.references(Placeholder::Sku));
    }

    #[test]
    fn test_unsupported_tokens() {
        let template = QueryTemplate::new("$SKU $VENDOR");
        assert_eq!(template.unsupported_tokens(), vec!["$VENDOR".to_string()]);
    }

    #[test]
    fn test_escaped_dollar_is_literal() {
        let template = QueryTemplate::new("$TARGET ($$USD12) $SKU");
        assert!(template.unsupported_tokens().is_empty());
        assert_eq!(template.placeholders(), vec![Placeholder::Target, Placeholder::Sku]);

        // "$$SKU" is a dollar sign followed by the word SKU
        assert!(!QueryTemplate::new("cost $$SKU").references(Placeholder::Sku));
        assert_eq!(QueryTemplate::escape_literal("$5 $USD"), "$$5 $$USD");
    }

    #[test]
    fn test_lowercase_token_is_unsupported() {
        let template = QueryTemplate::new("$sku $MANUFACTURER");
        assert_eq!(template.unsupported_tokens(), vec!["$sku".to_string()]);
    }

    #[test]
    fn test_builtin_is_valid() {
        let set = TemplateSet::builtin();
        assert_eq!(set.version, 1);
        assert_eq!(set.len(), 5);
        assert!(set.validate().is_ok());
    }

    #[test]
    fn test_parse_lines_skips_disabled() {
        let text = "\n$SKU $MANUFACTURER\n#$TARGET*$CLONE\n\n\"$MANUFACTURER clone $CLONE\"\n";
        let set = TemplateSet::parse_lines(3, text);
        assert_eq!(set.version, 3);
        assert_eq!(
            set.templates,
            vec![
                QueryTemplate::new("$SKU $MANUFACTURER"),
                QueryTemplate::new(r#""$MANUFACTURER clone $CLONE""#),
            ]
        );
    }

    #[test]
    fn test_from_toml_rejects_unknown_placeholder() {
        let result = TemplateSet::from_toml("version = 2\ntemplates = [\"$LOT $SKU\"]");
        assert!(matches!(result, Err(SynthesisError::Template(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let set = TemplateSet::builtin();
        let parsed = TemplateSet::from_toml(&set.to_toml().unwrap()).unwrap();
        assert_eq!(set, parsed);
    }
}
