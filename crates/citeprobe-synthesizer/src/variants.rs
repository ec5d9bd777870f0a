//! Term variant expansion
//!
//! Publications render the same name or identifier inconsistently. The
//! expanders here generate the alternate renderings a query or pattern should
//! accept for one entity.

use citeprobe_domain::{EntityDescriptor, Manufacturer, Placeholder};
use std::collections::{BTreeMap, HashSet};

/// Upper bound on toggled boundaries in one clone identifier (2^4 renderings)
const MAX_CLONE_SLOTS: usize = 4;

static UNKNOWN: Variants = Variants::Unknown;

/// Acceptable substitutions for one placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Variants {
    /// The field is unknown; templates referencing it are dropped
    Unknown,

    /// Ordered, de-duplicated concrete renderings
    Known(Vec<String>),
}

impl Variants {
    /// Build from a list of renderings; an empty list means unknown
    pub fn from_values(values: Vec<String>) -> Self {
        if values.is_empty() {
            Variants::Unknown
        } else {
            Variants::Known(values)
        }
    }

    /// Whether the field is unknown
    pub fn is_unknown(&self) -> bool {
        match self {
            Variants::Unknown => true,
            Variants::Known(values) => values.is_empty(),
        }
    }

    /// Renderings (empty when unknown)
    pub fn values(&self) -> &[String] {
        match self {
            Variants::Unknown => &[],
            Variants::Known(values) => values,
        }
    }
}

/// Expand a name into hyphen-joined, space-joined and concatenated renderings
///
/// `-` and ` ` are interchangeable token boundaries. The result is
/// de-duplicated in first-appearance order, so a name without separators
/// yields a single rendering.
///
/// # Examples
///
/// ```
/// use citeprobe_synthesizer::expand_term;
///
/// assert_eq!(expand_term("Bio-Rad"), vec!["Bio-Rad", "Bio Rad", "BioRad"]);
/// assert_eq!(expand_term("BioLegend"), vec!["BioLegend"]);
/// ```
pub fn expand_term(term: &str) -> Vec<String> {
    let normalized = term.replace('-', " ");
    let fragments: Vec<&str> = normalized.split(' ').filter(|f| !f.is_empty()).collect();

    if fragments.is_empty() {
        return Vec::new();
    }

    dedup_preserving_order([
        fragments.join("-"),
        fragments.join(" "),
        fragments.concat(),
    ])
}

/// Expand an optional term; `None` propagates as [`Variants::Unknown`]
pub fn expand_optional(term: Option<&str>) -> Variants {
    match term {
        Some(term) => Variants::from_values(expand_term(term)),
        None => Variants::Unknown,
    }
}

/// Expand a manufacturer
///
/// A single name is expanded with [`expand_term`]; caller-provided
/// alternatives are authoritative and returned unchanged.
pub fn expand_manufacturer(manufacturer: &Manufacturer) -> Variants {
    match manufacturer {
        Manufacturer::Single(name) => Variants::from_values(expand_term(name)),
        Manufacturer::Alternatives(names) => Variants::from_values(names.clone()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Letter,
    Digit,
    Separator,
    Other,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_ascii_digit() {
            CharClass::Digit
        } else if c.is_alphabetic() {
            CharClass::Letter
        } else if matches!(c, '-' | '.' | ' ') {
            CharClass::Separator
        } else {
            CharClass::Other
        }
    }

    fn is_alphanumeric(self) -> bool {
        matches!(self, CharClass::Letter | CharClass::Digit)
    }
}

struct Run {
    class: CharClass,
    text: String,
}

enum Part {
    Fixed(String),
    /// Alternatives for one boundary; the original rendering comes first
    Choice(Vec<&'static str>),
}

/// Split into runs of letters, runs of digits, and single separators
fn split_runs(s: &str) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for c in s.chars() {
        let class = CharClass::of(c);
        match runs.last_mut() {
            Some(run) if run.class == class && class != CharClass::Separator => run.text.push(c),
            _ => runs.push(Run {
                class,
                text: c.to_string(),
            }),
        }
    }
    runs
}

/// Expand a clone or lot identifier
///
/// Letter/digit boundaries toggle between no separator and a space (a dot,
/// when present, is kept as a third option). Digit-to-digit junctions written
/// with `-` or `.` toggle between the two. The original rendering is first.
///
/// # Examples
///
/// ```
/// use citeprobe_synthesizer::expand_clone;
///
/// assert_eq!(expand_clone("RM4-5"), vec!["RM4-5", "RM4.5", "RM 4-5", "RM 4.5"]);
/// assert_eq!(expand_clone("GK1.5")[0], "GK1.5");
/// ```
pub fn expand_clone(clone_id: &str) -> Vec<String> {
    let clone_id = clone_id.trim();
    if clone_id.is_empty() {
        return Vec::new();
    }

    let runs = split_runs(clone_id);
    let mut parts = Vec::with_capacity(runs.len() * 2);
    let mut slots = 0;
    let mut i = 0;

    while i < runs.len() {
        let run = &runs[i];
        parts.push(Part::Fixed(run.text.clone()));

        if !run.class.is_alphanumeric() || slots >= MAX_CLONE_SLOTS {
            i += 1;
            continue;
        }

        match (runs.get(i + 1), runs.get(i + 2)) {
            // Adjacent letter/digit boundary, e.g. "RM4"
            (Some(next), _) if next.class.is_alphanumeric() => {
                parts.push(Part::Choice(vec!["", " "]));
                slots += 1;
                i += 1;
            }
            // Separated boundary, e.g. "RM 4", "4-5", "1.5"
            (Some(sep), Some(after))
                if sep.class == CharClass::Separator && after.class.is_alphanumeric() =>
            {
                let options = match (run.class == after.class, run.class, sep.text.as_str()) {
                    (false, _, " ") => Some(vec![" ", ""]),
                    (false, _, ".") => Some(vec![".", "", " "]),
                    (true, CharClass::Digit, "-") => Some(vec!["-", "."]),
                    (true, CharClass::Digit, ".") => Some(vec![".", "-"]),
                    _ => None,
                };

                match options {
                    Some(options) => {
                        parts.push(Part::Choice(options));
                        slots += 1;
                        i += 2;
                    }
                    None => i += 1,
                }
            }
            _ => i += 1,
        }
    }

    let mut renderings = vec![String::new()];
    for part in &parts {
        match part {
            Part::Fixed(text) => {
                for rendering in &mut renderings {
                    rendering.push_str(text);
                }
            }
            Part::Choice(options) => {
                renderings = renderings
                    .iter()
                    .flat_map(|prefix| options.iter().map(move |o| format!("{}{}", prefix, o)))
                    .collect();
            }
        }
    }

    dedup_preserving_order(renderings)
}

fn dedup_preserving_order(values: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

/// Variant renderings for every placeholder of one entity
///
/// These are the entity's "variable search cues": the values substituted into
/// templates by the synthesizer and replaced back by placeholders during
/// pattern generalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSet {
    variants: BTreeMap<Placeholder, Variants>,
}

impl VariantSet {
    /// A set where every placeholder is unknown
    pub fn empty() -> Self {
        Self {
            variants: Placeholder::ALL
                .into_iter()
                .map(|p| (p, Variants::Unknown))
                .collect(),
        }
    }

    /// Compute the variant set for an entity
    ///
    /// Target and SKU are single-valued; the clone is expanded with
    /// [`expand_clone`] and the manufacturer with [`expand_manufacturer`].
    pub fn for_entity(entity: &EntityDescriptor) -> Self {
        let singleton = |value: Option<&str>| match value {
            Some(v) if !v.is_empty() => Variants::Known(vec![v.to_string()]),
            _ => Variants::Unknown,
        };

        Self::empty()
            .with(Placeholder::Target, singleton(entity.target()))
            .with(
                Placeholder::Clone,
                entity
                    .clone_id()
                    .map(|c| Variants::from_values(expand_clone(c)))
                    .unwrap_or(Variants::Unknown),
            )
            .with(Placeholder::Manufacturer, expand_manufacturer(entity.manufacturer()))
            .with(Placeholder::Sku, singleton(Some(entity.sku())))
    }

    /// Replace the variants of one placeholder
    pub fn with(mut self, placeholder: Placeholder, variants: Variants) -> Self {
        self.variants.insert(placeholder, variants);
        self
    }

    /// Variants of one placeholder
    pub fn get(&self, placeholder: Placeholder) -> &Variants {
        self.variants.get(&placeholder).unwrap_or(&UNKNOWN)
    }

    /// Iterate over `(placeholder, rendering)` pairs of all known values
    pub fn values(&self) -> impl Iterator<Item = (Placeholder, &str)> {
        self.variants
            .iter()
            .flat_map(|(p, v)| v.values().iter().map(move |value| (*p, value.as_str())))
    }
}
