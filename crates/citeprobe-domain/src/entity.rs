//! Entity module - the reagent whose citations are being searched for

use std::fmt;

/// Manufacturer name(s) of an entity
///
/// A manufacturer is usually a single name whose spelling varies between
/// publications ("Bio-Rad", "Bio Rad"). Some vendors trade under several
/// unrelated names, which are listed explicitly as alternatives and are never
/// reprocessed by variant expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Manufacturer {
    /// A single name, expanded into spelling variants downstream
    Single(String),

    /// Caller-provided alternate names, used verbatim
    Alternatives(Vec<String>),
}

impl Manufacturer {
    /// The primary name (the single name or the first alternative)
    pub fn primary(&self) -> &str {
        match self {
            Manufacturer::Single(name) => name,
            Manufacturer::Alternatives(names) => names.first().map(String::as_str).unwrap_or(""),
        }
    }

    /// All names as given, without variant expansion
    pub fn names(&self) -> Vec<&str> {
        match self {
            Manufacturer::Single(name) => vec![name.as_str()],
            Manufacturer::Alternatives(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for Manufacturer {
    fn from(name: &str) -> Self {
        Manufacturer::Single(name.to_string())
    }
}

impl From<String> for Manufacturer {
    fn from(name: String) -> Self {
        Manufacturer::Single(name)
    }
}

impl From<Vec<String>> for Manufacturer {
    fn from(names: Vec<String>) -> Self {
        Manufacturer::Alternatives(names)
    }
}

/// Reporting identity of an entity: `(primary manufacturer, sku)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    /// Primary manufacturer name
    pub manufacturer: String,

    /// Catalog identifier
    pub sku: String,
}

impl fmt::Display for EntityId {
    /// Renders as `<manufacturer>_<sku>` with whitespace replaced by `-`,
    /// so the identifier can be used directly in file names.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let manufacturer: String = self
            .manufacturer
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        let sku: String = self.sku.split_whitespace().collect::<Vec<_>>().join("-");
        write!(f, "{}_{}", manufacturer, sku)
    }
}

/// Descriptor of one entity (a physical reagent)
///
/// Immutable once constructed. Optional fields are `None` when unknown; empty
/// strings are normalized to `None` so that an unknown field can never be
/// substituted into a query as an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    sku: String,
    clone_id: Option<String>,
    manufacturer: Manufacturer,
    target: Option<String>,
}

impl EntityDescriptor {
    /// Create a new entity descriptor
    ///
    /// # Examples
    ///
    /// ```
    /// use citeprobe_domain::EntityDescriptor;
    ///
    /// let entity = EntityDescriptor::new("100401", Some("GK1.5"), "BioLegend", Some("CD4"));
    /// assert_eq!(entity.id().to_string(), "BioLegend_100401");
    ///
    /// let no_clone = EntityDescriptor::new("AF1828", Some("  "), "R&D Systems", Some("TREM2"));
    /// assert!(no_clone.clone_id().is_none());
    /// ```
    pub fn new(
        sku: impl Into<String>,
        clone_id: Option<&str>,
        manufacturer: impl Into<Manufacturer>,
        target: Option<&str>,
    ) -> Self {
        let manufacturer = match manufacturer.into() {
            Manufacturer::Single(name) => Manufacturer::Single(name.trim().to_string()),
            Manufacturer::Alternatives(names) => Manufacturer::Alternatives(
                names
                    .into_iter()
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty())
                    .collect(),
            ),
        };

        Self {
            sku: sku.into().trim().to_string(),
            clone_id: normalize_optional(clone_id),
            manufacturer,
            target: normalize_optional(target),
        }
    }

    /// Catalog identifier
    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// Clone or lot identifier, if known
    pub fn clone_id(&self) -> Option<&str> {
        self.clone_id.as_deref()
    }

    /// Manufacturer name(s)
    pub fn manufacturer(&self) -> &Manufacturer {
        &self.manufacturer
    }

    /// Biological target, if known
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Reporting identity `(primary manufacturer, sku)`
    pub fn id(&self) -> EntityId {
        EntityId {
            manufacturer: self.manufacturer.primary().to_string(),
            sku: self.sku.clone(),
        }
    }
}

fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Error returned when an operator identifier string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierParseError {
    /// The identifier as given
    pub input: String,
}

impl fmt::Display for IdentifierParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bad entity identifier '{}': expected 'MANUFACTURER,SKU,TARGET' or 'MANUFACTURER,SKU,CLONE,TARGET'",
            self.input
        )
    }
}

impl std::error::Error for IdentifierParseError {}

impl std::str::FromStr for EntityDescriptor {
    type Err = IdentifierParseError;

    /// Parse `MANUFACTURER,SKU,TARGET` or `MANUFACTURER,SKU,CLONE,TARGET`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();

        let entity = match parts.as_slice() {
            [manufacturer, sku, target] => {
                EntityDescriptor::new(*sku, None, *manufacturer, Some(*target))
            }
            [manufacturer, sku, clone_id, target] => {
                EntityDescriptor::new(*sku, Some(*clone_id), *manufacturer, Some(*target))
            }
            _ => {
                return Err(IdentifierParseError {
                    input: s.to_string(),
                })
            }
        };

        if entity.sku.is_empty() || entity.manufacturer.primary().is_empty() {
            return Err(IdentifierParseError {
                input: s.to_string(),
            });
        }

        Ok(entity)
    }
}
