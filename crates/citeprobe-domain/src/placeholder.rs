//! Placeholder module - the named slots of query templates

use std::fmt;

/// A named slot in a query template
///
/// Templates reference placeholders as `$NAME` tokens:
/// - Target: the biological target (`$TARGET`)
/// - Clone: the clone or lot identifier (`$CLONE`)
/// - Manufacturer: the manufacturer name (`$MANUFACTURER`)
/// - Sku: the catalog identifier (`$SKU`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    /// Biological target, e.g. `CD4`
    Target,

    /// Clone or lot identifier, e.g. `GK1.5`
    Clone,

    /// Manufacturer name, e.g. `BioLegend`
    Manufacturer,

    /// Catalog identifier, e.g. `100401`
    Sku,
}

impl Placeholder {
    /// All placeholders in canonical substitution order
    pub const ALL: [Placeholder; 4] = [
        Placeholder::Target,
        Placeholder::Clone,
        Placeholder::Manufacturer,
        Placeholder::Sku,
    ];

    /// Get the placeholder name as it appears after the `$`
    pub fn as_str(&self) -> &'static str {
        match self {
            Placeholder::Target => "TARGET",
            Placeholder::Clone => "CLONE",
            Placeholder::Manufacturer => "MANUFACTURER",
            Placeholder::Sku => "SKU",
        }
    }

    /// Get the full template token, e.g. `$TARGET`
    pub fn token(&self) -> &'static str {
        match self {
            Placeholder::Target => "$TARGET",
            Placeholder::Clone => "$CLONE",
            Placeholder::Manufacturer => "$MANUFACTURER",
            Placeholder::Sku => "$SKU",
        }
    }

    /// Parse a placeholder name, with or without the leading `$`
    pub fn parse(s: &str) -> Option<Self> {
        let name = s.strip_prefix('$').unwrap_or(s);
        match name.to_uppercase().as_str() {
            "TARGET" => Some(Placeholder::Target),
            "CLONE" => Some(Placeholder::Clone),
            "MANUFACTURER" => Some(Placeholder::Manufacturer),
            "SKU" => Some(Placeholder::Sku),
            _ => None,
        }
    }

    /// Rank used to break ties between equally long variant values
    ///
    /// Lower ranks are more specific: a clone rendering is tried before a SKU,
    /// a SKU before a target, and a target before a manufacturer name.
    pub fn specificity_rank(&self) -> u8 {
        match self {
            Placeholder::Clone => 0,
            Placeholder::Sku => 1,
            Placeholder::Target => 2,
            Placeholder::Manufacturer => 3,
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl std::str::FromStr for Placeholder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid placeholder: {}", s))
    }
}
