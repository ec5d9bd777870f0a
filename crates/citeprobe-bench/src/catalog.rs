//! Entity catalogs for batch runs

use crate::error::BenchError;
use citeprobe_domain::{EntityDescriptor, Manufacturer};
use serde::{Deserialize, Serialize};

/// Built-in benchmark corpus: `(sku, clone, manufacturer names, target)`
const BUILTIN: &[(&str, Option<&str>, &[&str], &str)] = &[
    ("550280", Some("RM4-5"), &["BD Biosciences", "BD Pharmingen"], "CD4"),
    ("11-0041-82", Some("GK1.5"), &["Invitrogen"], "CD4"),
    ("ab183685", Some("EPR19514"), &["Abcam"], "CD4"),
    ("100401", Some("GK1.5"), &["BioLegend"], "CD4"),
    ("ab133616", Some("EPR6855"), &["Abcam"], "CD4"),
    ("AF1828", None, &["R&D Systems"], "TREM2"),
    ("BAF1828", None, &["R&D Systems"], "TREM2"),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ManufacturerEntry {
    Single(String),
    Alternatives(Vec<String>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogEntry {
    sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    clone: Option<String>,
    manufacturer: ManufacturerEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    entity: Vec<CatalogEntry>,
}

impl From<CatalogEntry> for EntityDescriptor {
    fn from(entry: CatalogEntry) -> Self {
        let manufacturer = match entry.manufacturer {
            ManufacturerEntry::Single(name) => Manufacturer::Single(name),
            ManufacturerEntry::Alternatives(names) => Manufacturer::Alternatives(names),
        };
        EntityDescriptor::new(
            entry.sku,
            entry.clone.as_deref(),
            manufacturer,
            entry.target.as_deref(),
        )
    }
}

impl From<&EntityDescriptor> for CatalogEntry {
    fn from(entity: &EntityDescriptor) -> Self {
        let manufacturer = match entity.manufacturer() {
            Manufacturer::Single(name) => ManufacturerEntry::Single(name.clone()),
            Manufacturer::Alternatives(names) => ManufacturerEntry::Alternatives(names.clone()),
        };
        Self {
            sku: entity.sku().to_string(),
            clone: entity.clone_id().map(str::to_string),
            manufacturer,
            target: entity.target().map(str::to_string),
        }
    }
}

/// An ordered list of entities addressed by 1-based index
///
/// # Examples
///
/// ```
/// use citeprobe_bench::EntityCatalog;
///
/// let catalog = EntityCatalog::builtin();
/// assert_eq!(catalog.len(), 7);
/// assert_eq!(catalog.get(4).unwrap().sku(), "100401");
/// assert!(catalog.get(0).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityCatalog {
    entities: Vec<EntityDescriptor>,
}

impl EntityCatalog {
    /// Create a catalog from entities in order
    pub fn new(entities: Vec<EntityDescriptor>) -> Self {
        Self { entities }
    }

    /// The built-in benchmark corpus
    pub fn builtin() -> Self {
        let entities = BUILTIN
            .iter()
            .map(|(sku, clone_id, manufacturers, target)| {
                let manufacturer = match manufacturers {
                    [single] => Manufacturer::Single(single.to_string()),
                    names => {
                        Manufacturer::Alternatives(names.iter().map(|n| n.to_string()).collect())
                    }
                };
                EntityDescriptor::new(*sku, *clone_id, manufacturer, Some(*target))
            })
            .collect();
        Self { entities }
    }

    /// Entity at a 1-based index
    pub fn get(&self, index: usize) -> Option<&EntityDescriptor> {
        index.checked_sub(1).and_then(|i| self.entities.get(i))
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities with their 1-based indices
    pub fn iter(&self) -> impl Iterator<Item = (usize, &EntityDescriptor)> {
        self.entities.iter().enumerate().map(|(i, e)| (i + 1, e))
    }

    /// Load a catalog from TOML (`[[entity]]` tables)
    ///
    /// `manufacturer` is either a name or a list of alternate names.
    pub fn from_toml(toml_str: &str) -> Result<Self, BenchError> {
        let file: CatalogFile = toml::from_str(toml_str)
            .map_err(|e| BenchError::Catalog(format!("Failed to parse TOML: {}", e)))?;

        let entities: Vec<EntityDescriptor> =
            file.entity.into_iter().map(EntityDescriptor::from).collect();

        if let Some(position) = entities.iter().position(|e| e.sku().is_empty()) {
            return Err(BenchError::Catalog(format!(
                "Entity {} has an empty sku",
                position + 1
            )));
        }

        Ok(Self { entities })
    }

    /// Serialize the catalog to TOML
    pub fn to_toml(&self) -> Result<String, BenchError> {
        let file = CatalogFile {
            entity: self.entities.iter().map(CatalogEntry::from).collect(),
        };
        toml::to_string_pretty(&file)
            .map_err(|e| BenchError::Catalog(format!("Failed to serialize to TOML: {}", e)))
    }
}
