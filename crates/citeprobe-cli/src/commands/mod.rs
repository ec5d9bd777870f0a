//! Command implementations.

pub mod catalog;
pub mod discover;
pub mod evaluate;
pub mod search;
pub mod synthesize;

pub use self::catalog::execute_catalog;
pub use self::discover::execute_discover;
pub use self::evaluate::{execute_evaluate, execute_evaluate_all};
pub use self::search::execute_search;
pub use self::synthesize::execute_synthesize;

use crate::config::Config;
use crate::error::{CliError, Result};
use citeprobe_bench::{BenchError, Benchmark, CsvGroundTruth, EntityCatalog};
use citeprobe_domain::EntityDescriptor;
use citeprobe_europepmc::EuropePmcClient;
use citeprobe_scorer::Scorer;
use citeprobe_synthesizer::{QuerySynthesizer, TemplateSet};
use std::fs;
use std::sync::Arc;

/// Load the configured catalog, or the built-in one.
pub fn load_catalog(config: &Config) -> Result<EntityCatalog> {
    match &config.paths.catalog {
        Some(path) => Ok(EntityCatalog::from_toml(&fs::read_to_string(path)?)?),
        None => Ok(EntityCatalog::builtin()),
    }
}

/// Load the configured template library, or the built-in one.
///
/// `.toml` files carry a version; any other file is one template per line.
pub fn load_templates(config: &Config) -> Result<Arc<TemplateSet>> {
    let templates = match &config.paths.templates {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            match path.extension().and_then(|e| e.to_str()) {
                Some("toml") => TemplateSet::from_toml(&text)?,
                _ => TemplateSet::parse_lines(1, &text),
            }
        }
        None => TemplateSet::builtin(),
    };
    templates.validate()?;
    Ok(Arc::new(templates))
}

/// Build the query synthesizer.
pub fn synthesizer(config: &Config) -> Result<QuerySynthesizer> {
    Ok(QuerySynthesizer::new(
        load_templates(config)?,
        config.synthesizer.clone(),
    ))
}

/// Build a benchmark runner against Europe PMC.
pub fn benchmark(config: &Config) -> Result<Benchmark<EuropePmcClient>> {
    let client = EuropePmcClient::new(config.europepmc.clone())?;
    let scorer = Scorer::new(config.scoring.clone()).map_err(BenchError::from)?;
    Ok(Benchmark::new(
        client,
        synthesizer(config)?,
        scorer,
        config.bench.clone(),
    )?)
}

/// The configured ground-truth tables.
pub fn ground_truth(config: &Config) -> CsvGroundTruth {
    CsvGroundTruth::new(&config.paths.ground_truth_dir)
        .with_skip_rows(config.paths.ground_truth_skip_rows)
}

/// Look up a 1-based catalog index.
pub fn entity_at(catalog: &EntityCatalog, index: usize) -> Result<&EntityDescriptor> {
    catalog.get(index).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "Index {} is out of range; the catalog has entities 1 to {}",
            index,
            catalog.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_entity_at_bounds() {
        let catalog = EntityCatalog::builtin();
        assert_eq!(entity_at(&catalog, 1).unwrap().sku(), "550280");
        assert_eq!(entity_at(&catalog, 7).unwrap().sku(), "BAF1828");
        assert!(matches!(entity_at(&catalog, 0), Err(CliError::InvalidInput(_))));
        assert!(matches!(entity_at(&catalog, 8), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_builtin_defaults() {
        let config = Config::default();
        assert_eq!(load_catalog(&config).unwrap().len(), 7);
        assert!(!load_templates(&config).unwrap().is_empty());
    }

    #[test]
    fn test_catalog_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.toml");
        fs::write(
            &path,
            "[[entity]]\nsku = \"MCA1817\"\nmanufacturer = \"Bio-Rad\"\ntarget = \"CD45\"\n",
        )
        .unwrap();

        let mut config = Config::default();
        config.paths.catalog = Some(path);

        let catalog = load_catalog(&config).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(1).unwrap().sku(), "MCA1817");
    }

    #[test]
    fn test_line_oriented_templates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("templates.txt");
        fs::write(&path, "$SKU $MANUFACTURER\n# $MANUFACTURER clone $CLONE\n\n$TARGET $CLONE\n").unwrap();

        let mut config = Config::default();
        config.paths.templates = Some(path);

        assert_eq!(load_templates(&config).unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_scoring_is_a_scorer_error() {
        let mut config = Config::default();
        config.scoring.max_title_distance = 0;

        assert!(matches!(
            benchmark(&config),
            Err(CliError::Bench(BenchError::Scorer(_)))
        ));
    }

    #[test]
    fn test_missing_template_file() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.paths.templates = Some(temp.path().join("absent.toml"));
        assert!(matches!(load_templates(&config), Err(CliError::Io(_))));
    }
}
