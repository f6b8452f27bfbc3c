use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use tokio::sync::OnceCell;

use crate::catalog::vehicle::VehicleModel;
use crate::prelude::{CatalogError, CatalogResult, CatalogSource, PriceRange};
use crate::telemetry::log::LogManager;
use crate::util::currency::parse_price;

const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

/// The lineup compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedCatalog;

impl CatalogSource for EmbeddedCatalog {
    fn fetch_models(&self) -> CatalogResult<Vec<VehicleModel>> {
        Ok(serde_json::from_str(EMBEDDED_CATALOG)?)
    }

    fn describe(&self) -> String {
        "embedded catalog".into()
    }
}

/// A JSON array of vehicle records on disk.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for JsonFileCatalog {
    fn fetch_models(&self) -> CatalogResult<Vec<VehicleModel>> {
        let contents = fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn describe(&self) -> String {
        format!("catalog file {}", self.path.display())
    }
}

fn validate(models: &[VehicleModel]) -> CatalogResult<()> {
    let mut seen = HashSet::with_capacity(models.len());
    for model in models {
        if model.colors.is_empty() {
            return Err(CatalogError::NoColors(model.id.clone()));
        }
        if !seen.insert(model.id.as_str()) {
            return Err(CatalogError::DuplicateId(model.id.clone()));
        }
    }
    Ok(())
}

/// Immutable, lazily loaded list of vehicle records.
///
/// The first `load` pulls from the source; every later call, including
/// concurrent ones racing the first, observes the same data.
pub struct CatalogStore {
    source: Box<dyn CatalogSource>,
    models: OnceCell<Vec<VehicleModel>>,
    logger: LogManager,
}

impl CatalogStore {
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            models: OnceCell::new(),
            logger: LogManager::for_component("catalog"),
        }
    }

    pub fn embedded() -> Self {
        Self::new(EmbeddedCatalog)
    }

    pub async fn load(&self) -> CatalogResult<&[VehicleModel]> {
        let models = self
            .models
            .get_or_try_init(|| async {
                let models = self.source.fetch_models()?;
                validate(&models)?;
                self.logger.record(&format!(
                    "loaded {} models from {}",
                    models.len(),
                    self.source.describe()
                ));
                Ok::<_, CatalogError>(models)
            })
            .await?;
        Ok(models.as_slice())
    }

    pub fn is_loaded(&self) -> bool {
        self.models.initialized()
    }

    /// All models in catalog order.
    pub async fn get_all_models(&self) -> CatalogResult<&[VehicleModel]> {
        self.load().await
    }

    /// `Ok(None)` when no model carries `id`.
    pub async fn get_model_by_id(&self, id: &str) -> CatalogResult<Option<&VehicleModel>> {
        let models = self.load().await?;
        Ok(models.iter().find(|model| model.id == id))
    }

    /// The first `count` models, used for the home-page showcase.
    pub async fn featured(&self, count: usize) -> CatalogResult<&[VehicleModel]> {
        let models = self.load().await?;
        Ok(&models[..count.min(models.len())])
    }
}

/// Observed min/max over every model whose price parses.
///
/// Returns `None` when no price in the slice is usable.
pub fn dataset_price_range(models: &[VehicleModel]) -> Option<PriceRange> {
    let mut prices = models.iter().filter_map(|model| parse_price(&model.price).ok());
    let first = prices.next()?;
    let (min, max) = prices.fold((first, first), |(lo, hi), price| (lo.min(price), hi.max(price)));
    Some(PriceRange::new(min, max))
}
