use crate::app::config::ServerConfig;
use crate::http_bridge::model::{ColorPayload, ListingPayload, ListingQuery};
use anyhow::Context;
use showroomcore::catalog::{BlogFeed, BlogPost, CatalogStore, JsonFileCatalog, VehicleModel};
use showroomcore::listing::{Facet, ListingController};
use showroomcore::telemetry::{LogManager, Metrics, MetricsRecorder};
use showroomcore::util::color::{color_image, color_name, is_light_color};
use std::collections::BTreeSet;
use std::fs;
use tokio::sync::OnceCell;

/// Shared read-only catalog plus the per-request listing pipeline.
pub struct ListingService {
    config: ServerConfig,
    store: CatalogStore,
    blog: BlogFeed,
    /// Seeded once; each request works on a clone that shares the catalog.
    template: OnceCell<ListingController>,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl ListingService {
    pub fn new(config: ServerConfig, store: CatalogStore, blog: BlogFeed) -> Self {
        Self {
            config,
            store,
            blog,
            template: OnceCell::new(),
            metrics: MetricsRecorder::new(),
            logger: LogManager::for_component("listing-service"),
        }
    }

    pub fn from_config(config: ServerConfig) -> anyhow::Result<Self> {
        let store = match &config.catalog_path {
            Some(path) => CatalogStore::new(JsonFileCatalog::new(path)),
            None => CatalogStore::embedded(),
        };
        let blog = match &config.blog_path {
            Some(path) => {
                let contents = fs::read_to_string(path)
                    .with_context(|| format!("reading blog feed {}", path.display()))?;
                BlogFeed::from_json(&contents)
                    .with_context(|| format!("parsing blog feed {}", path.display()))?
            }
            None => BlogFeed::embedded().context("parsing embedded blog feed")?,
        };
        Ok(Self::new(config, store, blog))
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub async fn models(&self) -> anyhow::Result<&[VehicleModel]> {
        self.store.get_all_models().await.context("loading catalog")
    }

    pub async fn featured(&self) -> anyhow::Result<&[VehicleModel]> {
        self.store
            .featured(self.config.featured_count)
            .await
            .context("loading catalog")
    }

    pub async fn model(&self, id: &str) -> anyhow::Result<Option<&VehicleModel>> {
        let model = self
            .store
            .get_model_by_id(id)
            .await
            .context("loading catalog")?;
        if model.is_none() {
            self.metrics.record_lookup_miss();
            self.logger.anomaly(&format!("no model with id {id}"));
        }
        Ok(model)
    }

    /// Resolves a color selection for the detail page; `None` if the model is unknown.
    pub async fn color(&self, id: &str, hex: &str) -> anyhow::Result<Option<ColorPayload>> {
        let Some(model) = self.model(id).await? else {
            return Ok(None);
        };
        Ok(Some(ColorPayload {
            hex: hex.to_string(),
            name: color_name(Some(model), hex).to_string(),
            image: color_image(Some(model), hex).to_string(),
            is_light: is_light_color(hex),
        }))
    }

    async fn fresh_controller(&self) -> anyhow::Result<ListingController> {
        let template = self
            .template
            .get_or_try_init(|| async {
                let mut controller = ListingController::new();
                controller.seed(self.models().await?);
                Ok::<_, anyhow::Error>(controller)
            })
            .await?;
        Ok(template.clone())
    }

    /// Runs one listing pass: apply the query as user input to a fresh
    /// seeded controller, then filter.
    pub async fn listing(&self, query: &ListingQuery) -> anyhow::Result<ListingPayload> {
        let mut controller = self.fresh_controller().await?;
        controller.set_search(query.search.as_str());

        // Toggling is self-inverse, so duplicates must collapse first.
        let powertrains: BTreeSet<&str> = query.powertrains.iter().map(String::as_str).collect();
        for value in powertrains {
            controller.toggle_facet(Facet::Powertrain, value);
        }
        let vehicle_types: BTreeSet<&str> =
            query.vehicle_types.iter().map(String::as_str).collect();
        for value in vehicle_types {
            controller.toggle_facet(Facet::VehicleType, value);
        }

        if let Some(min) = &query.min {
            controller.set_min_input(min);
        }
        if let Some(max) = &query.max {
            controller.set_max_input(max);
        }

        let report = controller.filter_report();
        self.metrics.record_query(report.unpriced);
        if report.unpriced > 0 {
            self.logger.anomaly(&format!(
                "{} models skipped for unreadable prices",
                report.unpriced
            ));
        }

        let results: Vec<VehicleModel> = report.results.into_iter().cloned().collect();
        Ok(ListingPayload {
            result_count: results.len(),
            results,
            total_count: controller.total_count(),
            price_range: controller.state().price_range,
            dataset_range: controller.dataset_range(),
        })
    }

    pub fn latest_posts(&self, limit: Option<usize>) -> &[BlogPost] {
        self.blog.latest(limit.unwrap_or(self.config.latest_posts))
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics.snapshot()
    }
}
