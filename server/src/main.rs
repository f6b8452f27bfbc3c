use anyhow::Context;
use app::config::ServerConfig;
use app::service::ListingService;
use clap::Parser;
use http_bridge::model::ListingQuery;
use showroomcore::util::currency::format_price;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;

mod app;
mod http_bridge;

#[derive(Parser)]
#[command(author, version, about = "EV showroom catalog server")]
struct Args {
    /// Load server settings from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Serve this JSON catalog instead of the embedded lineup
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[arg(long)]
    bind: Option<SocketAddr>,
    /// Run one listing pass with the filter flags below and print it
    #[arg(long, default_value_t = false)]
    query: bool,
    #[arg(long, default_value = "")]
    search: String,
    /// Powertrain facet to select (repeatable)
    #[arg(long = "powertrain")]
    powertrains: Vec<String>,
    /// Vehicle-type facet to select (repeatable)
    #[arg(long = "vehicle-type")]
    vehicle_types: Vec<String>,
    /// Minimum price as typed, e.g. "1,500,000"
    #[arg(long)]
    min: Option<String>,
    #[arg(long)]
    max: Option<String>,
    /// Keep the HTTP bridge alive until Ctrl+C
    #[arg(long, default_value_t = false)]
    serve: bool,
}

impl Args {
    fn listing_query(&self) -> ListingQuery {
        ListingQuery {
            search: self.search.clone(),
            powertrains: self.powertrains.clone(),
            vehicle_types: self.vehicle_types.clone(),
            min: self.min.clone(),
            max: self.max.clone(),
        }
    }
}

async fn print_listing(service: &ListingService, query: &ListingQuery) -> anyhow::Result<()> {
    let payload = service.listing(query).await?;
    println!(
        "Showing {} of {} models",
        payload.result_count, payload.total_count
    );
    if let Some(range) = payload.price_range {
        println!(
            "Price range {} - {}",
            format_price(range.min),
            format_price(range.max)
        );
    }
    for model in &payload.results {
        println!(
            "  {:<32} {:>12}  {:<26} {}",
            model.name,
            model.price,
            model.vehicle_type,
            model.powertrain_technology()
        );
    }
    Ok(())
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    }
    .with_overrides(args.catalog.clone(), args.bind);

    let service = Arc::new(ListingService::from_config(config)?);
    let models = service.models().await?;
    log::info!("catalog ready with {} models", models.len());

    if args.query {
        print_listing(&service, &args.listing_query()).await?;
    }

    if args.serve {
        let (addr, server) = http_bridge::bridge::bind(service.clone(), service.config().bind)?;
        println!("HTTP bridge running on http://{addr} (Ctrl+C to stop)...");
        tokio::spawn(server);
        signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
        println!("Shutting down. {:?}", service.metrics());
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let runtime = TokioBuilder::new_multi_thread()
        .enable_all()
        .build()
        .context("creating tokio runtime")?;
    runtime.block_on(run(args))
}
