use anyhow::Context;
use clap::{Parser, Subcommand};

use shelf_app::books::{
    catalog::Catalog,
    filter::filter_records,
    source,
    store::{CatalogStore, LoadStatus},
};
use shelf_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "shelf", version, about = "Book catalog service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve,
    /// Load the catalog once and print it as JSON
    Fetch {
        /// URL or file path; defaults to the configured catalog source
        #[arg(long)]
        source: Option<String>,
        /// Only print books whose id, name or author contain this text
        #[arg(long, default_value = "")]
        filter: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load Shelf settings")?;
    shelf_telemetry::init(&settings.telemetry)?;

    match cli.command {
        Command::Serve => shelf_app::run(settings).await,
        Command::Fetch { source, filter } => fetch(settings, source, &filter).await,
    }
}

async fn fetch(settings: Settings, source_override: Option<String>, filter: &str) -> anyhow::Result<()> {
    let mut catalog_settings = settings.catalog;
    if let Some(location) = source_override {
        catalog_settings.source = location;
    }

    let catalog = Catalog::new(CatalogStore::new(), source::from_settings(&catalog_settings)?);
    catalog.load().await;

    let state = catalog.snapshot().await;
    if state.load_status != LoadStatus::Succeeded {
        anyhow::bail!(
            "catalog load from '{}' failed: {}",
            catalog_settings.source,
            state.load_error.unwrap_or_else(|| "unknown error".to_string())
        );
    }

    let records = filter_records(&state.items, filter);
    tracing::info!(
        total = state.items.len(),
        shown = records.len(),
        "catalog fetched"
    );
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
