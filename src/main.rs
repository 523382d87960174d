//! Demo of the catalog pages.
//!
//! Walks the three routes in order: fills in and submits a quote, attempts a
//! registration, then loads the inventory from the configured backend.

use catalog_forms::clients::{InventoryClient, QuotationClient, RegistrationClient};
use catalog_forms::config::{build_config, CliArgs};
use catalog_forms::lifecycle::{CatalogSystem, Route};
use catalog_forms::prompt::LogPrompt;
use catalog_forms::store::{ProductStore, ReqwestTransport};
use clap::Parser;
use form_framework::tracing::setup_tracing_with_default;
use form_framework::PageHandle;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, Instrument};

/// Catalog forms demo
#[derive(Parser, Debug)]
#[command(name = "catalog-forms")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base URL of the product backend
    #[arg(long, env = "CATALOG_API_URL")]
    api_url: Option<String>,

    /// Path of the product resource under the API URL
    #[arg(long, env = "CATALOG_RESOURCE_PATH")]
    resource_path: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "CATALOG_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Extra attempts for failed list reads
    #[arg(long, env = "CATALOG_READ_RETRIES")]
    read_retries: Option<u32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CATALOG_LOG_LEVEL")]
    log_level: Option<String>,

    /// Answer to confirmation prompts
    #[arg(long, env = "CATALOG_AUTO_CONFIRM")]
    auto_confirm: Option<bool>,
}

impl From<Args> for CliArgs {
    fn from(args: Args) -> Self {
        CliArgs {
            config_file: args.config,
            api_url: args.api_url,
            resource_path: args.resource_path,
            request_timeout_secs: args.timeout_secs,
            read_retries: args.read_retries,
            log_level: args.log_level,
            auto_confirm: args.auto_confirm,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli_args: CliArgs = Args::parse().into();
    let config = build_config(&cli_args)?;

    setup_tracing_with_default(config.log_level.as_filter_str());
    info!(
        api_url = %config.api_url,
        resource_path = %config.resource_path,
        timeout_secs = config.request_timeout_secs,
        read_retries = config.read_retries,
        auto_confirm = config.auto_confirm,
        "Configuration loaded"
    );

    let transport = ReqwestTransport::new(config.api_url.clone(), config.request_timeout())?;
    let store = ProductStore::new(Arc::new(transport))
        .with_resource_path(config.resource_path.clone())
        .with_read_retries(config.read_retries);
    let mut system = CatalogSystem::new(store, Arc::new(LogPrompt::new(config.auto_confirm)));

    system.navigate(Route::Quotation).await?;
    if let Some(client) = system.quotation() {
        quote_demo(client)
            .instrument(tracing::info_span!("quotation"))
            .await?;
    }

    system.navigate(Route::Registration).await?;
    if let Some(client) = system.registration() {
        registration_demo(client)
            .instrument(tracing::info_span!("registration"))
            .await?;
    }

    system.navigate(Route::Inventory).await?;
    if let Some(client) = system.inventory() {
        inventory_demo(client)
            .instrument(tracing::info_span!("inventory"))
            .await?;
    }

    system.shutdown().await?;
    Ok(())
}

async fn quote_demo(client: &QuotationClient) -> Result<(), Box<dyn std::error::Error>> {
    client.input("product", "Standing desk".into()).await?;
    client.input("quantity", 3.0.into()).await?;
    client.input("unitPrice", 100.0.into()).await?;
    client.input("email", "buyer@example.com".into()).await?;
    client.input("discountCode", "DESC10".into()).await?;

    let view = client.view().await?;
    info!(subtotal = view.subtotal, total = view.total, "Before discount");

    // Let the discount code settle.
    tokio::time::sleep(Duration::from_millis(600)).await;
    let view = client.view().await?;
    info!(discount = view.discount_amount, total = view.total, "After discount");

    let quote = client.submit().await?;
    info!(total = quote.total, "Quote submitted");
    Ok(())
}

async fn registration_demo(client: &RegistrationClient) -> Result<(), Box<dyn std::error::Error>> {
    client.input("username", "ab".into()).await?;
    client.input("password", "password".into()).await?;

    if let Err(e) = client.submit().await {
        warn!(error = %e, "Registration rejected");
    }
    let view = client.view().await?;
    info!(status = %view.status, message = %view.message, invalid = ?view.invalid_field_names, "Registration status");
    Ok(())
}

async fn inventory_demo(client: &InventoryClient) -> Result<(), Box<dyn std::error::Error>> {
    let view = client.view().await?;
    info!(
        products = view.stats.total_products,
        value = view.stats.total_inventory_value,
        "Inventory"
    );
    Ok(())
}
