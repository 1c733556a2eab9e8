use anyhow::{Context, Result};
use clap::Parser;
use rankwise::services::catalog::StaticCatalog;
use rankwise::services::recommendation::RecommendationService;
use rankwise::{init_tracing, Config, RecommendationRequest};
use std::sync::Arc;
use tracing::info;

/// Ranks a catalog file for one recommendation request without starting the server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON array of catalog items.
    #[arg(long)]
    catalog: String,

    /// JSON recommendation request (userId, preferences, histories, topN).
    #[arg(long)]
    request: String,

    /// Overrides the request's topN.
    #[arg(long, allow_negative_numbers = true)]
    top_n: Option<i64>,

    /// Print each result with its score breakdown instead of the service response.
    #[arg(long)]
    explain: bool,

    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let (config, origin) = Config::load(&args.config)?;
    origin.log(&args.config);

    let raw = std::fs::read_to_string(&args.request)
        .with_context(|| format!("Failed to read request file {}", args.request))?;
    let mut request: RecommendationRequest =
        serde_json::from_str(&raw).context("Failed to parse recommendation request")?;
    if let Some(top_n) = args.top_n {
        request.top_n = Some(top_n);
    }

    let catalog = StaticCatalog::from_json_file(&args.catalog)?;
    info!(items = catalog.len(), "Catalog loaded");

    let service = RecommendationService::new(Arc::new(catalog), config.recommendation);
    let output = if args.explain {
        let (_, ranked) = service.rank_scored(request).await?;
        serde_json::to_string_pretty(&ranked)?
    } else {
        let response = service.recommend(request).await?;
        serde_json::to_string_pretty(&response)?
    };

    println!("{}", output);
    Ok(())
}
