use anyhow::Result;
use clap::Parser;
use rankwise::{api::create_router, init_tracing, AppState, Config};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Overrides `logging.level` from the config file.
    #[arg(short, long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (config, origin) = Config::load(&args.config)?;
    init_tracing(args.log_level.as_deref().unwrap_or(&config.logging.level));
    origin.log(&args.config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.workers.max(1))
        .enable_all()
        .build()?;

    runtime.block_on(serve(config))
}

async fn serve(config: Config) -> Result<()> {
    let addr = config.server.socket_addr()?;
    info!(
        server = ?config.server,
        catalog = ?config.catalog.source,
        "Starting rankwise recommendation server"
    );

    let state = AppState::new(config)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
