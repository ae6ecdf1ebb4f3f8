//! Pipeline page: serves the status page of a DevSecOps delivery pipeline.
//!
//! This is the application entry point. It initializes tracing, loads configuration
//! from a TOML file, reads the build record from the environment, sets up the Axum
//! router and starts the HTTP server.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pipeline_page::config::{AppConfig, BuildInfo, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use pipeline_page::server::start_server;
use pipeline_page::routes::create_router;
use pipeline_page::script::banner;
use pipeline_page::state::AppState;
use pipeline_page::templates::init_templates;

/// Pipeline page: status page for a DevSecOps delivery pipeline
#[derive(Parser, Debug)]
#[command(name = "pipeline-page", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "pipeline_page=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Listen port, overriding http.port from the configuration file
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration first: it selects the log format
    let mut config = AppConfig::load(&args.config)?;
    if let Some(port) = args.port {
        config.http.port = port;
    }

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(path = %args.config, "Loaded configuration");

    let build = BuildInfo::from_env();
    for line in banner(&build).lines() {
        tracing::info!("{}", line);
    }
    tracing::info!(
        version = %build.app_version,
        build = %build.build_number,
        environment = %build.environment,
        environment_override = ?config.page.environment_override,
        "Build record loaded"
    );

    // Initialize Tera templates
    let tera = init_templates(&config.page.template_glob)?;
    tracing::info!("Initialized templates");

    let state = AppState::new(config.clone(), build, tera);
    let app = create_router(state);

    start_server(app, &config.http).await?;

    Ok(())
}
