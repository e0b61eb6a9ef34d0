use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use billing_server::{
    create_app,
    report::{self, ReportEntity, ReportFormat},
    wait_for_shutdown, AppConfig, BillingServer,
};
use billing_service::{BillingService, ListQuery};
use error_common::{log_error, AppError, Result};

const DEFAULT_CONFIG_FILE: &str = "billing.yaml";

/// Hospital billing HTTP server and reporting tool
#[derive(Parser, Debug)]
#[command(name = "billing-server")]
#[command(about = "Hospital billing API server", version)]
struct Cli {
    /// Configuration file (YAML, TOML or JSON); `billing.yaml` is read when present
    #[arg(short, long, env = "HBILL_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default)
    Serve {
        /// Server bind address
        #[arg(long)]
        host: Option<String>,

        /// Server port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print statistics and filtered lists, then exit
    Report {
        #[arg(long, value_enum, default_value = "all")]
        entity: ReportEntity,

        /// Case-insensitive search text
        #[arg(long, default_value = "")]
        search: String,

        /// `all` or a status/type value
        #[arg(long, default_value = "all")]
        filter: String,

        #[arg(long, value_enum, default_value = "text")]
        format: ReportFormat,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path, true),
        None => AppConfig::load(Path::new(DEFAULT_CONFIG_FILE), false),
    }
    .map_err(|e| AppError::ConfigError(e.to_string()))?;

    let command = cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    });
    if cli.verbose {
        config.logging.log_level = "debug".to_string();
    } else if matches!(command, Command::Report { .. }) {
        config.logging.log_level = "warn".to_string();
    }

    logger_redacted::init_tracing(&config.logging, "tower_http=info,hyper=info")
        .map_err(|e| AppError::LoggingError(e.to_string()))?;

    let result = run(command, config).await;
    if let Err(err) = &result {
        log_error("billing-server", err);
    }
    result
}

async fn run(command: Command, config: AppConfig) -> Result<()> {
    let service = BillingService::seeded(config.billing.clone())
        .map_err(|e| AppError::BillingError(e.to_string()))?;

    match command {
        Command::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            serve(service, &host, port).await
        }
        Command::Report {
            entity,
            search,
            filter,
            format,
        } => {
            let query = ListQuery::new(search, filter);
            let output = report::render(&service, entity, &query, format)
                .map_err(|e| AppError::Other(e.into()))?;
            println!("{output}");
            Ok(())
        }
    }
}

async fn serve(service: BillingService, host: &str, port: u16) -> Result<()> {
    info!("🏥 {}", "Starting Hospital Billing Server".bright_cyan());
    info!("📋 Version: {}", env!("CARGO_PKG_VERSION").bright_white());
    info!(
        "📊 Aggregate policy: {}",
        format!("{:?}", service.settings().aggregate_policy).bright_white()
    );

    let app = create_app(BillingServer::new(service));

    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .map_err(|e| AppError::NetworkError(format!("Failed to bind to {host}:{port}: {e}")))?;

    info!("🚀 {}", format!("Billing server running on http://{host}:{port}").bright_green());
    info!("📋 {}", format!("Health check available at: http://{host}:{port}/health").bright_blue());
    info!("📋 {}", format!("API v1 available at: http://{host}:{port}/api/v1").bright_blue());
    info!("📖 {}", format!("OpenAPI document at: http://{host}:{port}/api-docs/openapi.json").bright_blue());

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown(tokio::signal::ctrl_c()))
        .await
        .map_err(|e| AppError::ServerError(format!("HTTP server error: {e}")))
}
