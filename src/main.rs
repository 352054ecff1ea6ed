//! `dockhand` application entry point.
//!
//! This binary serves the REST façade over a Docker or Podman engine. It uses
//! `eyre` for opaque error handling at the application boundary, converting
//! domain-specific errors into human-readable reports.
//!
//! Configuration is loaded with layered precedence via `OrthoConfig`:
//! 1. Application defaults
//! 2. Configuration file (`~/.config/dockhand/config.toml` or path from `DOCKHAND_CONFIG_PATH`)
//! 3. Environment variables (`DOCKHAND_*`)
//! 4. Command-line arguments

use clap::Parser;
use dockhand::api::Api;
use dockhand::config::{AppConfig, Cli, Commands, LoggingConfig, load_config};
use dockhand::engine::{
    EngineConnector, EngineFactory, SocketEngineFactory, SocketResolver, ping_with_timeout,
};
use dockhand::error::{EngineError, Result as DockhandResult};
use dockhand::http;
use eyre::{Report, Result as EyreResult};
use mockable::DefaultEnv;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Application entry point.
///
/// Loads configuration, installs the log subscriber, then runs the selected
/// subcommand on a multi-threaded Tokio runtime.
fn main() -> EyreResult<()> {
    let cli = Cli::parse();
    let config = load_config(&cli).map_err(Report::from)?;
    init_tracing(&config.logging);

    let runtime = tokio::runtime::Runtime::new().map_err(|e| {
        Report::from(EngineError::RuntimeCreationFailed {
            message: e.to_string(),
        })
    })?;

    runtime.block_on(run(&cli, &config)).map_err(Report::from)
}

/// Install the `fmt` subscriber. `RUST_LOG` wins over `logging.level`.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// Execute the CLI command, returning domain-specific errors.
async fn run(cli: &Cli, config: &AppConfig) -> DockhandResult<()> {
    let factory = engine_factory(config);
    match cli.command {
        Commands::Serve => serve(factory, config).await,
        Commands::Check => check(&factory).await,
    }
}

fn engine_factory(config: &AppConfig) -> SocketEngineFactory {
    let env = DefaultEnv::new();
    let resolver = SocketResolver::new(&env);
    SocketEngineFactory::new(EngineConnector::resolve_socket(
        config.engine_socket.as_deref(),
        &resolver,
    ))
}

/// Serve the REST API until Ctrl-C.
async fn serve(factory: SocketEngineFactory, config: &AppConfig) -> DockhandResult<()> {
    info!(socket = factory.socket(), "using container engine");
    let api = Api::new(factory, config.server.request_timeout());
    let app = http::app(api, &config.server)?;
    let listener = http::bind(&config.server).await?;
    http::serve(listener, app, http::shutdown_signal()).await
}

/// Ping the engine and report the socket that answered.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
async fn check(factory: &SocketEngineFactory) -> DockhandResult<()> {
    let client = factory.connect()?;
    ping_with_timeout(&client).await?;
    println!("Container engine reachable at {}", factory.socket());
    Ok(())
}
