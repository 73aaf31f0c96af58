use clap::Parser;
use std::path::PathBuf;
use tokio::signal;
use tracing::{error, info};

use vstforge::codegen;
use vstforge::config;
use vstforge::error::Result;
use vstforge::spec;
use vstforge::state::AppState;
use vstforge::web;

#[derive(Parser, Debug)]
#[command(name = "vstforge")]
#[command(about = "Turns @plugin blocks in web audio sketches into JUCE parameter headers", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (YAML/JSON/TOML)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Run the analyze API server (default)
    Serve,
    /// Extract and normalize a plugin spec from a file, or stdin when omitted
    Analyze {
        /// HTML/JS file containing a @plugin block
        file: Option<PathBuf>,
    },
    /// Render the C++ parameter header from a canonical spec file
    Generate {
        /// Canonical spec JSON (defaults to the configured path)
        #[arg(long, value_name = "FILE")]
        spec: Option<PathBuf>,
        /// Output header path (defaults to the configured path)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize tracing
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("vstforge={log_level}").parse().unwrap()),
        )
        .init();

    // Config is loaded per command: analyze never reads it, so a broken
    // config file must not stop it.
    match args.command.unwrap_or(Command::Serve) {
        Command::Analyze { file } => run_analyze(file).await,
        Command::Generate { spec, out } => {
            let config = load_config(args.config)?;
            let spec_path = spec.unwrap_or_else(|| config.generator.spec_path.clone());
            let out_path = out.unwrap_or_else(|| config.generator.header_path.clone());
            codegen::generate(&spec_path, &out_path)?;
            Ok(())
        }
        Command::Serve => {
            let config = load_config(args.config)?;
            run_serve(config).await
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<config::Config> {
    match path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            config::load_from_path(&path).map_err(|e| {
                error!(
                    "Failed to load configuration from {}: {}",
                    path.display(),
                    e
                );
                e
            })
        }
        None => config::load_from_env_or_file().map_err(|e| {
            error!("Failed to load configuration: {}", e);
            e
        }),
    }
}

async fn run_serve(config: config::Config) -> Result<()> {
    info!("Starting vstforge API server");

    // Initialize application state
    let (state, _shutdown_rx) = AppState::new(config);

    let web_state = state.clone();
    let web_handle = tokio::spawn(async move {
        if let Err(e) = web::start_server(web_state).await {
            error!("API server error: {}", e);
        }
    });

    // Wait for shutdown signal
    shutdown_signal().await;

    info!("Shutting down vstforge");

    // Graceful shutdown with timeout
    let shutdown_timeout = tokio::time::timeout(tokio::time::Duration::from_secs(10), async {
        state.shutdown();
        let _ = web_handle.await;
    })
    .await;

    match shutdown_timeout {
        Ok(_) => {
            info!("Graceful shutdown completed");
        }
        Err(_) => {
            error!("Shutdown timeout exceeded, forcing exit");
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn run_analyze(file: Option<PathBuf>) -> Result<()> {
    use tokio::io::AsyncReadExt;

    let text = match file {
        Some(path) => tokio::fs::read_to_string(&path).await?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    match spec::parse_plugin_spec(&text) {
        Ok(plugin_spec) => {
            println!("{}", serde_json::to_string_pretty(&plugin_spec)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}


async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }
}
