use clap::Parser;
use radius_inspect::{InspectConfig, Inspector};
use std::path::PathBuf;
use std::process;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Decode captured RADIUS packets and check their authenticators
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "radius-inspect")]
struct Cli {
    /// Raw packet files, inspected in order
    #[arg(value_name = "FILES", required = true)]
    files: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Shared secret (overrides the configuration file)
    #[arg(short, long)]
    secret: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => match InspectConfig::from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load configuration {}: {}", path.display(), e);
                process::exit(2);
            }
        },
        None => InspectConfig::default(),
    };

    if let Some(secret) = cli.secret {
        if secret.is_empty() {
            eprintln!("Secret cannot be empty");
            process::exit(2);
        }
        config.secret = secret;
    }

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter())))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(ref path) = cli.config {
        info!("Loaded configuration from: {}", path.display());
    }

    let inspector = Inspector::from_config(&config);
    let mut failures = 0usize;

    for path in &cli.files {
        match inspector.inspect_file(path) {
            Ok(report) => {
                println!("{}:", path.display());
                print!("{}", report);
            }
            Err(e) => {
                error!("{}: {}", path.display(), e);
                failures += 1;
            }
        }
    }

    if inspector.pending() > 0 {
        warn!("{} request(s) without a reply", inspector.pending());
    }

    if failures > 0 {
        error!("{} of {} file(s) could not be inspected", failures, cli.files.len());
        process::exit(1);
    }
}
