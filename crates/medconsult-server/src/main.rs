//! MedConsult - consultation booking server
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`MEDCONSULT_*`)
//! 3. Project config (`.medconsult/config.toml` in the project root)
//! 4. Global config (`~/.medconsult/config.toml`)
//! 5. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `MEDCONSULT_DEBUG`: Enable debug mode (`true`/`false`)
//! - `MEDCONSULT_BIND`: Listen address
//! - `MEDCONSULT_STORAGE`: Store backend (`memory`/`json`)
//! - `MEDCONSULT_STORAGE_PATH`: JSON snapshot path
//! - `MEDCONSULT_DIRECTORY_SEED`: Directory seed file

mod tracing_writer;

use anyhow::{Context, Result};
use clap::Parser;
use medconsult_app::{AppSummary, CliOverrides, ConfigLoader, MedConsultApp, MedConsultConfig};
use medconsult_runtime::config::StorageBackend;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// MedConsult - consultation booking server
#[derive(Parser, Debug)]
#[command(name = "medconsult")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Project root directory (defaults to current directory)
    #[arg(short = 'C', long)]
    project: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:8000
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,

    /// Consultation store backend
    #[arg(long, value_name = "BACKEND")]
    storage: Option<StorageBackend>,

    /// JSON store snapshot path
    #[arg(long, value_name = "PATH")]
    storage_path: Option<PathBuf>,

    /// Directory seed file (principals, profiles, clinics)
    #[arg(long, value_name = "PATH")]
    directory: Option<PathBuf>,

    /// Enable file logging into this directory
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Override file log level (default: debug)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Load config, directory and store, print a summary and exit
    #[arg(long)]
    check: bool,
}

impl Args {
    fn project_root(&self) -> PathBuf {
        self.project.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|e| {
                eprintln!("Warning: failed to get current directory, using '.': {e}");
                PathBuf::from(".")
            })
        })
    }

    /// CLI layer of the configuration. Flags left at their defaults do not
    /// override file or env values.
    fn overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .debug_opt(self.debug.then_some(true))
            .bind_opt(self.bind.clone())
            .storage_opt(self.storage)
            .storage_path_opt(self.storage_path.clone())
            .directory_seed_opt(self.directory.clone())
            .log_file_opt(self.log_file.clone())
            .log_level_opt(self.log_level.clone())
    }
}

/// Terminal filter: debug > verbose > `RUST_LOG` > "info".
fn terminal_filter(debug: bool, verbose: bool) -> EnvFilter {
    if debug {
        EnvFilter::new("debug,hyper=warn,h2=warn,tower=warn,tokio=warn")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// File filter directive for `level`, with HTTP internals kept at warn.
fn file_filter_directive(level: &str) -> String {
    format!("{level},hyper=warn,h2=warn,tower=warn,tokio=warn")
}

fn init_tracing(args: &Args, config: &MedConsultConfig) {
    let terminal_layer = fmt::layer()
        .with_target(false)
        .with_filter(terminal_filter(args.debug || config.debug, args.verbose));

    // File layer: independent filter, ANSI disabled (clean log)
    let log_file = if config.logging.file {
        tracing_writer::open_log_file(&config.logging.file_path_or_default())
    } else {
        None
    };

    if let Some(file) = log_file {
        let file_layer = fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .with_writer(tracing_writer::FileMakeWriter::new(file))
            .with_filter(EnvFilter::new(file_filter_directive(
                &config.logging.file_level,
            )));

        tracing_subscriber::registry()
            .with(terminal_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry().with(terminal_layer).init();
    }
}

fn print_summary(config: &MedConsultConfig, summary: AppSummary) {
    println!("Configuration OK");
    println!("  bind:          {}", config.server.bind);
    println!("  storage:       {}", config.storage.backend);
    if config.storage.backend == StorageBackend::Json {
        println!(
            "  storage path:  {}",
            config.storage.path_or_default().display()
        );
    }
    match &config.directory.seed {
        Some(seed) => println!("  directory:     {}", seed.display()),
        None => println!("  directory:     (empty)"),
    }
    println!("  principals:    {}", summary.principals);
    println!("  doctors:       {}", summary.doctors);
    println!("  patients:      {}", summary.patients);
    println!("  clinics:       {}", summary.clinics);
    println!("  consultations: {}", summary.consultations);
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let project_root = args.project_root();

    let builder = MedConsultApp::builder(args.overrides())
        .with_loader(ConfigLoader::new().with_project_root(&project_root));

    // Resolve config early to access logging settings for tracing initialization.
    let config = builder.resolve_config().context("failed to load configuration")?;
    init_tracing(&args, &config);

    println!("MedConsult v{}", env!("CARGO_PKG_VERSION"));
    info!(path = %project_root.display(), "Project root");

    if config.logging.file {
        info!(
            path = %config
                .logging
                .file_path_or_default()
                .join(tracing_writer::LOG_FILE_NAME)
                .display(),
            level = %config.logging.file_level,
            "File logging enabled"
        );
    }

    let app = builder.build().context("failed to start")?;

    if args.check {
        print_summary(app.config(), app.summary());
        return Ok(());
    }

    let summary = app.summary();
    info!(
        principals = summary.principals,
        consultations = summary.consultations,
        storage = %app.config().storage.backend,
        "MedConsult ready"
    );

    app.serve().await.context("server error")?;
    Ok(())
}
