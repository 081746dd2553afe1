mod commands;

use clap::{Parser, Subcommand};
use config::AppConfig;
use file_io::fs::{DirectoryDownloader, PathPicker};
use std::path::PathBuf;
use std::sync::Arc;
use storage::{PersistenceGateway, SledStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "invoice-form", version, about = "Keep, export and import invoice form data")]
struct Cli {
    /// Directory of the form database (overrides the configured one)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the saved form with line amounts and total
    Show,
    /// Import a JSON file and save it as the current form
    Import { path: PathBuf },
    /// Write the saved form to a JSON file
    Export {
        /// File name (default: invoice-<number>-<date>.json)
        #[arg(long)]
        filename: Option<String>,
        /// Target directory (overrides the configured one)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Delete the saved form
    Clear,
    /// List supported currencies
    Currencies,
    /// Show the configuration, persisting any overrides given
    Config {
        /// Default export directory
        #[arg(long)]
        export_dir: Option<String>,
        /// Log filter used when RUST_LOG is unset
        #[arg(long)]
        log_filter: Option<String>,
    },
}

fn init_tracing(default_filter: &str) {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn init_storage(
    cfg: &AppConfig,
    db: Option<PathBuf>,
    import_path: Option<PathBuf>,
    export_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let db_path = db.unwrap_or_else(|| PathBuf::from(&cfg.storage.db_path));
    let export_dir = export_dir.unwrap_or_else(|| PathBuf::from(&cfg.export.directory));
    tracing::debug!(db=%db_path.display(), export_dir=%export_dir.display(), "opening form storage");

    let store = SledStore::open(&db_path)?;
    let gateway = PersistenceGateway::new(
        Arc::new(store),
        PathPicker::new(import_path),
        DirectoryDownloader::new(export_dir),
    );
    storage::init(gateway)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load().unwrap_or_default();
    init_tracing(&cfg.logging.filter);

    match cli.command {
        Command::Show => {
            init_storage(&cfg, cli.db, None, None)?;
            commands::show()
        }
        Command::Import { path } => {
            init_storage(&cfg, cli.db, Some(path), None)?;
            commands::import().await
        }
        Command::Export { filename, dir } => {
            init_storage(&cfg, cli.db, None, dir)?;
            commands::export(filename.as_deref())
        }
        Command::Clear => {
            init_storage(&cfg, cli.db, None, None)?;
            commands::clear();
            Ok(())
        }
        Command::Currencies => {
            commands::currencies();
            Ok(())
        }
        Command::Config {
            export_dir,
            log_filter,
        } => {
            let db = cli.db.map(|p| p.to_string_lossy().to_string());
            commands::configure(cfg, db, export_dir, log_filter)
        }
    }
}
