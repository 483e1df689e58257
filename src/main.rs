use clap::{Parser, Subcommand};
use env_logger::Env;
use gallery_indexer::config::{self, IndexerConfig};
use gallery_indexer::imaging::RustBackend;
use gallery_indexer::index::{self, CheckOutcome, IndexOutcome};
use gallery_indexer::output;
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    if env!("INDEXER_ON_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    let hash = env!("INDEXER_GIT_HASH");
    if hash.is_empty() {
        "dev@unknown"
    } else {
        // Leaked once at startup
        Box::leak(format!("dev@{hash}").into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "gallery-indexer")]
#[command(about = "Derive low-res previews and write the gallery manifest")]
#[command(long_about = "\
Derive low-res previews and write the gallery manifest

Scans the source folder (top level only) for .png, .jpg, .jpeg, .gif and
.webp files, writes a '-low' copy of each one that does not have it yet,
and saves the sorted list of {full, low} paths as JSON.

  images/gallery/
  ├── cat.jpg          # source
  ├── cat-low.jpg      # generated once, 400px wide at most
  └── x-low.png        # already low-res, never treated as a source

Run with no arguments to use the defaults. Settings can be overridden in
gallery.toml; run 'gallery-indexer gen-config' for a documented copy.
Set RUST_LOG=debug for per-file diagnostics.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (missing file = built-in defaults)
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Source image folder (overrides config)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Manifest file to write (overrides config)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Derive missing low-res images and write the manifest (default)
    Run,
    /// Show what a run would do without writing anything
    Check,
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let root = Path::new(".");

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let config = resolve_config(&cli.config, cli.source, cli.output)?;
            match index::update_gallery(root, &config, output::print_index_event)? {
                IndexOutcome::SourceMissing(dir) => output::print_missing_source(&dir),
                IndexOutcome::Written(summary) => output::print_summary(&summary),
            }
        }
        Command::Check => {
            let config = resolve_config(&cli.config, cli.source, cli.output)?;
            match index::check_gallery(&RustBackend::new(), root, &config)? {
                CheckOutcome::SourceMissing(dir) => output::print_missing_source(&dir),
                CheckOutcome::Planned(planned) => {
                    output::print_check_output(&config.source_dir, &planned)
                }
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config file and apply CLI overrides on top.
fn resolve_config(
    path: &Path,
    source: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<IndexerConfig, config::ConfigError> {
    let mut config = config::load_config(path)?;
    if let Some(source) = source {
        config.source_dir = source;
    }
    if let Some(output) = output {
        config.output_file = output;
    }
    Ok(config)
}
