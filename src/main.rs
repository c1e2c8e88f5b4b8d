use clap::{Parser, Subcommand};
use nitin_site::content::Collection;
use nitin_site::{config, generate, output};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "nitin-site")]
#[command(about = "Static site generator for a personal portfolio and notes blog")]
#[command(long_about = "\
Static site generator for a personal portfolio and notes blog

Notes are markdown files with YAML (---) or TOML (+++) front matter.
Numbered files are listed first, by number; the number never appears in URLs.

Content structure:

  content/
  ├── config.toml                  # Site config (optional, overrides defaults)
  ├── assets/                      # Copied verbatim to the output root
  └── notes/
      ├── 010-hello-world.md       # → /notes/hello-world/
      ├── 020-rust-and-wasm.md     # → /notes/rust-and-wasm/
      └── scratchpad.md            # Unnumbered: listed after numbered notes

Front matter keys: title, date (YYYY-MM-DD), summary (or description),
slug, tags, draft. Title falls back to the first '# heading', then to the
filename; summary falls back to the first paragraph.

Run 'nitin-site gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load content and write the full site
    Build,
    /// Validate content and config without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Build => {
            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let site_config = load_config(&cli.source)?;
            let (collection, report) = generate::build(&cli.source, &cli.output, &site_config)?;
            output::print_inventory(&collection, &site_config.notes.dir, &cli.source);
            println!();
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site_config = load_config(&cli.source)?;
            let collection = Collection::load(&cli.source, &site_config)?;
            output::print_inventory(&collection, &site_config.notes.dir, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config and size the parse pool from it. Must run before notes are parsed.
fn load_config(source: &Path) -> Result<config::SiteConfig, config::ConfigError> {
    let site_config = config::load_config(source)?;
    init_thread_pool(&site_config.processing);
    Ok(site_config)
}

/// Install the tracing subscriber. `RUST_LOG` overrides the `-v` level.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; config can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
