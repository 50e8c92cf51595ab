//! cascframe CLI - command-line interface for interface data extraction

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::extract::{ExtractionOptions, run_extraction};
use crate::store::DirectoryStore;
use crate::tables::JsonTableReader;

/// The products an extraction can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum Product {
    /// Retail.
    Wow,
    /// Retail PTR.
    Wowt,
    /// Retail experimental PTR.
    Wowxptr,
    /// Retail beta.
    WowBeta,
    /// Classic.
    WowClassic,
    /// Classic beta.
    WowClassicBeta,
    /// Classic Era.
    WowClassicEra,
}

impl Product {
    /// The product's directory and alias name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Product::Wow => "wow",
            Product::Wowt => "wowt",
            Product::Wowxptr => "wowxptr",
            Product::WowBeta => "wow_beta",
            Product::WowClassic => "wow_classic",
            Product::WowClassicBeta => "wow_classic_beta",
            Product::WowClassicEra => "wow_classic_era",
        }
    }
}

#[derive(Parser)]
#[command(name = "cascframe")]
#[command(version, about = "Extract FrameXML/Interface data from a local content cache", long_about = None)]
struct Cli {
    /// Content cache root; the product's store lives at <CACHE>/<product>
    #[arg(short, long, default_value = "cache")]
    cache: PathBuf,

    /// Export the named data table as db2/<NAME>.db2 (repeatable)
    #[arg(short, long = "export", value_name = "NAME")]
    exports: Vec<String>,

    /// Output directory for the versioned tree or zip pair
    #[arg(short, long, default_value = "extracts")]
    output: PathBuf,

    /// Product to extract
    #[arg(short, long, value_enum)]
    product: Product,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Skip the FrameXML/addon crawl (exports still run)
    #[arg(long)]
    skip_framexml: bool,

    /// Write <version>.zip and <product>.zip instead of a directory tree
    #[arg(long)]
    zip: bool,
}

/// Run the cascframe CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let store_root = cli.cache.join(cli.product.as_str());
    let mut store = DirectoryStore::open(&store_root)?;

    let mut tables = JsonTableReader::new();
    let registry_file = store_root.join("tables.json");
    if registry_file.exists() {
        tables = tables.with_registry_file(&registry_file)?;
    }

    let options = ExtractionOptions::new(cli.output, cli.product.as_str())
        .with_exports(cli.exports)
        .with_skip_framexml(cli.skip_framexml)
        .with_zip_output(cli.zip);
    let summary = run_extraction(&mut store, &tables, &options)?;

    println!(
        "{}: extracted {} files for build {} ({} skipped)",
        cli.product.as_str(),
        summary.written,
        summary.version,
        summary.skipped
    );
    Ok(())
}
