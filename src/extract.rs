//! Extraction run orchestration
//!
//! Wires the content store, table reader, crawler, and output sink
//! together for one run: open the sink against the store's build
//! version, load the interface manifest, walk the addon closure (unless
//! disabled), persist the explicit export list, and finalize the output.
//! Any fatal error propagates without finalizing, so an aborted run
//! never leaves a finished-looking output behind.

use std::path::PathBuf;

use crate::crawler::DependencyCrawler;
use crate::error::Result;
use crate::manifest::{export_tables, walk_addons};
use crate::sink::OutputSink;
use crate::store::ContentStore;
use crate::tables::{InterfaceManifest, TableReader};

/// Configuration for one extraction run.
///
/// # Example
///
/// ```
/// use cascframe::extract::ExtractionOptions;
///
/// let options = ExtractionOptions::new("extracts", "wow")
///     .with_exports(vec!["manifestinterfacetocdata".to_string()])
///     .with_zip_output(true);
/// ```
#[derive(Debug, Clone)]
pub struct ExtractionOptions {
    /// Directory the versioned tree or zip pair is written under.
    pub output_dir: PathBuf,
    /// Product name: used for the tree alias or the product container.
    pub product: String,
    /// Table names to export under `db2/`.
    pub exports: Vec<String>,
    /// Skip the addon/TOC crawl entirely; exports still run.
    pub skip_framexml: bool,
    /// Write the zip container pair instead of a directory tree.
    pub zip_output: bool,
}

impl ExtractionOptions {
    /// Options with the crawl enabled, no exports, directory-tree output.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>, product: &str) -> Self {
        Self {
            output_dir: output_dir.into(),
            product: product.to_string(),
            exports: Vec::new(),
            skip_framexml: false,
            zip_output: false,
        }
    }

    /// Set the table export list.
    #[must_use]
    pub fn with_exports(mut self, exports: Vec<String>) -> Self {
        self.exports = exports;
        self
    }

    /// Set whether to skip the addon/TOC crawl.
    #[must_use]
    pub fn with_skip_framexml(mut self, skip: bool) -> Self {
        self.skip_framexml = skip;
        self
    }

    /// Set whether to write zip containers.
    #[must_use]
    pub fn with_zip_output(mut self, zip: bool) -> Self {
        self.zip_output = zip;
        self
    }
}

/// What one finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// The build version that was extracted.
    pub version: String,
    /// Files persisted to the output.
    pub written: usize,
    /// References the content store had nothing for.
    pub skipped: usize,
}

/// Run one extraction against an open content store.
pub fn run_extraction(
    store: &mut dyn ContentStore,
    tables: &dyn TableReader,
    options: &ExtractionOptions,
) -> Result<ExtractionSummary> {
    let version = store.version().to_string();
    tracing::info!(%version, product = %options.product, "starting extraction");

    let mut sink = if options.zip_output {
        OutputSink::zip_pair(&*options.output_dir, &version, &options.product)?
    } else {
        OutputSink::tree(&*options.output_dir, &version, &options.product)?
    };

    let manifest = InterfaceManifest::load(store, tables)?;

    if options.skip_framexml {
        tracing::info!("addon crawl disabled, exports only");
    } else {
        let mut crawler = DependencyCrawler::new(store, &mut sink, &manifest);
        walk_addons(&mut crawler, &manifest.directories)?;
    }

    export_tables(store, tables, &mut sink, &options.exports)?;

    let summary = ExtractionSummary {
        version,
        written: sink.written(),
        skipped: sink.skipped(),
    };
    sink.finalize()?;
    tracing::info!(
        written = summary.written,
        skipped = summary.skipped,
        "extraction complete"
    );
    Ok(summary)
}
