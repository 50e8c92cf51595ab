//! # cascframe
//!
//! Extracts the closed set of FrameXML/Interface files out of a World of
//! Warcraft content cache and re-materializes them as a versioned
//! directory tree (with a stable product alias) or as a pair of zip
//! containers.
//!
//! The interesting part is the dependency-closure crawl: the files to
//! extract are not known up front. A bootstrap set of TOC manifests and
//! XML documents reference further files by relative path, those files
//! reference more, and the crawler chases the whole closure while
//! resolving every reference against its referencing document and
//! tolerating references to files the archive no longer carries.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cascframe::extract::{ExtractionOptions, run_extraction};
//! use cascframe::store::DirectoryStore;
//! use cascframe::tables::JsonTableReader;
//!
//! let mut store = DirectoryStore::open("cache/wow")?;
//! let tables = JsonTableReader::new();
//! let options = ExtractionOptions::new("extracts", "wow");
//! let summary = run_extraction(&mut store, &tables, &options)?;
//! println!("extracted {} files for {}", summary.written, summary.version);
//! # Ok::<(), cascframe::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `cascframe` command-line binary

pub mod crawler;
pub mod error;
pub mod extract;
pub mod manifest;
pub mod markup;
pub mod paths;
pub mod sink;
pub mod store;
pub mod tables;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::crawler::DependencyCrawler;
    pub use crate::error::{Error, Result};
    pub use crate::extract::{ExtractionOptions, ExtractionSummary, run_extraction};
    pub use crate::manifest::{AddonDescriptor, BuildVariant, export_tables, walk_addons};
    pub use crate::markup::MarkupScanner;
    pub use crate::paths::{normalize, resolve};
    pub use crate::sink::OutputSink;
    pub use crate::store::{ContentPayload, ContentStore, DirectoryStore};
    pub use crate::tables::{InterfaceManifest, JsonTableReader, TableReader};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
