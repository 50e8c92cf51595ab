//! Error types for `cascframe`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `cascframe` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Content Store Errors ====================
    /// The content store could not be opened at all.
    ///
    /// This aborts a run before any output is produced.
    #[error("failed to open content store at {path}: {source}")]
    StoreOpen {
        /// The store root that was requested.
        path: PathBuf,
        /// The underlying IO failure.
        source: std::io::Error,
    },

    /// The content store's build version could not be determined.
    #[error("content store has no usable build version: {0}")]
    InvalidStoreVersion(String),

    // ==================== Crawl Errors ====================
    /// A reference chain descended deeper than the crawl allows.
    ///
    /// Real interface data nests a handful of levels at most, so hitting
    /// the cap means a reference cycle or corrupt manifest.
    #[error("crawl depth limit ({limit}) exceeded at {path}")]
    CrawlDepthExceeded {
        /// The path whose visit would exceed the limit.
        path: String,
        /// The configured depth limit.
        limit: usize,
    },

    // ==================== Table Errors ====================
    /// A manifest table required for the interface crawl was not in the store.
    #[error("manifest table not found in store: {table}")]
    ManifestTableMissing {
        /// The table name.
        table: String,
    },

    /// A table row is missing a field the caller requires.
    #[error("table {table} row missing field: {field}")]
    TableFieldMissing {
        /// The table name.
        table: String,
        /// The missing field name.
        field: String,
    },

    /// A requested export name has no schema registry entry.
    #[error("unknown table export: {0}")]
    UnknownExport(String),

    // ==================== Parsing Errors ====================
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// XML attribute error.
    #[error("XML attribute error: {0}")]
    XmlAttrError(String),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    // ==================== Output Errors ====================
    /// Zip container error.
    #[error("zip container error: {0}")]
    ZipError(#[from] zip::result::ZipError),
}

// Add conversion from quick_xml::events::attributes::AttrError
impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttrError(err.to_string())
    }
}

/// A specialized Result type for `cascframe` operations.
pub type Result<T> = std::result::Result<T, Error>;
