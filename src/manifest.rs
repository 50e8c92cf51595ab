//! Interface manifest walking
//!
//! The crawl has two independent entry points. The addon walk expands the
//! fixed `Interface/FrameXML` root plus every directory the directory
//! manifest lists into per-variant TOC and bindings documents and feeds
//! each to the crawler. The export list persists explicitly requested
//! data tables as opaque `db2/<name>.db2` files with no dependency
//! scanning at all.

use crate::crawler::DependencyCrawler;
use crate::error::{Error, Result};
use crate::sink::OutputSink;
use crate::store::{ContentPayload, ContentStore};
use crate::tables::TableReader;

/// The addon directory every client build carries.
pub const FRAMEXML_DIR: &str = "Interface/FrameXML";

/// Per-client-flavor copy of a logical addon.
///
/// Each variant contributes its own TOC filename suffix and its own
/// `Interface<suffix>` root for the companion bindings file. The order is
/// fixed and matches the client's load preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildVariant {
    /// The unsuffixed base copy.
    Base,
    /// Classic Era flavor (`_Vanilla`).
    Vanilla,
    /// Burning Crusade Classic flavor (`_TBC`).
    Tbc,
    /// Retail flavor (`_Mainline`).
    Mainline,
}

impl BuildVariant {
    /// All variants, in load order.
    pub const ALL: [BuildVariant; 4] = [
        BuildVariant::Base,
        BuildVariant::Vanilla,
        BuildVariant::Tbc,
        BuildVariant::Mainline,
    ];

    /// The filename suffix this variant appends to the addon name.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            BuildVariant::Base => "",
            BuildVariant::Vanilla => "_Vanilla",
            BuildVariant::Tbc => "_TBC",
            BuildVariant::Mainline => "_Mainline",
        }
    }
}

/// An addon directory and the name derived from its final path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonDescriptor {
    /// Directory path, e.g. `Interface/AddOns/Blizzard_UIPanels_Game`.
    pub directory: String,
    /// Final path segment, e.g. `Blizzard_UIPanels_Game`.
    pub name: String,
}

impl AddonDescriptor {
    /// Derive a descriptor from an addon directory path.
    #[must_use]
    pub fn from_directory(directory: &str) -> Self {
        let directory = directory.trim_end_matches('/').to_string();
        let name = directory
            .rsplit_once('/')
            .map_or(directory.as_str(), |(_, name)| name)
            .to_string();
        Self { directory, name }
    }

    /// TOC document path for one build variant.
    #[must_use]
    pub fn toc_path(&self, variant: BuildVariant) -> String {
        format!("{}/{}{}.toc", self.directory, self.name, variant.suffix())
    }

    /// Companion bindings document path for one build variant: the addon
    /// directory re-rooted under the variant's `Interface<suffix>` tree.
    #[must_use]
    pub fn bindings_path(&self, variant: BuildVariant) -> String {
        let below_root = self
            .directory
            .split_once('/')
            .map_or(self.directory.as_str(), |(_, rest)| rest);
        format!("Interface{}/{below_root}/Bindings.xml", variant.suffix())
    }
}

/// Crawl every addon's per-variant TOC and bindings documents.
///
/// `directories` is the dynamic list from the directory manifest; the
/// fixed FrameXML root is always walked first.
pub fn walk_addons(crawler: &mut DependencyCrawler<'_>, directories: &[String]) -> Result<()> {
    for directory in std::iter::once(FRAMEXML_DIR).chain(directories.iter().map(String::as_str)) {
        let addon = AddonDescriptor::from_directory(directory);
        tracing::debug!(directory = %addon.directory, "walking addon");
        for variant in BuildVariant::ALL {
            crawler.visit_toc(&addon.toc_path(variant))?;
            crawler.visit(&addon.bindings_path(variant))?;
        }
    }
    Ok(())
}

/// Persist each requested table under `db2/<name>.db2`.
///
/// Tables are opaque binary payloads here; nothing scans them for
/// references. A name the schema registry does not know is fatal, a
/// table the store does not carry is an ordinary skip.
pub fn export_tables(
    store: &mut dyn ContentStore,
    reader: &dyn TableReader,
    sink: &mut OutputSink,
    names: &[String],
) -> Result<()> {
    for name in names {
        let id = reader
            .table_file_id(name)
            .ok_or_else(|| Error::UnknownExport(name.clone()))?;
        tracing::debug!(table = %name, id, "exporting table");
        let content = store.read_id(id)?.map(ContentPayload::Bytes);
        sink.save(&format!("db2/{name}.db2"), content)?;
    }
    Ok(())
}
