//! Recursive dependency-closure crawl
//!
//! Starting from a manifest document, the crawler loads each file, hands
//! it to the output sink, and descends into every reference it can find:
//! `include`/`script` elements inside markup documents, and one reference
//! per non-comment line inside TOC documents. References resolve against
//! the referencing document's own directory, so nested includes land
//! where the client would load them from.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::markup::MarkupScanner;
use crate::paths::{is_markup, normalize, resolve};
use crate::sink::OutputSink;
use crate::store::{ContentPayload, ContentStore};
use crate::tables::InterfaceManifest;

/// Reference chains in real interface data are a handful of levels deep;
/// anything past this is a cycle or corrupt data, and the crawl fails
/// fast instead of exhausting the stack.
pub const MAX_CRAWL_DEPTH: usize = 32;

/// Crawl state for one extraction run.
///
/// Every discovered file goes through the sink exactly once: the visited
/// set is keyed by normalized path, and the first visit wins. A file the
/// store does not have is recorded as a skip and does not stop the crawl
/// of its siblings.
pub struct DependencyCrawler<'a> {
    store: &'a mut dyn ContentStore,
    sink: &'a mut OutputSink,
    manifest: &'a InterfaceManifest,
    visited: HashSet<String>,
}

impl<'a> DependencyCrawler<'a> {
    pub fn new(
        store: &'a mut dyn ContentStore,
        sink: &'a mut OutputSink,
        manifest: &'a InterfaceManifest,
    ) -> Self {
        Self {
            store,
            sink,
            manifest,
            visited: HashSet::new(),
        }
    }

    /// Visit a plain file: load, persist, and descend if it is markup.
    pub fn visit(&mut self, path: &str) -> Result<()> {
        self.visit_at(path, 0, false)
    }

    /// Visit a TOC document: as [`DependencyCrawler::visit`], plus one
    /// recursive visit per non-comment line. Line-referenced files are
    /// visited as plain files; they are only scanned further if they are
    /// themselves markup.
    pub fn visit_toc(&mut self, path: &str) -> Result<()> {
        self.visit_at(path, 0, true)
    }

    fn visit_at(&mut self, path: &str, depth: usize, toc: bool) -> Result<()> {
        let path = normalize(path);
        if depth > MAX_CRAWL_DEPTH {
            return Err(Error::CrawlDepthExceeded {
                path,
                limit: MAX_CRAWL_DEPTH,
            });
        }
        if !self.visited.insert(path.clone()) {
            tracing::debug!(%path, "already visited");
            return Ok(());
        }

        let content = self.load(&path)?;
        self.sink
            .save(&path, content.clone().map(ContentPayload::Bytes))?;
        let Some(bytes) = content else {
            return Ok(());
        };

        if is_markup(&path) {
            // Collect first: the borrow on `bytes` must end before the
            // recursive visits take `&mut self`.
            let references: Vec<String> = MarkupScanner::new(&bytes).collect::<Result<_>>()?;
            for reference in references {
                self.visit_at(&resolve(&path, &reference), depth + 1, false)?;
            }
        }

        if toc {
            for line in String::from_utf8_lossy(&bytes).lines() {
                let line = line.trim_end();
                if line.trim().is_empty() || line.starts_with('#') {
                    continue;
                }
                self.visit_at(&resolve(&path, line), depth + 1, false)?;
            }
        }
        Ok(())
    }

    /// Load by path, falling back to the manifest's file id lookup for
    /// stores that only resolve numeric ids.
    fn load(&mut self, path: &str) -> Result<Option<Vec<u8>>> {
        if let Some(bytes) = self.store.read_path(path)? {
            return Ok(Some(bytes));
        }
        match self.manifest.file_ids.get(path) {
            Some(&id) => self.store.read_id(id),
            None => Ok(None),
        }
    }
}
