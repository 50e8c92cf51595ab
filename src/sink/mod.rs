//! Output persistence
//!
//! Every discovered file is handed to exactly one [`OutputSink`] for the
//! run. The sink either materializes a versioned directory tree with a
//! stable product alias, or buffers a pair of zip containers keyed by
//! version and by product. Absent content is a meaningful outcome: the
//! sink records it as a skip instead of writing anything.

mod tree;
mod zip;

pub use tree::VersionedTree;
pub use zip::ZipPair;

use crate::error::Result;
use crate::paths::normalize;
use crate::store::ContentPayload;

enum Target {
    Tree(VersionedTree),
    Zip(ZipPair),
}

/// Dual-mode persistence for extracted files.
pub struct OutputSink {
    target: Target,
    written: usize,
    skipped: usize,
}

impl OutputSink {
    /// Sink writing a versioned directory tree under `base`.
    pub fn tree(base: impl Into<std::path::PathBuf>, version: &str, product: &str) -> Result<Self> {
        Ok(Self::from_target(Target::Tree(VersionedTree::create(
            base.into(),
            version,
            product,
        )?)))
    }

    /// Sink buffering a `<version>.zip` / `<product>.zip` container pair
    /// under `base`. Pre-existing containers with the same names are
    /// removed up front so the run starts from a clean write.
    pub fn zip_pair(
        base: impl Into<std::path::PathBuf>,
        version: &str,
        product: &str,
    ) -> Result<Self> {
        Ok(Self::from_target(Target::Zip(ZipPair::create(
            base.into(),
            version,
            product,
        )?)))
    }

    fn from_target(target: Target) -> Self {
        Self {
            target,
            written: 0,
            skipped: 0,
        }
    }

    /// Persist one discovered file, or record a skip when the content
    /// store had nothing for it.
    ///
    /// Streamed payloads are flattened to a single buffer before any
    /// persistence decision is made. Writing the same destination twice
    /// overwrites in tree mode and replaces the entry in zip mode.
    pub fn save(&mut self, path: &str, content: Option<ContentPayload>) -> Result<()> {
        let path = normalize(path);
        let Some(payload) = content else {
            tracing::debug!(%path, "not in content store, skipping");
            self.skipped += 1;
            return Ok(());
        };
        let bytes = payload.into_bytes()?;
        tracing::debug!(%path, size = bytes.len(), "saving");
        match &mut self.target {
            Target::Tree(tree) => tree.write(&path, &bytes)?,
            Target::Zip(pair) => pair.replace(&path, bytes),
        }
        self.written += 1;
        Ok(())
    }

    /// Finish the run: write and close both zip containers, or point the
    /// product alias at the version directory.
    ///
    /// Called exactly once, and only on success - a run that fails midway
    /// leaves no finalized output.
    pub fn finalize(self) -> Result<()> {
        match self.target {
            Target::Tree(tree) => tree.finalize(),
            Target::Zip(pair) => pair.finalize(),
        }
    }

    /// Files persisted so far.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Not-found files recorded so far.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_content_is_counted_as_skip_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = OutputSink::tree(dir.path(), "1.0.0.1", "wow").unwrap();
        sink.save("Interface/FrameXML/Missing.lua", None).unwrap();
        assert_eq!(sink.written(), 0);
        assert_eq!(sink.skipped(), 1);
        assert!(!dir.path().join("1.0.0.1").join("Interface").exists());
    }

    #[test]
    fn streamed_payload_is_flattened_before_write() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = OutputSink::tree(dir.path(), "1.0.0.1", "wow").unwrap();
        sink.save(
            "db2/globalstrings.db2",
            Some(ContentPayload::Streamed(Box::new(|w| {
                w.write_all(b"WDC5")?;
                w.write_all(b"rows")
            }))),
        )
        .unwrap();
        let written = std::fs::read(dir.path().join("1.0.0.1/db2/globalstrings.db2")).unwrap();
        assert_eq!(written, b"WDC5rows");
        assert_eq!(sink.written(), 1);
    }
}
