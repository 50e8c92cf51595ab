//! Versioned directory tree output

use std::path::PathBuf;

use crate::error::Result;

/// Writes extracted files under `<base>/<version>/` and, on finalize,
/// points a `<base>/<product>` alias at the version directory so tools
/// can always find the latest extract for a product.
pub struct VersionedTree {
    base: PathBuf,
    version: String,
    product: String,
}

impl VersionedTree {
    pub(super) fn create(base: PathBuf, version: &str, product: &str) -> Result<Self> {
        std::fs::create_dir_all(base.join(version))?;
        Ok(Self {
            base,
            version: version.to_string(),
            product: product.to_string(),
        })
    }

    /// Write one file, creating parent directories and overwriting any
    /// previous content at the same path.
    pub(super) fn write(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let dest = self.base.join(&self.version).join(path);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(dest, bytes)?;
        Ok(())
    }

    /// Create or replace the product alias. The link target is the bare
    /// version directory name, keeping the alias valid if `base` moves.
    pub(super) fn finalize(self) -> Result<()> {
        let alias = self.base.join(&self.product);
        match std::fs::remove_file(&alias) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
        symlink_dir(&self.version, &alias)?;
        tracing::info!(
            alias = %alias.display(),
            version = %self.version,
            "finalized versioned tree"
        );
        Ok(())
    }
}

#[cfg(unix)]
fn symlink_dir(target: &str, link: &std::path::Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &str, link: &std::path::Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn write_creates_directories_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let tree = VersionedTree::create(dir.path().to_path_buf(), "1.0.0.1", "wow").unwrap();
        tree.write("Interface/FrameXML/UIParent.lua", b"first").unwrap();
        tree.write("Interface/FrameXML/UIParent.lua", b"second").unwrap();
        let dest = dir.path().join("1.0.0.1/Interface/FrameXML/UIParent.lua");
        assert_eq!(std::fs::read(dest).unwrap(), b"second");
    }

    #[cfg(unix)]
    #[test]
    fn finalize_replaces_an_existing_alias() {
        let dir = tempfile::tempdir().unwrap();

        let old = VersionedTree::create(dir.path().to_path_buf(), "1.0.0.1", "wow").unwrap();
        old.finalize().unwrap();

        let new = VersionedTree::create(dir.path().to_path_buf(), "1.0.0.2", "wow").unwrap();
        new.finalize().unwrap();

        let target = std::fs::read_link(dir.path().join("wow")).unwrap();
        assert_eq!(target, std::path::Path::new("1.0.0.2"));
    }
}
