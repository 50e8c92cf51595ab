//! Zip container pair output

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::Result;

/// Buffers extracted files and, on finalize, writes two zip containers:
/// `<base>/<version>.zip` with every entry under a `<version>/` prefix,
/// and `<base>/<product>.zip` with the same entries under `<product>/`.
///
/// Entries replace by destination name, so the last write for a path
/// wins. Nothing touches disk until [`ZipPair::finalize`], which is what
/// keeps an aborted run from leaving a half-written container behind.
pub struct ZipPair {
    version_path: PathBuf,
    product_path: PathBuf,
    version: String,
    product: String,
    entries: BTreeMap<String, Vec<u8>>,
}

impl ZipPair {
    pub(super) fn create(base: PathBuf, version: &str, product: &str) -> Result<Self> {
        std::fs::create_dir_all(&base)?;
        let version_path = base.join(format!("{version}.zip"));
        let product_path = base.join(format!("{product}.zip"));
        // Stale containers from a previous run are overwritten, not merged.
        remove_if_present(&version_path)?;
        remove_if_present(&product_path)?;
        Ok(Self {
            version_path,
            product_path,
            version: version.to_string(),
            product: product.to_string(),
            entries: BTreeMap::new(),
        })
    }

    /// Add or replace an entry by destination name.
    pub(super) fn replace(&mut self, path: &str, bytes: Vec<u8>) {
        self.entries.insert(path.to_string(), bytes);
    }

    /// Write and close both containers.
    pub(super) fn finalize(self) -> Result<()> {
        write_container(&self.version_path, &self.version, &self.entries)?;
        write_container(&self.product_path, &self.product, &self.entries)?;
        tracing::info!(
            entries = self.entries.len(),
            version = %self.version_path.display(),
            product = %self.product_path.display(),
            "finalized zip containers"
        );
        Ok(())
    }
}

fn remove_if_present(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn write_container(path: &Path, prefix: &str, entries: &BTreeMap<String, Vec<u8>>) -> Result<()> {
    let mut writer = ZipWriter::new(File::create(path)?);
    for (name, bytes) in entries {
        writer.start_file(format!("{prefix}/{name}"), SimpleFileOptions::default())?;
        writer.write_all(bytes)?;
    }
    writer.finish()?;
    Ok(())
}
