//! Content store access
//!
//! The crawler never talks to CASC directly; it consumes a [`ContentStore`]
//! that maps archive-relative paths and numeric file data ids to raw bytes.
//! Not-found is a first-class outcome (`Ok(None)`) distinct from an IO
//! failure: references to files that no longer ship are routine in
//! interface manifests and are skipped, while a genuine read error aborts
//! the run.
//!
//! [`DirectoryStore`] is the bundled adapter: a plain on-disk cache laid
//! out as `<root>/version`, `<root>/files/<path...>` and `<root>/fdid/<id>`,
//! typically produced by a separate CASC download step.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::paths::normalize;

/// File content on its way to the output sink.
///
/// Most content arrives as a finished buffer, but table exports may be
/// produced incrementally by a writer callback. Both forms are flattened
/// to a single buffer at the sink boundary before any persistence
/// decision is made.
pub enum ContentPayload {
    /// Content as a finished byte buffer.
    Bytes(Vec<u8>),
    /// Content produced by writing into the supplied sink.
    Streamed(Box<dyn FnOnce(&mut dyn Write) -> std::io::Result<()>>),
}

impl ContentPayload {
    /// Flatten the payload into one byte buffer.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            ContentPayload::Bytes(bytes) => Ok(bytes),
            ContentPayload::Streamed(producer) => {
                let mut buffer = Vec::new();
                producer(&mut buffer)?;
                Ok(buffer)
            }
        }
    }
}

impl std::fmt::Debug for ContentPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentPayload::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            ContentPayload::Streamed(_) => f.debug_tuple("Streamed").finish(),
        }
    }
}

/// Read access to a versioned, content-addressed game data archive.
pub trait ContentStore {
    /// The build version identifier of the open archive (e.g. `11.0.7.58238`).
    fn version(&self) -> &str;

    /// Read a file by archive-relative path. `Ok(None)` means not found.
    fn read_path(&mut self, path: &str) -> Result<Option<Vec<u8>>>;

    /// Read a file by numeric file data id. `Ok(None)` means not found.
    fn read_id(&mut self, id: u32) -> Result<Option<Vec<u8>>>;
}

/// Filesystem-backed content store over a local cache directory.
pub struct DirectoryStore {
    root: PathBuf,
    version: String,
}

impl DirectoryStore {
    /// Open a cache directory and read its build version.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreOpen`] if the root or its `version` file is
    /// unreadable, and [`Error::InvalidStoreVersion`] if the version file
    /// is empty.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let raw = std::fs::read_to_string(root.join("version")).map_err(|source| {
            Error::StoreOpen {
                path: root.clone(),
                source,
            }
        })?;
        let version = raw.trim().to_string();
        if version.is_empty() {
            return Err(Error::InvalidStoreVersion(root.display().to_string()));
        }
        Ok(Self { root, version })
    }

    fn read_file(path: &Path) -> Result<Option<Vec<u8>>> {
        match std::fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

impl ContentStore for DirectoryStore {
    fn version(&self) -> &str {
        &self.version
    }

    fn read_path(&mut self, path: &str) -> Result<Option<Vec<u8>>> {
        Self::read_file(&self.root.join("files").join(normalize(path)))
    }

    fn read_id(&mut self, id: u32) -> Result<Option<Vec<u8>>> {
        Self::read_file(&self.root.join("fdid").join(id.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;

    use super::{ContentStore, Result};

    /// In-memory store for crawl tests. Records every path read so tests
    /// can assert on visit order.
    pub struct MemoryStore {
        version: String,
        files: HashMap<String, Vec<u8>>,
        ids: HashMap<u32, Vec<u8>>,
        pub reads: Vec<String>,
    }

    impl MemoryStore {
        pub fn new(version: &str) -> Self {
            Self {
                version: version.to_string(),
                files: HashMap::new(),
                ids: HashMap::new(),
                reads: Vec::new(),
            }
        }

        pub fn with_file(mut self, path: &str, bytes: &[u8]) -> Self {
            self.files.insert(path.to_string(), bytes.to_vec());
            self
        }

        pub fn with_id(mut self, id: u32, bytes: &[u8]) -> Self {
            self.ids.insert(id, bytes.to_vec());
            self
        }
    }

    impl ContentStore for MemoryStore {
        fn version(&self) -> &str {
            &self.version
        }

        fn read_path(&mut self, path: &str) -> Result<Option<Vec<u8>>> {
            self.reads.push(path.to_string());
            Ok(self.files.get(path).cloned())
        }

        fn read_id(&mut self, id: u32) -> Result<Option<Vec<u8>>> {
            Ok(self.ids.get(&id).cloned())
        }
    }
}
