//! Structured table access
//!
//! Two client database tables drive the interface crawl: the directory
//! manifest (`manifestinterfacetocdata`) listing every addon directory
//! the client ships, and the per-file manifest (`manifestinterfacedata`)
//! mapping interface file paths to numeric file data ids.
//!
//! Decoding the binary table format is somebody else's job: callers hand
//! us a [`TableReader`] that turns raw table bytes into rows with named
//! fields. [`JsonTableReader`] is the bundled adapter for pre-decoded
//! JSON dumps of those tables.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::paths::normalize;
use crate::store::ContentStore;

/// Directory-manifest table name.
pub const INTERFACE_TOC_TABLE: &str = "manifestinterfacetocdata";
/// File data id of the directory-manifest table.
pub const INTERFACE_TOC_TABLE_ID: u32 = 1267335;
/// Per-file interface manifest table name.
pub const INTERFACE_FILES_TABLE: &str = "manifestinterfacedata";
/// File data id of the per-file interface manifest table.
pub const INTERFACE_FILES_TABLE_ID: u32 = 1375801;

/// A single decoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// String-typed field.
    Text(String),
    /// Identifier-typed field.
    Id(u32),
}

/// One decoded table row with named fields.
#[derive(Debug, Clone, Default)]
pub struct TableRow {
    fields: HashMap<String, FieldValue>,
}

impl TableRow {
    /// Insert a field value, replacing any previous one of the same name.
    pub fn insert(&mut self, name: &str, value: FieldValue) {
        self.fields.insert(name.to_string(), value);
    }

    /// String field by name.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Identifier field by name.
    #[must_use]
    pub fn id(&self, name: &str) -> Option<u32> {
        match self.fields.get(name) {
            Some(FieldValue::Id(id)) => Some(*id),
            _ => None,
        }
    }
}

/// Decodes versioned binary tables into rows and resolves table names to
/// file data ids (the schema registry).
pub trait TableReader {
    /// Decode one table's raw bytes into rows. The build version selects
    /// the schema the table was written with.
    fn rows(&self, version: &str, table: &str, bytes: &[u8]) -> Result<Vec<TableRow>>;

    /// File data id for a named table, if the registry knows it.
    fn table_file_id(&self, table: &str) -> Option<u32>;
}

/// Addon directories and the path-keyed file id lookup, loaded from the
/// two interface manifest tables.
#[derive(Debug, Default)]
pub struct InterfaceManifest {
    /// Addon directory paths, e.g. `Interface/AddOns/Blizzard_UIPanels_Game`.
    pub directories: Vec<String>,
    /// Normalized interface file path to file data id.
    pub file_ids: HashMap<String, u32>,
}

impl InterfaceManifest {
    /// Load both manifest tables from the store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ManifestTableMissing`] if either table is absent
    /// from the store - the archive is assumed to always carry them - and
    /// [`Error::TableFieldMissing`] if a row lacks an expected field.
    pub fn load(store: &mut dyn ContentStore, reader: &dyn TableReader) -> Result<Self> {
        let version = store.version().to_string();

        let toc_bytes = read_table(store, INTERFACE_TOC_TABLE_ID, INTERFACE_TOC_TABLE)?;
        let mut directories = Vec::new();
        for row in reader.rows(&version, INTERFACE_TOC_TABLE, &toc_bytes)? {
            let dir = require_text(&row, INTERFACE_TOC_TABLE, "FilePath")?;
            directories.push(normalize(dir));
        }

        let file_bytes = read_table(store, INTERFACE_FILES_TABLE_ID, INTERFACE_FILES_TABLE)?;
        let mut file_ids = HashMap::new();
        for row in reader.rows(&version, INTERFACE_FILES_TABLE, &file_bytes)? {
            let dir = require_text(&row, INTERFACE_FILES_TABLE, "FilePath")?;
            let name = require_text(&row, INTERFACE_FILES_TABLE, "FileName")?;
            let id = row.id("ID").ok_or_else(|| Error::TableFieldMissing {
                table: INTERFACE_FILES_TABLE.to_string(),
                field: "ID".to_string(),
            })?;
            file_ids.insert(normalize(&format!("{dir}/{name}")), id);
        }

        tracing::info!(
            directories = directories.len(),
            files = file_ids.len(),
            "loaded interface manifest"
        );
        Ok(Self {
            directories,
            file_ids,
        })
    }
}

fn read_table(store: &mut dyn ContentStore, id: u32, table: &str) -> Result<Vec<u8>> {
    store.read_id(id)?.ok_or_else(|| Error::ManifestTableMissing {
        table: table.to_string(),
    })
}

fn require_text<'a>(row: &'a TableRow, table: &str, field: &str) -> Result<&'a str> {
    row.text(field).ok_or_else(|| Error::TableFieldMissing {
        table: table.to_string(),
        field: field.to_string(),
    })
}

/// Table reader over pre-decoded JSON row dumps.
///
/// Each table is a JSON array of objects; string values become
/// [`FieldValue::Text`], unsigned numbers become [`FieldValue::Id`].
/// The registry starts out knowing the two interface manifest tables and
/// can be extended from a `tables.json` file (`{"name": id, ...}`), with
/// file entries shadowing the built-ins.
pub struct JsonTableReader {
    registry: HashMap<String, u32>,
}

impl JsonTableReader {
    /// Reader with the built-in manifest table registry.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = HashMap::new();
        registry.insert(INTERFACE_TOC_TABLE.to_string(), INTERFACE_TOC_TABLE_ID);
        registry.insert(INTERFACE_FILES_TABLE.to_string(), INTERFACE_FILES_TABLE_ID);
        Self { registry }
    }

    /// Merge registry entries from a JSON file, shadowing built-ins.
    pub fn with_registry_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let raw = std::fs::read(path)?;
        let entries: HashMap<String, u32> = serde_json::from_slice(&raw)?;
        self.registry.extend(entries);
        Ok(self)
    }
}

impl Default for JsonTableReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TableReader for JsonTableReader {
    fn rows(&self, _version: &str, _table: &str, bytes: &[u8]) -> Result<Vec<TableRow>> {
        let raw: Vec<serde_json::Map<String, Value>> = serde_json::from_slice(bytes)?;
        let mut rows = Vec::with_capacity(raw.len());
        for object in raw {
            let mut row = TableRow::default();
            for (name, value) in object {
                match value {
                    Value::String(s) => row.insert(&name, FieldValue::Text(s)),
                    Value::Number(n) => {
                        if let Some(id) = n.as_u64().and_then(|n| u32::try_from(n).ok()) {
                            row.insert(&name, FieldValue::Id(id));
                        }
                    }
                    _ => {}
                }
            }
            rows.push(row);
        }
        Ok(rows)
    }

    fn table_file_id(&self, table: &str) -> Option<u32> {
        self.registry.get(table).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn json_rows_expose_typed_fields() {
        let reader = JsonTableReader::new();
        let bytes = br#"[{"ID": 7, "FilePath": "Interface/AddOns/Foo", "FileName": "Foo.lua"}]"#;
        let rows = reader.rows("1.0.0.1", INTERFACE_FILES_TABLE, bytes).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id("ID"), Some(7));
        assert_eq!(rows[0].text("FilePath"), Some("Interface/AddOns/Foo"));
        assert_eq!(rows[0].id("FilePath"), None);
    }

    #[test]
    fn builtin_registry_knows_manifest_tables() {
        let reader = JsonTableReader::new();
        assert_eq!(reader.table_file_id(INTERFACE_TOC_TABLE), Some(INTERFACE_TOC_TABLE_ID));
        assert_eq!(reader.table_file_id("globalstrings"), None);
    }

    #[test]
    fn registry_file_shadows_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.json");
        std::fs::write(&path, br#"{"globalstrings": 1394440, "manifestinterfacetocdata": 99}"#)
            .unwrap();
        let reader = JsonTableReader::new().with_registry_file(&path).unwrap();
        assert_eq!(reader.table_file_id("globalstrings"), Some(1394440));
        assert_eq!(reader.table_file_id(INTERFACE_TOC_TABLE), Some(99));
    }

    #[test]
    fn manifest_load_builds_directories_and_id_lookup() {
        let mut store = MemoryStore::new("11.0.7.58238")
            .with_id(
                INTERFACE_TOC_TABLE_ID,
                br#"[{"ID": 1, "FilePath": "Interface\\FrameXML"}]"#,
            )
            .with_id(
                INTERFACE_FILES_TABLE_ID,
                br#"[{"ID": 101, "FilePath": "Interface/FrameXML", "FileName": "UIParent.lua"}]"#,
            );
        let manifest = InterfaceManifest::load(&mut store, &JsonTableReader::new()).unwrap();
        assert_eq!(manifest.directories, ["Interface/FrameXML"]);
        assert_eq!(
            manifest.file_ids.get("Interface/FrameXML/UIParent.lua"),
            Some(&101)
        );
    }

    #[test]
    fn manifest_load_is_fatal_without_the_table() {
        let mut store = MemoryStore::new("11.0.7.58238");
        assert!(matches!(
            InterfaceManifest::load(&mut store, &JsonTableReader::new()),
            Err(Error::ManifestTableMissing { .. })
        ));
    }
}
