//! Extension to MIME type tables and their cache
//!
//! A [`MimeTable`] maps lower-case extensions (no leading dot) to MIME types.
//! Tables are produced by a [`TableLoader`] and held by a [`MimeTableCache`],
//! which loads each source identifier at most once.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use mime::Mime;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::errors::{FilekitError, Result};

/// Identifier of the database shipped with `mime_guess`
pub const BUNDLED_TABLE: &str = "@bundled";

/// Immutable extension -> MIME type mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MimeTable {
    /// The `mime_guess` extension database
    Bundled,
    /// Explicit pairs, usually loaded from a TOML file
    Map(HashMap<String, String>),
}

impl MimeTable {
    /// Build a table from `(extension, mime)` pairs; both sides are lower-cased
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let entries = pairs
            .into_iter()
            .map(|(ext, mime)| (ext.as_ref().to_lowercase(), mime.as_ref().to_lowercase()))
            .collect();
        Self::Map(entries)
    }

    /// Parse a flat TOML document of `extension = "type/subtype"` pairs
    ///
    /// Every value must parse as a MIME type.
    pub fn parse_toml(source_id: &str, text: &str) -> Result<Self> {
        let raw: HashMap<String, String> = toml::from_str(text)
            .map_err(|e| FilekitError::table(source_id, format!("Invalid table TOML: {}", e)))?;

        for (ext, value) in &raw {
            if value.parse::<Mime>().is_err() {
                return Err(FilekitError::table(
                    source_id,
                    format!("'{}' maps to invalid MIME type '{}'", ext, value),
                ));
            }
        }

        Ok(Self::from_pairs(raw))
    }

    /// Look up the MIME type of a lower-case extension
    ///
    /// For [`MimeTable::Bundled`] this is the first guess `mime_guess` has.
    pub fn get(&self, extension: &str) -> Option<&str> {
        match self {
            Self::Bundled => mime_guess::from_ext(extension).first_raw(),
            Self::Map(entries) => entries.get(extension).map(String::as_str),
        }
    }

    /// All extensions mapped to `mime_type` (compared lower-cased)
    pub fn extensions_for(&self, mime_type: &str) -> BTreeSet<String> {
        let wanted = mime_type.to_lowercase();
        match self {
            Self::Bundled => mime_guess::get_mime_extensions_str(&wanted)
                .map(|exts| exts.iter().map(|ext| ext.to_string()).collect())
                .unwrap_or_default(),
            Self::Map(entries) => entries
                .iter()
                .filter(|(_, value)| **value == wanted)
                .map(|(ext, _)| ext.clone())
                .collect(),
        }
    }

    pub fn is_bundled(&self) -> bool {
        matches!(self, Self::Bundled)
    }

    /// Number of explicit entries; `None` for the bundled database
    pub fn entry_count(&self) -> Option<usize> {
        match self {
            Self::Bundled => None,
            Self::Map(entries) => Some(entries.len()),
        }
    }
}

/// Source of MIME tables, keyed by an identifier such as a file path
pub trait TableLoader: Send + Sync {
    fn load(&self, source: &str) -> Result<MimeTable>;
}

/// Serves [`BUNDLED_TABLE`] from `mime_guess` and reads TOML files for anything else
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledTableLoader;

impl TableLoader for BundledTableLoader {
    fn load(&self, source: &str) -> Result<MimeTable> {
        if source == BUNDLED_TABLE {
            return Ok(MimeTable::Bundled);
        }

        let text = std::fs::read_to_string(Path::new(source))
            .map_err(|e| FilekitError::table(source, format!("Failed to read table: {}", e)))?;
        MimeTable::parse_toml(source, &text)
    }
}

/// Load-once cache of MIME tables
///
/// The check-then-load-then-store sequence runs under the map entry lock, so a
/// source is loaded at most once even when callers race. Failed loads are not
/// cached.
pub struct MimeTableCache {
    loader: Arc<dyn TableLoader>,
    default_source: String,
    tables: DashMap<String, Arc<MimeTable>>,
}

impl MimeTableCache {
    /// Cache over the bundled loader, defaulting to the bundled table
    pub fn new() -> Self {
        Self::with_loader(Arc::new(BundledTableLoader), BUNDLED_TABLE)
    }

    pub fn with_loader(loader: Arc<dyn TableLoader>, default_source: impl Into<String>) -> Self {
        Self {
            loader,
            default_source: default_source.into(),
            tables: DashMap::new(),
        }
    }

    /// Identifier used when callers pass no source
    pub fn default_source(&self) -> &str {
        &self.default_source
    }

    /// Return the table for `source` (or the default), loading it on first use
    pub fn load(&self, source: Option<&str>) -> Result<Arc<MimeTable>> {
        let key = source.unwrap_or(&self.default_source);

        if let Some(table) = self.tables.get(key) {
            trace!(source = %key, "MIME table cache hit");
            return Ok(Arc::clone(table.value()));
        }

        match self.tables.entry(key.to_string()) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let table = Arc::new(self.loader.load(key)?);
                debug!(source = %key, entries = ?table.entry_count(), "MIME table loaded");
                entry.insert(Arc::clone(&table));
                Ok(table)
            }
        }
    }

    pub fn contains(&self, source: &str) -> bool {
        self.tables.contains_key(source)
    }

    /// Number of distinct sources loaded so far
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Default for MimeTableCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MimeTableCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MimeTableCache")
            .field("default_source", &self.default_source)
            .field("loaded", &self.tables.len())
            .finish()
    }
}
