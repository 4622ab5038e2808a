//! MIME type resolution with content sniffing and extension fallback

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use super::sniff::ContentSniffer;
use super::table::{BundledTableLoader, MimeTable, MimeTableCache, BUNDLED_TABLE};
use crate::config::Config;
use crate::errors::{FilekitError, Result};

/// Resolves MIME types for files, and extensions for MIME types
///
/// Resolution tries the content sniffer first and falls back to the extension
/// table. Tables are loaded through the resolver's own [`MimeTableCache`].
pub struct MimeResolver {
    sniffer: Option<Arc<dyn ContentSniffer>>,
    cache: MimeTableCache,
    allow_extension_fallback: bool,
}

impl MimeResolver {
    /// Resolver over the bundled table, with the default sniffer when the
    /// `sniff` feature is enabled
    pub fn new() -> Self {
        Self {
            sniffer: default_sniffer(),
            cache: MimeTableCache::new(),
            allow_extension_fallback: true,
        }
    }

    /// Resolver whose default table source and fallback policy come from the configuration
    pub fn from_config(config: &Config) -> Self {
        let source = config.mime_table.as_deref().unwrap_or(BUNDLED_TABLE);
        let mut resolver =
            Self::new().with_cache(MimeTableCache::with_loader(Arc::new(BundledTableLoader), source));
        resolver.allow_extension_fallback = config.allow_extension_fallback;
        resolver
    }

    pub fn with_sniffer(mut self, sniffer: Arc<dyn ContentSniffer>) -> Self {
        self.sniffer = Some(sniffer);
        self
    }

    pub fn without_sniffer(mut self) -> Self {
        self.sniffer = None;
        self
    }

    pub fn with_cache(mut self, cache: MimeTableCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn has_sniffer(&self) -> bool {
        self.sniffer.is_some()
    }

    pub fn cache(&self) -> &MimeTableCache {
        &self.cache
    }

    /// Determine the MIME type of `file`
    ///
    /// Without a sniffer this delegates to [`resolve_by_extension`](Self::resolve_by_extension),
    /// or fails with [`FilekitError::CapabilityUnavailable`] when `allow_extension_fallback`
    /// is false. A sniffer that finds nothing (or errors) falls back to the extension
    /// table only when the fallback is allowed.
    pub fn resolve(
        &self,
        file: impl AsRef<Path>,
        magic_source: Option<&str>,
        allow_extension_fallback: bool,
    ) -> Result<Option<String>> {
        let file = file.as_ref();

        let Some(sniffer) = &self.sniffer else {
            if !allow_extension_fallback {
                return Err(FilekitError::CapabilityUnavailable);
            }
            return self.resolve_by_extension(file, magic_source);
        };

        match sniffer.sniff(file, magic_source) {
            Ok(Some(mime)) => return Ok(Some(mime)),
            Ok(None) => {}
            Err(e) => warn!(file = %file.display(), error = %e, "Content sniffing failed"),
        }

        if allow_extension_fallback {
            debug!(file = %file.display(), "Falling back to extension lookup");
            self.resolve_by_extension(file, magic_source)
        } else {
            Ok(None)
        }
    }

    /// [`resolve`](Self::resolve) with the default table and the configured fallback policy
    pub fn resolve_default(&self, file: impl AsRef<Path>) -> Result<Option<String>> {
        self.resolve(file, None, self.allow_extension_fallback)
    }

    /// Determine the MIME type of `file` from its extension alone
    pub fn resolve_by_extension(
        &self,
        file: impl AsRef<Path>,
        magic_source: Option<&str>,
    ) -> Result<Option<String>> {
        let table = self.cache.load(magic_source)?;

        let Some(ext) = extension_of(file.as_ref()) else {
            return Ok(None);
        };
        Ok(table.get(&ext.to_lowercase()).map(str::to_string))
    }

    /// All extensions mapped to `mime_type`, compared case-insensitively
    pub fn extensions_for(&self, mime_type: &str, magic_source: Option<&str>) -> Result<BTreeSet<String>> {
        Ok(self.cache.load(magic_source)?.extensions_for(mime_type))
    }

    /// Load (or fetch from cache) the table for `magic_source`
    pub fn load_table(&self, magic_source: Option<&str>) -> Result<Arc<MimeTable>> {
        self.cache.load(magic_source)
    }
}

impl Default for MimeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MimeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MimeResolver")
            .field("has_sniffer", &self.has_sniffer())
            .field("cache", &self.cache)
            .finish()
    }
}

#[cfg(feature = "sniff")]
fn default_sniffer() -> Option<Arc<dyn ContentSniffer>> {
    Some(Arc::new(super::sniff::InferSniffer))
}

#[cfg(not(feature = "sniff"))]
fn default_sniffer() -> Option<Arc<dyn ContentSniffer>> {
    None
}

/// Text after the last `.` of the final path segment; `None` when absent or empty
///
/// Both `/` and `\` end a segment.
pub fn extension_of(file: &Path) -> Option<String> {
    let text = file.to_string_lossy();
    let name = text.rsplit(['/', '\\']).next().unwrap_or("");
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => Some(name[idx + 1..].to_string()),
        _ => None,
    }
}
