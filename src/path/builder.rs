//! Templated path and filename builder
//!
//! A [`PathBuilder`] expands a directory template and a filename template
//! (see [`placeholder`](super::placeholder)) under a base path, then renders
//! the resulting file path or public URL, or creates the directory.
//!
//! ```
//! use filekit::path::PathBuilder;
//!
//! let builder = PathBuilder::new("uploads")
//!     .build_path_name("avatars", None, None)
//!     .build_file_name("me", "png", false);
//! assert_eq!(builder.file_path_with('/').unwrap(), "uploads/avatars/me.png");
//! ```

use std::fs::DirBuilder;
use std::path::{Path, MAIN_SEPARATOR};
use std::sync::Arc;
use tracing::{debug, warn};

use super::normalize::{basename, dirname, normalize_path};
use super::placeholder::{expand_placeholders, Clock, SystemClock};
use crate::config::Config;
use crate::errors::{FilekitError, Result};

/// Default permission bits for created directories
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Builds a normalized directory path and filename from templates
///
/// Terminal operations return [`FilekitError::Incomplete`] until the build
/// steps they depend on have run. Build steps may be repeated; each call
/// replaces the previous result.
#[derive(Clone)]
pub struct PathBuilder {
    base_path: String,
    path_name: Option<String>,
    file_name: Option<String>,
    dir_mode: u32,
    recursive: bool,
    clock: Arc<dyn Clock>,
}

impl PathBuilder {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            path_name: None,
            file_name: None,
            dir_mode: DEFAULT_DIR_MODE,
            recursive: true,
            clock: Arc::new(SystemClock),
        }
    }

    /// Builder rooted at the configured base path, using its directory settings
    pub fn from_config(config: &Config) -> Self {
        let mut builder = Self::new(config.base_path.clone());
        builder.dir_mode = config.dir_mode;
        builder.recursive = config.recursive;
        builder
    }

    /// Use `clock` for placeholder expansion
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn path_name(&self) -> Option<&str> {
        self.path_name.as_deref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Expand `template` into the directory part
    ///
    /// A non-empty `prefix` is joined in front and a non-empty `suffix` after,
    /// then the whole is normalized with the platform separator.
    pub fn build_path_name(mut self, template: &str, prefix: Option<&str>, suffix: Option<&str>) -> Self {
        let mut path_name = expand_placeholders(template, &self.clock.now());

        if let Some(prefix) = prefix.filter(|p| !p.is_empty()) {
            path_name = format!("{}{}{}", prefix, MAIN_SEPARATOR, path_name);
        }
        if let Some(suffix) = suffix.filter(|s| !s.is_empty()) {
            path_name.push(MAIN_SEPARATOR);
            path_name.push_str(suffix);
        }

        self.path_name = Some(normalize_path(&path_name, MAIN_SEPARATOR));
        self
    }

    /// Expand `template` into the filename
    ///
    /// A non-empty `extension` is appended after a `.`, unless `include_dot`
    /// says the extension already carries it. Filenames are not normalized.
    pub fn build_file_name(mut self, template: &str, extension: &str, include_dot: bool) -> Self {
        let mut file_name = expand_placeholders(template, &self.clock.now());

        if !extension.is_empty() {
            if !include_dot {
                file_name.push('.');
            }
            file_name.push_str(extension);
        }

        self.file_name = Some(file_name);
        self
    }

    /// The directory that [`create_directory`](Self::create_directory) targets
    pub fn directory_path(&self) -> Result<String> {
        let path_name = self.require_path_name()?;
        let path = format!("{}{}{}", self.base_for(path_name), MAIN_SEPARATOR, path_name);
        Ok(normalize_path(&path, MAIN_SEPARATOR))
    }

    /// Create the built directory
    ///
    /// Returns `Ok(false)` when a directory already exists there. `mode` is
    /// applied on Unix (subject to the umask) and ignored elsewhere.
    pub fn create_directory(&self, mode: u32, recursive: bool) -> Result<bool> {
        let dir = self.directory_path()?;
        let path = Path::new(&dir);

        if path.is_dir() {
            debug!(path = %dir, "Directory already exists");
            return Ok(false);
        }

        let mut builder = DirBuilder::new();
        builder.recursive(recursive);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;

        if let Err(e) = builder.create(path) {
            warn!(path = %dir, error = %e, "Failed to create directory");
            return Err(FilekitError::Io(e));
        }

        debug!(path = %dir, mode = %format!("{:o}", mode), recursive, "Directory created");
        Ok(true)
    }

    /// [`create_directory`](Self::create_directory) with this builder's mode and recursion settings
    pub fn create_directory_default(&self) -> Result<bool> {
        self.create_directory(self.dir_mode, self.recursive)
    }

    /// Full file path using the platform separator
    pub fn file_path(&self) -> Result<String> {
        self.file_path_with(MAIN_SEPARATOR)
    }

    /// Full file path using `separator`
    pub fn file_path_with(&self, separator: char) -> Result<String> {
        let path_name = self.require_path_name()?;
        let file_name = self.require_file_name()?;
        let path = format!(
            "{}{sep}{}{sep}{}",
            self.base_for(path_name),
            path_name,
            file_name,
            sep = separator
        );
        Ok(normalize_path(&path, separator))
    }

    /// Public URL of the file
    ///
    /// The path part starts with `/` unless `..` segments in the path name climb
    /// above the base, in which case the leading `/` is consumed as well
    /// (`"up"` + `"../../etc"` renders `etc/x`). A trailing `/` on `base_url` is dropped.
    pub fn file_url(&self, base_url: Option<&str>) -> Result<String> {
        let path_name = self.require_path_name()?;
        let file_name = self.require_file_name()?;

        let base_url = base_url.map(|url| url.trim_end_matches('/')).unwrap_or("");
        let path = format!("/{}/{}/", self.base_for(path_name), path_name);

        Ok(format!("{}{}/{}", base_url, normalize_path(&path, '/'), file_name))
    }

    /// Directory portion of [`file_path`](Self::file_path)
    pub fn directory_of(&self) -> Result<String> {
        Ok(dirname(&self.file_path()?, MAIN_SEPARATOR))
    }

    /// Final segment of [`file_path`](Self::file_path)
    pub fn file_name_of(&self) -> Result<String> {
        Ok(basename(&self.file_path()?, MAIN_SEPARATOR))
    }

    // Only a forward slash marks the path name as absolute, whatever the target separator.
    fn base_for(&self, path_name: &str) -> &str {
        if path_name.starts_with('/') {
            ""
        } else {
            &self.base_path
        }
    }

    fn require_path_name(&self) -> Result<&str> {
        self.path_name.as_deref().ok_or(FilekitError::Incomplete("path name"))
    }

    fn require_file_name(&self) -> Result<&str> {
        self.file_name.as_deref().ok_or(FilekitError::Incomplete("file name"))
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new("")
    }
}

impl std::fmt::Debug for PathBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathBuilder")
            .field("base_path", &self.base_path)
            .field("path_name", &self.path_name)
            .field("file_name", &self.file_name)
            .field("dir_mode", &format_args!("{:o}", self.dir_mode))
            .field("recursive", &self.recursive)
            .finish()
    }
}
