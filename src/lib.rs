//! filekit library interface
//!
//! MIME type resolution for files and templated upload path building.
//!
//! # Module Organization
//!
//! - [`mime`] - MIME resolution (content sniffing with extension fallback), reverse lookup
//! - [`path`] - `PathBuilder`, path normalization, placeholders
//! - [`config`] - Optional TOML configuration (Config)
//! - [`errors`] - Error types (FilekitError, Result)

pub mod config;
pub mod errors;
pub mod mime;
pub mod path;

pub use crate::config::Config;
pub use crate::errors::{FilekitError, Result};
pub use crate::mime::{MimeResolver, MimeTable, MimeTableCache};
pub use crate::path::{normalize_path, PathBuilder};
