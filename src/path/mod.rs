//! Templated path building
//!
//! - [`builder`] - `PathBuilder`, the directory/filename/URL builder
//! - [`normalize`] - separator-aware path string normalization
//! - [`placeholder`] - `{year}`-style placeholders and injectable clocks

pub mod builder;
pub mod normalize;
pub mod placeholder;

pub use builder::{PathBuilder, DEFAULT_DIR_MODE};
pub use normalize::{basename, dirname, normalize_path};
pub use placeholder::{expand_placeholders, Clock, FixedClock, Placeholder, SystemClock};
