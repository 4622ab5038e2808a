//! MIME type utilities
//!
//! - [`resolver`] - file -> MIME type resolution and the reverse lookup
//! - [`table`] - extension tables and the load-once table cache
//! - [`sniff`] - content sniffing capability

pub mod resolver;
pub mod sniff;
pub mod table;

pub use resolver::{extension_of, MimeResolver};
pub use sniff::ContentSniffer;
#[cfg(feature = "sniff")]
pub use sniff::InferSniffer;
pub use table::{BundledTableLoader, MimeTable, MimeTableCache, TableLoader, BUNDLED_TABLE};
