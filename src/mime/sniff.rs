//! Content sniffing
//!
//! A [`ContentSniffer`] inspects file content to determine its MIME type.
//! Absence of a sniffer is distinct from a sniffer finding nothing: the
//! resolver treats the former as a missing capability.

use std::path::Path;

use crate::errors::Result;

/// Capability that determines a MIME type from file content
pub trait ContentSniffer: Send + Sync {
    /// Returns `Ok(None)` when the content is not recognised
    fn sniff(&self, file: &Path, magic_source: Option<&str>) -> Result<Option<String>>;
}

#[cfg(feature = "sniff")]
pub use infer_sniffer::InferSniffer;

#[cfg(feature = "sniff")]
mod infer_sniffer {
    use content_inspector::{inspect, ContentType};
    use std::fs::File;
    use std::io::Read;
    use std::path::Path;
    use tracing::trace;

    use super::ContentSniffer;
    use crate::errors::Result;

    /// Number of leading bytes examined
    const SNIFF_LEN: u64 = 8192;

    /// Signature-based sniffer backed by `infer`, with a text/binary check for
    /// content `infer` has no signature for
    #[derive(Debug, Clone, Copy, Default)]
    pub struct InferSniffer;

    impl InferSniffer {
        /// Classify a byte buffer
        pub fn sniff_bytes(data: &[u8]) -> Option<String> {
            if data.is_empty() {
                return None;
            }

            if let Some(kind) = infer::get(data) {
                return Some(kind.mime_type().to_string());
            }

            match inspect(data) {
                ContentType::BINARY => None,
                _ => Some("text/plain".to_string()),
            }
        }
    }

    impl ContentSniffer for InferSniffer {
        fn sniff(&self, file: &Path, magic_source: Option<&str>) -> Result<Option<String>> {
            if let Some(source) = magic_source {
                trace!(source = %source, "infer uses built-in signatures; magic source ignored");
            }

            let mut head = Vec::with_capacity(SNIFF_LEN as usize);
            File::open(file)?.take(SNIFF_LEN).read_to_end(&mut head)?;
            Ok(Self::sniff_bytes(&head))
        }
    }

}
