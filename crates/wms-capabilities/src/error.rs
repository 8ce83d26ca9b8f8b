//! Error types for capabilities decoding.
//!
//! Only structural problems with the document as a whole are errors. Missing
//! or malformed fields never fail a decode; they surface as absent values.

use thiserror::Error;

/// Result type alias using CapabilitiesError.
pub type CapabilitiesResult<T> = Result<T, CapabilitiesError>;

/// Fatal failures while reading a capabilities document.
#[derive(Debug, Error)]
pub enum CapabilitiesError {
    // === XML Errors ===
    #[error("XML parsing error at position {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Document nesting exceeds the configured limit of {limit} levels")]
    DepthLimitExceeded { limit: usize },

    // === Structural Errors ===
    #[error("Unrecognized root element '{0}', expected WMS_Capabilities or WMT_MS_Capabilities")]
    UnrecognizedRoot(String),

    #[error("Missing required 'version' attribute on root element '{0}'")]
    MissingVersion(String),
}

impl CapabilitiesError {
    /// True for errors raised by the version dispatcher on a well-formed tree.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            CapabilitiesError::UnrecognizedRoot(_) | CapabilitiesError::MissingVersion(_)
        )
    }
}
