//! Overlay errors

use fos_css::CssError;

/// Overlay error
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("Document has no <head> element")]
    MissingHead,

    #[error("Document has no <body> element")]
    MissingBody,

    #[error("Overlay is not installed on this document")]
    NotInstalled,

    /// The color was stored but left out of the generated styles
    #[error("Invalid link color format: {color:?}")]
    InvalidColorFormat {
        color: String,
        #[source]
        source: CssError,
    },
}

pub type Result<T> = std::result::Result<T, OverlayError>;
