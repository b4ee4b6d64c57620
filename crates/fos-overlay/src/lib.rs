//! fOS Accessibility Overlay
//!
//! UI layer over the accessibility engine: installs style elements into a
//! parsed document, renders the engine's presentation descriptor into body
//! classes and CSS, and reports diagnostic scan results.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
mod overlay;
pub mod styles;
pub mod summary;

pub use config::{EffectClasses, OverlayConfig};
pub use error::{OverlayError, Result};
pub use overlay::Overlay;
pub use summary::ResultsView;
