//! fOS Accessibility
//!
//! Accessibility overlay core for the fOS engine.
//!
//! Features:
//! - Settings engine with mutually exclusive page filters and clamped sliders
//! - Presentation synthesis (settings to a declarative descriptor)
//! - Diagnostic scan for missing alt text and empty links, fully reversible

pub mod state;
pub mod presentation;
pub mod scanner;

pub use state::{
    AccessibilityState, ExclusiveMode, ExclusiveModes, IndependentFlag, StateEngine,
    LETTER_SPACING_RANGE, LINE_HEIGHT_RANGE, TEXT_SCALE_RANGE,
};
pub use presentation::{ExclusiveFilter, LinkDecoration, PresentationDescriptor, BASE_LINE_HEIGHT};
pub use scanner::{
    Defect, DefectReport, DiagnosticScanner, ScanTargets, ScannerConfig, EMPTY_LINK_MARKER,
    MISSING_ALT_MARKER, MISSING_ALT_SENTINEL, ORIGINAL_ALT_ATTRIBUTE,
};
