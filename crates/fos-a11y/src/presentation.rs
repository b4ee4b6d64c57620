//! Presentation descriptor
//!
//! The engine's declarative output. The UI layer turns this into style
//! rules and element classes.

use serde::Serialize;

/// Base unitless line height that the line-height percentage scales
pub const BASE_LINE_HEIGHT: f64 = 1.5;

/// Which whole-page filter is applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExclusiveFilter {
    #[default]
    None,
    Invert,
    Grayscale,
    HighContrast,
}

/// Link presentation overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkDecoration {
    pub underline: bool,
    pub bold: bool,
    /// Verbatim color override, `None` to inherit
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationDescriptor {
    pub exclusive_filter: ExclusiveFilter,
    pub images_hidden: bool,
    pub readable_font: bool,
    pub focus_highlighted: bool,
    pub text_scale_percent: u32,
    /// Unitless line height: the line-height percentage applied to
    /// [`BASE_LINE_HEIGHT`]
    pub line_height: f64,
    pub letter_spacing_px: f64,
    pub link_decoration: LinkDecoration,
}

impl PresentationDescriptor {
    /// `percent` of the 1.5 base, computed with a single rounding so that
    /// e.g. 110% yields exactly 1.65
    pub fn scaled_line_height(percent: u32) -> f64 {
        f64::from(percent) * (BASE_LINE_HEIGHT * 2.0) / 200.0
    }
}
