//! Accessibility State Engine
//!
//! Single source of truth for every overlay setting. All mutation goes
//! through [`StateEngine`]; the record itself is read-only to callers.

use crate::presentation::{ExclusiveFilter, LinkDecoration, PresentationDescriptor};
use crate::scanner::DiagnosticScanner;
use serde::Serialize;
use std::ops::RangeInclusive;

/// Valid text scale, in percent
pub const TEXT_SCALE_RANGE: RangeInclusive<u32> = 50..=200;
/// Valid line height, in percent of the 1.5 base
pub const LINE_HEIGHT_RANGE: RangeInclusive<u32> = 50..=200;
/// Valid letter spacing, in pixels
pub const LETTER_SPACING_RANGE: RangeInclusive<f64> = 0.0..=5.0;

pub const DEFAULT_TEXT_SCALE: u32 = 100;
pub const DEFAULT_LINE_HEIGHT: u32 = 100;
pub const DEFAULT_LETTER_SPACING: f64 = 0.0;

/// Whole-page filters of which at most one may be on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExclusiveMode {
    Inverted,
    Grayscale,
    HighContrast,
}

impl ExclusiveMode {
    pub const ALL: [ExclusiveMode; 3] = [Self::Inverted, Self::Grayscale, Self::HighContrast];
}

/// Toggles with no exclusivity relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndependentFlag {
    ImagesHidden,
    ReadableFont,
    FocusHighlighted,
}

/// Snapshot of the three exclusive-mode flags, returned after every
/// exclusive toggle so dependent controls can be refreshed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExclusiveModes {
    pub inverted: bool,
    pub grayscale: bool,
    pub high_contrast: bool,
}

impl ExclusiveModes {
    /// Number of modes currently on (never more than one)
    pub fn active_count(&self) -> usize {
        [self.inverted, self.grayscale, self.high_contrast]
            .iter()
            .filter(|&&on| on)
            .count()
    }

    pub fn is_on(&self, mode: ExclusiveMode) -> bool {
        match mode {
            ExclusiveMode::Inverted => self.inverted,
            ExclusiveMode::Grayscale => self.grayscale,
            ExclusiveMode::HighContrast => self.high_contrast,
        }
    }
}

/// Session settings record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessibilityState {
    modes: ExclusiveModes,
    images_hidden: bool,
    readable_font: bool,
    link_underlined: bool,
    link_bold: bool,
    focus_highlighted: bool,
    link_color: String,
    text_scale_percent: u32,
    line_height_percent: u32,
    letter_spacing_px: f64,
    highlights_active: bool,
}

impl Default for AccessibilityState {
    fn default() -> Self {
        Self {
            modes: ExclusiveModes::default(),
            images_hidden: false,
            readable_font: false,
            link_underlined: false,
            link_bold: false,
            focus_highlighted: false,
            link_color: String::new(),
            text_scale_percent: DEFAULT_TEXT_SCALE,
            line_height_percent: DEFAULT_LINE_HEIGHT,
            letter_spacing_px: DEFAULT_LETTER_SPACING,
            highlights_active: false,
        }
    }
}

impl AccessibilityState {
    pub fn inverted(&self) -> bool {
        self.modes.inverted
    }

    pub fn grayscale(&self) -> bool {
        self.modes.grayscale
    }

    pub fn high_contrast(&self) -> bool {
        self.modes.high_contrast
    }

    pub fn exclusive_modes(&self) -> ExclusiveModes {
        self.modes
    }

    pub fn images_hidden(&self) -> bool {
        self.images_hidden
    }

    pub fn readable_font(&self) -> bool {
        self.readable_font
    }

    pub fn link_underlined(&self) -> bool {
        self.link_underlined
    }

    pub fn link_bold(&self) -> bool {
        self.link_bold
    }

    pub fn focus_highlighted(&self) -> bool {
        self.focus_highlighted
    }

    /// Link color override; empty means inherit
    pub fn link_color(&self) -> &str {
        &self.link_color
    }

    pub fn text_scale_percent(&self) -> u32 {
        self.text_scale_percent
    }

    pub fn line_height_percent(&self) -> u32 {
        self.line_height_percent
    }

    pub fn letter_spacing_px(&self) -> f64 {
        self.letter_spacing_px
    }

    /// True while scanner annotations are on the document
    pub fn highlights_active(&self) -> bool {
        self.highlights_active
    }

    pub fn independent_flag(&self, flag: IndependentFlag) -> bool {
        match flag {
            IndependentFlag::ImagesHidden => self.images_hidden,
            IndependentFlag::ReadableFont => self.readable_font,
            IndependentFlag::FocusHighlighted => self.focus_highlighted,
        }
    }
}

/// Owns the [`AccessibilityState`] and exposes its named operations
#[derive(Debug, Default)]
pub struct StateEngine {
    state: AccessibilityState,
}

impl StateEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the current settings
    pub fn state(&self) -> &AccessibilityState {
        &self.state
    }

    /// Restore every setting to its default
    pub fn reset(&mut self) {
        let highlights_active = self.state.highlights_active;
        self.state = AccessibilityState {
            highlights_active,
            ..AccessibilityState::default()
        };
        tracing::debug!("Accessibility settings reset");
    }

    /// Toggle an exclusive mode. Turning one on turns the other two off.
    pub fn set_exclusive_mode(&mut self, mode: ExclusiveMode) -> ExclusiveModes {
        let modes = &mut self.state.modes;
        let flag = match mode {
            ExclusiveMode::Inverted => &mut modes.inverted,
            ExclusiveMode::Grayscale => &mut modes.grayscale,
            ExclusiveMode::HighContrast => &mut modes.high_contrast,
        };
        *flag = !*flag;

        if *flag {
            *modes = ExclusiveModes {
                inverted: mode == ExclusiveMode::Inverted,
                grayscale: mode == ExclusiveMode::Grayscale,
                high_contrast: mode == ExclusiveMode::HighContrast,
            };
        }

        tracing::debug!(?mode, modes = ?self.state.modes, "Exclusive mode toggled");
        self.state.modes
    }

    /// Toggle an independent flag, returning its new value
    pub fn set_independent_flag(&mut self, flag: IndependentFlag) -> bool {
        let slot = match flag {
            IndependentFlag::ImagesHidden => &mut self.state.images_hidden,
            IndependentFlag::ReadableFont => &mut self.state.readable_font,
            IndependentFlag::FocusHighlighted => &mut self.state.focus_highlighted,
        };
        *slot = !*slot;
        let value = *slot;
        tracing::debug!(?flag, value, "Independent flag toggled");
        value
    }

    pub fn set_link_underline(&mut self, underline: bool) {
        self.state.link_underlined = underline;
    }

    pub fn set_link_bold(&mut self, bold: bool) {
        self.state.link_bold = bold;
    }

    /// Store a link color verbatim. An empty string clears the override.
    /// Color syntax is not checked here.
    pub fn set_link_color(&mut self, color: impl Into<String>) {
        self.state.link_color = color.into();
        tracing::debug!(color = %self.state.link_color, "Link color set");
    }

    /// Set the text scale, clamped to [`TEXT_SCALE_RANGE`]
    pub fn set_text_scale(&mut self, percent: i64) -> u32 {
        self.state.text_scale_percent = clamp_percent(percent, &TEXT_SCALE_RANGE);
        self.state.text_scale_percent
    }

    /// Set the line height, clamped to [`LINE_HEIGHT_RANGE`]
    pub fn set_line_height(&mut self, percent: i64) -> u32 {
        self.state.line_height_percent = clamp_percent(percent, &LINE_HEIGHT_RANGE);
        self.state.line_height_percent
    }

    /// Set the letter spacing, clamped to [`LETTER_SPACING_RANGE`]. NaN is
    /// ignored and the current value kept.
    pub fn set_letter_spacing(&mut self, px: f64) -> f64 {
        if !px.is_nan() {
            self.state.letter_spacing_px =
                px.clamp(*LETTER_SPACING_RANGE.start(), *LETTER_SPACING_RANGE.end());
        }
        self.state.letter_spacing_px
    }

    /// Mirror the scanner's annotation status into the state record
    pub fn track_highlights(&mut self, scanner: &DiagnosticScanner) -> bool {
        self.state.highlights_active = scanner.is_active();
        self.state.highlights_active
    }

    /// Declarative description of the presentation implied by the current
    /// settings. Pure: performs no document mutation.
    pub fn synthesize_presentation(&self) -> PresentationDescriptor {
        let s = &self.state;
        let exclusive_filter = if s.modes.inverted {
            ExclusiveFilter::Invert
        } else if s.modes.grayscale {
            ExclusiveFilter::Grayscale
        } else if s.modes.high_contrast {
            ExclusiveFilter::HighContrast
        } else {
            ExclusiveFilter::None
        };

        PresentationDescriptor {
            exclusive_filter,
            images_hidden: s.images_hidden,
            readable_font: s.readable_font,
            focus_highlighted: s.focus_highlighted,
            text_scale_percent: s.text_scale_percent,
            line_height: PresentationDescriptor::scaled_line_height(s.line_height_percent),
            letter_spacing_px: s.letter_spacing_px,
            link_decoration: LinkDecoration {
                underline: s.link_underlined,
                bold: s.link_bold,
                color: (!s.link_color.is_empty()).then(|| s.link_color.clone()),
            },
        }
    }
}

fn clamp_percent(value: i64, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(i64::from(*range.start()), i64::from(*range.end())) as u32
}
