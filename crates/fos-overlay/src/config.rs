//! Overlay configuration
//!
//! Names of everything the overlay injects into a document. Defaults match
//! the stylesheet the overlay ships with.

use fos_a11y::ScannerConfig;

/// Body classes toggled by the overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectClasses {
    pub inverted: String,
    pub grayscale: String,
    pub high_contrast: String,
    pub images_hidden: String,
    pub readable_font: String,
    pub focus_highlight: String,
}

impl EffectClasses {
    /// Every effect class, in a fixed order
    pub fn all(&self) -> [&str; 6] {
        [
            &self.inverted,
            &self.grayscale,
            &self.high_contrast,
            &self.images_hidden,
            &self.readable_font,
            &self.focus_highlight,
        ]
    }
}

impl Default for EffectClasses {
    fn default() -> Self {
        Self {
            inverted: "accessibility-inverted".into(),
            grayscale: "accessibility-grayscale".into(),
            high_contrast: "accessibility-high-contrast".into(),
            images_hidden: "accessibility-image-hidden".into(),
            readable_font: "accessibility-readable-font".into(),
            focus_highlight: "accessibility-focus-highlight".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayConfig {
    /// Id of the injected `<style>` holding effect and highlight rules
    pub static_style_id: String,
    /// Id of the injected `<style>` regenerated after every change
    pub dynamic_style_id: String,
    pub effects: EffectClasses,
    pub scanner: ScannerConfig,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            static_style_id: "accessibility-tool-styles".into(),
            dynamic_style_id: "accessibility-dynamic-styles".into(),
            effects: EffectClasses::default(),
            scanner: ScannerConfig::default(),
        }
    }
}
