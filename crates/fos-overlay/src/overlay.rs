//! Overlay session
//!
//! Binds one [`StateEngine`] and one [`DiagnosticScanner`] to a document:
//! injects the overlay's style elements, keeps body classes and the dynamic
//! stylesheet in step with the settings, and drives the results panel.

use crate::config::OverlayConfig;
use crate::error::{OverlayError, Result};
use crate::styles::{active_body_classes, render_dynamic, static_stylesheet};
use crate::summary::ResultsView;
use fos_a11y::{
    AccessibilityState, DefectReport, DiagnosticScanner, ExclusiveMode, ExclusiveModes, IndependentFlag,
    PresentationDescriptor, ScanTargets, StateEngine,
};
use fos_css::CssError;
use fos_dom::{Document, NodeId};

/// Overlay session for a single document
#[derive(Debug)]
pub struct Overlay {
    config: OverlayConfig,
    engine: StateEngine,
    scanner: DiagnosticScanner,
    results: ResultsView,
    static_style: NodeId,
    dynamic_style: NodeId,
}

impl Overlay {
    pub fn new() -> Self {
        Self::with_config(OverlayConfig::default())
    }

    pub fn with_config(config: OverlayConfig) -> Self {
        let scanner = DiagnosticScanner::with_config(config.scanner.clone());
        Self {
            config,
            engine: StateEngine::new(),
            scanner,
            results: ResultsView::default(),
            static_style: NodeId::NONE,
            dynamic_style: NodeId::NONE,
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn state(&self) -> &AccessibilityState {
        self.engine.state()
    }

    pub fn descriptor(&self) -> PresentationDescriptor {
        self.engine.synthesize_presentation()
    }

    pub fn results(&self) -> &ResultsView {
        &self.results
    }

    /// Whether this session's style elements are attached to a document
    pub fn is_installed(&self, doc: &Document) -> bool {
        doc.tree().is_connected(self.static_style) && doc.tree().is_connected(self.dynamic_style)
    }

    /// Set up the overlay on `doc`.
    ///
    /// Style elements left behind by an earlier instance are removed and
    /// its highlights undone before the new styles are injected.
    pub fn install(&mut self, doc: &mut Document) -> Result<()> {
        let head = doc.head();
        if !head.is_valid() {
            return Err(OverlayError::MissingHead);
        }
        if !doc.body().is_valid() {
            return Err(OverlayError::MissingBody);
        }

        for style_id in [&self.config.static_style_id, &self.config.dynamic_style_id] {
            while let Some(stale) = doc.get_element_by_id(style_id) {
                tracing::debug!(id = %style_id, node = %stale, "Removing stale overlay style");
                doc.tree_mut().detach(stale);
            }
        }
        self.scanner.restore_stale_annotations(doc.tree_mut());

        let tree = doc.tree_mut();
        let static_style = tree.create_element("style");
        tree.set_attribute(static_style, "id", &self.config.static_style_id);
        tree.set_text_content(static_style, &static_stylesheet(&self.config).to_css());
        tree.append_child(head, static_style);

        let dynamic_style = tree.create_element("style");
        tree.set_attribute(dynamic_style, "id", &self.config.dynamic_style_id);
        tree.append_child(head, dynamic_style);

        self.static_style = static_style;
        self.dynamic_style = dynamic_style;
        self.results = ResultsView::Prompt;
        tracing::info!(url = %doc.url(), "Accessibility overlay installed");

        self.apply(doc)
    }

    /// Remove the overlay: clear highlights, drop every effect class and
    /// detach the injected style elements
    pub fn uninstall(&mut self, doc: &mut Document) {
        self.scanner.clear_annotations(doc.tree_mut());
        self.engine.track_highlights(&self.scanner);

        let body = doc.body();
        for class in self.config.effects.all() {
            doc.tree_mut().remove_class(body, class);
        }
        doc.tree_mut().detach(self.static_style);
        doc.tree_mut().detach(self.dynamic_style);
        self.static_style = NodeId::NONE;
        self.dynamic_style = NodeId::NONE;
        self.results = ResultsView::Prompt;
        tracing::info!("Accessibility overlay removed");
    }

    /// Re-render body classes and the dynamic stylesheet from current
    /// settings. An invalid link color is logged and left out.
    pub fn apply(&mut self, doc: &mut Document) -> Result<()> {
        self.render(doc).map(|_| ())
    }

    /// Toggle an exclusive mode and re-render
    pub fn toggle_exclusive_mode(&mut self, doc: &mut Document, mode: ExclusiveMode) -> Result<ExclusiveModes> {
        let modes = self.engine.set_exclusive_mode(mode);
        self.apply(doc)?;
        Ok(modes)
    }

    /// Toggle an independent flag and re-render
    pub fn toggle_flag(&mut self, doc: &mut Document, flag: IndependentFlag) -> Result<bool> {
        let value = self.engine.set_independent_flag(flag);
        self.apply(doc)?;
        Ok(value)
    }

    pub fn set_link_underline(&mut self, doc: &mut Document, underline: bool) -> Result<()> {
        self.engine.set_link_underline(underline);
        self.apply(doc)
    }

    pub fn set_link_bold(&mut self, doc: &mut Document, bold: bool) -> Result<()> {
        self.engine.set_link_bold(bold);
        self.apply(doc)
    }

    /// Store a link color and re-render.
    ///
    /// The color is kept even when it is not valid CSS. In that case the
    /// styles are still applied without it and `InvalidColorFormat` is
    /// returned.
    pub fn set_link_color(&mut self, doc: &mut Document, color: &str) -> Result<()> {
        self.engine.set_link_color(color);
        match self.render(doc)? {
            Some((color, source)) => Err(OverlayError::InvalidColorFormat { color, source }),
            None => Ok(()),
        }
    }

    pub fn set_text_scale(&mut self, doc: &mut Document, percent: i64) -> Result<u32> {
        let value = self.engine.set_text_scale(percent);
        self.apply(doc)?;
        Ok(value)
    }

    pub fn set_line_height(&mut self, doc: &mut Document, percent: i64) -> Result<u32> {
        let value = self.engine.set_line_height(percent);
        self.apply(doc)?;
        Ok(value)
    }

    pub fn set_letter_spacing(&mut self, doc: &mut Document, px: f64) -> Result<f64> {
        let value = self.engine.set_letter_spacing(px);
        self.apply(doc)?;
        Ok(value)
    }

    /// Restore default settings. Highlights are left alone.
    pub fn reset(&mut self, doc: &mut Document) -> Result<()> {
        self.engine.reset();
        self.apply(doc)
    }

    /// Scan the document's images and links and highlight defects
    pub fn run_checks(&mut self, doc: &mut Document) -> DefectReport {
        let targets = ScanTargets::collect(doc.tree());
        let report = self.scanner.scan(doc.tree_mut(), &targets);
        self.engine.track_highlights(&self.scanner);
        self.results = ResultsView::Report(report.clone());
        report
    }

    /// Undo every highlight, returning how many elements were restored
    pub fn clear_highlights(&mut self, doc: &mut Document) -> usize {
        let restored = self.scanner.clear_annotations(doc.tree_mut());
        self.engine.track_highlights(&self.scanner);
        self.results = ResultsView::Cleared;
        restored
    }

    /// Close the panel: highlights are cleared and the results text goes
    /// back to its initial prompt
    pub fn close_panel(&mut self, doc: &mut Document) {
        self.clear_highlights(doc);
        self.results = ResultsView::Prompt;
    }

    fn render(&mut self, doc: &mut Document) -> Result<Option<(String, CssError)>> {
        if !self.is_installed(doc) {
            return Err(OverlayError::NotInstalled);
        }
        let body = doc.body();
        if !body.is_valid() {
            return Err(OverlayError::MissingBody);
        }

        let descriptor = self.engine.synthesize_presentation();
        let active = active_body_classes(&descriptor, &self.config);
        let tree = doc.tree_mut();
        for class in self.config.effects.all() {
            if active.contains(&class) {
                tree.add_class(body, class);
            } else {
                tree.remove_class(body, class);
            }
        }

        let rendered = render_dynamic(&descriptor);
        tree.set_text_content(self.dynamic_style, &rendered.stylesheet.to_css());

        if let Some((color, err)) = &rendered.rejected_color {
            tracing::warn!(color = %color, error = %err, "Ignoring invalid link color");
        }
        Ok(rendered.rejected_color)
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::ElementQuery;

    fn installed(html: &str) -> (Overlay, Document) {
        let mut doc = fos_html::parse(html);
        let mut overlay = Overlay::new();
        overlay.install(&mut doc).unwrap();
        (overlay, doc)
    }

    fn body_classes(doc: &Document) -> String {
        doc.tree().attribute(doc.body(), "class").unwrap_or_default().to_string()
    }

    #[test]
    fn test_install_injects_styles() {
        let (overlay, doc) = installed("<p>hi</p>");
        assert!(overlay.is_installed(&doc));
        let static_style = doc.get_element_by_id("accessibility-tool-styles").unwrap();
        let dynamic_style = doc.get_element_by_id("accessibility-dynamic-styles").unwrap();
        assert!(doc.tree().text_content(static_style).contains(".accessibility-highlight-alt"));
        assert!(doc.tree().text_content(dynamic_style).contains("font-size: 100% !important"));
        assert_eq!(body_classes(&doc), "");
    }

    #[test]
    fn test_apply_requires_install() {
        let mut doc = fos_html::parse("<p>hi</p>");
        let mut overlay = Overlay::new();
        let err = overlay.toggle_flag(&mut doc, IndependentFlag::ReadableFont).unwrap_err();
        assert!(matches!(err, OverlayError::NotInstalled));
    }

    #[test]
    fn test_exclusive_mode_swaps_body_class() {
        let (mut overlay, mut doc) = installed("<p>hi</p>");
        overlay.toggle_exclusive_mode(&mut doc, ExclusiveMode::Inverted).unwrap();
        assert_eq!(body_classes(&doc), "accessibility-inverted");

        overlay.toggle_exclusive_mode(&mut doc, ExclusiveMode::Grayscale).unwrap();
        assert_eq!(body_classes(&doc), "accessibility-grayscale");

        overlay.toggle_exclusive_mode(&mut doc, ExclusiveMode::Grayscale).unwrap();
        assert_eq!(body_classes(&doc), "");
    }

    #[test]
    fn test_invalid_color_reported_and_omitted() {
        let (mut overlay, mut doc) = installed("<a href='/'>x</a>");
        let err = overlay.set_link_color(&mut doc, "not-a-color").unwrap_err();
        assert!(matches!(err, OverlayError::InvalidColorFormat { ref color, .. } if color == "not-a-color"));
        assert_eq!(overlay.state().link_color(), "not-a-color");

        let style = doc.get_element_by_id("accessibility-dynamic-styles").unwrap();
        assert!(!doc.tree().text_content(style).contains("color:"));

        overlay.set_link_color(&mut doc, "#336699").unwrap();
        assert!(doc.tree().text_content(style).contains("color: #336699 !important"));
    }

    #[test]
    fn test_results_lifecycle() {
        let (mut overlay, mut doc) = installed("<img src='x.png'>");
        assert_eq!(overlay.results(), &ResultsView::Prompt);

        let report = overlay.run_checks(&mut doc);
        assert_eq!(report.missing_alt.len(), 1);
        assert!(overlay.state().highlights_active());
        assert!(overlay.results().has_issues());

        assert_eq!(overlay.clear_highlights(&mut doc), 1);
        assert!(!overlay.state().highlights_active());
        assert_eq!(overlay.results(), &ResultsView::Cleared);

        overlay.run_checks(&mut doc);
        overlay.close_panel(&mut doc);
        assert_eq!(overlay.results(), &ResultsView::Prompt);
        assert!(!overlay.state().highlights_active());
    }

    #[test]
    fn test_reset_keeps_highlights() {
        let (mut overlay, mut doc) = installed("<a></a>");
        overlay.run_checks(&mut doc);
        overlay.toggle_flag(&mut doc, IndependentFlag::ImagesHidden).unwrap();
        overlay.reset(&mut doc).unwrap();

        assert!(overlay.state().highlights_active());
        assert!(!overlay.state().images_hidden());
        assert_eq!(body_classes(&doc), "");
    }

    #[test]
    fn test_uninstall_removes_everything() {
        let (mut overlay, mut doc) = installed("<img>");
        overlay.toggle_flag(&mut doc, IndependentFlag::FocusHighlighted).unwrap();
        overlay.run_checks(&mut doc);

        overlay.uninstall(&mut doc);
        assert!(!overlay.is_installed(&doc));
        assert!(doc.get_element_by_id("accessibility-tool-styles").is_none());
        assert_eq!(body_classes(&doc), "");
        let img = doc.tree().get_elements_by_tag_name(doc.tree().root(), "img")[0];
        assert!(!doc.tree().has_attribute(img, "alt"));
        assert!(!doc.tree().has_attribute(img, "class"));
        assert!(!doc.tree().has_attribute(doc.body(), "class"));
    }
}
