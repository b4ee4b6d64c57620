//! Style rendering
//!
//! Turns a [`PresentationDescriptor`] into the two stylesheets the overlay
//! injects and the set of body classes that key off it.

use crate::config::OverlayConfig;
use fos_a11y::{ExclusiveFilter, PresentationDescriptor};
use fos_css::{validate_color, CssError, Rule, Stylesheet};

/// Dynamic stylesheet plus the link color that had to be dropped from it
#[derive(Debug)]
pub struct RenderedStyles {
    pub stylesheet: Stylesheet,
    pub rejected_color: Option<(String, CssError)>,
}

/// Effect and highlight rules. Constant for a given config.
pub fn static_stylesheet(config: &OverlayConfig) -> Stylesheet {
    let fx = &config.effects;
    let marks = &config.scanner;
    let mut sheet = Stylesheet::new();

    sheet.push(Rule::new([format!(".{}", marks.missing_alt_marker)])
        .declare_important("outline", "3px solid red")
        .declare_important("box-shadow", "0 0 10px rgba(255, 0, 0, 0.5)"));
    sheet.push(Rule::new([format!(".{}", marks.empty_link_marker)])
        .declare_important("outline", "3px solid orange")
        .declare_important("box-shadow", "0 0 10px rgba(255, 165, 0, 0.5)"));

    sheet.push(Rule::new([format!(".{}", fx.inverted)])
        .declare_important("filter", "invert(100%) hue-rotate(180deg)"));
    sheet.push(Rule::new([format!(".{}", fx.grayscale)])
        .declare_important("filter", "grayscale(100%)"));
    sheet.push(Rule::new([format!(".{}", fx.high_contrast)])
        .declare_important("background-color", "#000")
        .declare_important("color", "#fff")
        .declare_important("filter", "none"));
    sheet.push(Rule::new([format!(".{} a", fx.high_contrast)])
        .declare_important("color", "#ffff00"));
    sheet.push(Rule::new(["button", "input", "select"].map(|tag| format!(".{} {tag}", fx.high_contrast)))
        .declare_important("background-color", "#333")
        .declare_important("color", "#fff")
        .declare_important("border-color", "#fff"));

    sheet.push(Rule::new([format!(".{} img", fx.images_hidden)])
        .declare_important("display", "none")
        .declare_important("visibility", "hidden"));
    sheet.push(Rule::new([format!(".{} *", fx.readable_font)])
        .declare_important("font-family", "'Arial', 'Helvetica', sans-serif"));
    sheet.push(Rule::new([format!(".{} *:focus", fx.focus_highlight)])
        .declare_important("outline", "3px solid #00f")
        .declare_important("box-shadow", "0 0 0 2px #00f"));

    sheet
}

/// Text metrics and link rules regenerated after every settings change.
///
/// A link color that is not a valid CSS color is left out of the rules and
/// returned in `rejected_color`.
pub fn render_dynamic(descriptor: &PresentationDescriptor) -> RenderedStyles {
    let mut sheet = Stylesheet::new();

    sheet.push(Rule::new(["body", "html"])
        .declare_important("font-size", format!("{}%", descriptor.text_scale_percent))
        .declare_important("line-height", descriptor.line_height.to_string())
        .declare_important("letter-spacing", format!("{}px", descriptor.letter_spacing_px)));

    let link = &descriptor.link_decoration;
    let mut link_rule = Rule::new(["a"])
        .declare_important("text-decoration", if link.underline { "underline" } else { "none" })
        .declare_important("font-weight", if link.bold { "bold" } else { "normal" });

    let mut rejected_color = None;
    if let Some(color) = &link.color {
        match validate_color(color) {
            Ok(()) => link_rule = link_rule.declare_important("color", color.trim()),
            Err(err) => rejected_color = Some((color.clone(), err)),
        }
    }
    sheet.push(link_rule);

    RenderedStyles { stylesheet: sheet, rejected_color }
}

/// Body classes that should be present for `descriptor`. Every other effect
/// class must be absent.
pub fn active_body_classes<'a>(descriptor: &PresentationDescriptor, config: &'a OverlayConfig) -> Vec<&'a str> {
    let fx = &config.effects;
    let filter = match descriptor.exclusive_filter {
        ExclusiveFilter::None => None,
        ExclusiveFilter::Invert => Some(fx.inverted.as_str()),
        ExclusiveFilter::Grayscale => Some(fx.grayscale.as_str()),
        ExclusiveFilter::HighContrast => Some(fx.high_contrast.as_str()),
    };

    filter
        .into_iter()
        .chain(descriptor.images_hidden.then_some(fx.images_hidden.as_str()))
        .chain(descriptor.readable_font.then_some(fx.readable_font.as_str()))
        .chain(descriptor.focus_highlighted.then_some(fx.focus_highlight.as_str()))
        .collect()
}
