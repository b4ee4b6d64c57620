//! Command line arguments for the overlay binary

use clap::Parser;
use fos_a11y::{ExclusiveMode, IndependentFlag};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "fos-overlay",
    version,
    about = "Apply accessibility adjustments to an HTML document and check it for common defects"
)]
pub struct Cli {
    /// HTML file to process
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Invert page colors
    #[arg(long, group = "filter")]
    pub invert: bool,

    /// Render the page in grayscale
    #[arg(long, group = "filter")]
    pub grayscale: bool,

    /// High contrast colors
    #[arg(long, group = "filter")]
    pub high_contrast: bool,

    #[arg(long)]
    pub hide_images: bool,

    /// Switch all text to a sans-serif font
    #[arg(long)]
    pub readable_font: bool,

    /// Outline focused elements
    #[arg(long)]
    pub focus_highlight: bool,

    #[arg(long)]
    pub underline_links: bool,

    #[arg(long)]
    pub bold_links: bool,

    /// Link color override (any CSS color)
    #[arg(long, value_name = "COLOR")]
    pub link_color: Option<String>,

    /// Text size in percent, clamped to 50..=200
    #[arg(long, value_name = "PERCENT", allow_negative_numbers = true)]
    pub text_scale: Option<i64>,

    /// Line height in percent, clamped to 50..=200
    #[arg(long, value_name = "PERCENT", allow_negative_numbers = true)]
    pub line_height: Option<i64>,

    /// Letter spacing in pixels, clamped to 0..=5
    #[arg(long, value_name = "PX", allow_negative_numbers = true)]
    pub letter_spacing: Option<f64>,

    /// Run the diagnostic checks and highlight defects
    #[arg(long)]
    pub scan: bool,

    /// Print the settings and report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Write the adjusted document to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the adjusted document to stdout
    #[arg(long, conflicts_with = "json")]
    pub emit_html: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Exclusive mode requested on the command line, if any
    pub fn exclusive_mode(&self) -> Option<ExclusiveMode> {
        if self.invert {
            Some(ExclusiveMode::Inverted)
        } else if self.grayscale {
            Some(ExclusiveMode::Grayscale)
        } else if self.high_contrast {
            Some(ExclusiveMode::HighContrast)
        } else {
            None
        }
    }

    /// Independent flags to switch on
    pub fn independent_flags(&self) -> Vec<IndependentFlag> {
        [
            (self.hide_images, IndependentFlag::ImagesHidden),
            (self.readable_font, IndependentFlag::ReadableFont),
            (self.focus_highlight, IndependentFlag::FocusHighlighted),
        ]
        .into_iter()
        .filter_map(|(on, flag)| on.then_some(flag))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_settings() {
        let cli = Cli::try_parse_from([
            "fos-overlay",
            "page.html",
            "--grayscale",
            "--hide-images",
            "--focus-highlight",
            "--text-scale",
            "-20",
            "--letter-spacing",
            "1.5",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.exclusive_mode(), Some(ExclusiveMode::Grayscale));
        assert_eq!(
            cli.independent_flags(),
            vec![IndependentFlag::ImagesHidden, IndependentFlag::FocusHighlighted]
        );
        assert_eq!(cli.text_scale, Some(-20));
        assert_eq!(cli.letter_spacing, Some(1.5));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_exclusive_filters_conflict() {
        let result = Cli::try_parse_from(["fos-overlay", "page.html", "--invert", "--high-contrast"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_input_required() {
        assert!(Cli::try_parse_from(["fos-overlay", "--scan"]).is_err());
    }
}
