//! fOS Accessibility Overlay - command line entry point

use anyhow::{Context, Result};
use clap::Parser;
use fos_dom::Document;
use fos_overlay::cli::Cli;
use fos_overlay::logging::{LogConfig, init_logging};
use fos_overlay::{Overlay, OverlayError};
use std::io::IsTerminal;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(
        &LogConfig::from_verbosity(cli.verbose, cli.quiet).with_ansi(std::io::stderr().is_terminal()),
    );
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let html = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let mut doc = fos_html::HtmlParser::new().parse_with_url(&html, &cli.input.display().to_string());

    let mut overlay = Overlay::new();
    overlay.install(&mut doc).context("failed to install overlay")?;
    apply_settings(cli, &mut overlay, &mut doc)?;

    let report = cli.scan.then(|| overlay.run_checks(&mut doc));

    if cli.json {
        let out = serde_json::json!({
            "settings": overlay.state(),
            "presentation": overlay.descriptor(),
            "report": report,
            "summary": overlay.results().lines(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if !cli.emit_html {
        println!("{}", overlay.results());
    }

    let serialized = fos_html::serialize(&doc);
    if let Some(path) = &cli.output {
        std::fs::write(path, &serialized).with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "Wrote adjusted document");
    }
    if cli.emit_html {
        println!("{serialized}");
    }

    Ok(())
}

fn apply_settings(cli: &Cli, overlay: &mut Overlay, doc: &mut Document) -> Result<()> {
    if let Some(mode) = cli.exclusive_mode() {
        overlay.toggle_exclusive_mode(doc, mode)?;
    }
    for flag in cli.independent_flags() {
        overlay.toggle_flag(doc, flag)?;
    }
    if cli.underline_links {
        overlay.set_link_underline(doc, true)?;
    }
    if cli.bold_links {
        overlay.set_link_bold(doc, true)?;
    }
    if let Some(color) = &cli.link_color {
        match overlay.set_link_color(doc, color) {
            // Already logged; the rest of the styles were applied
            Err(OverlayError::InvalidColorFormat { .. }) => {}
            other => other?,
        }
    }
    if let Some(percent) = cli.text_scale {
        overlay.set_text_scale(doc, percent)?;
    }
    if let Some(percent) = cli.line_height {
        overlay.set_line_height(doc, percent)?;
    }
    if let Some(px) = cli.letter_spacing {
        overlay.set_letter_spacing(doc, px)?;
    }
    Ok(())
}
