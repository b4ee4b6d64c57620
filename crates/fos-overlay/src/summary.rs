//! Results panel text

use fos_a11y::DefectReport;
use serde::Serialize;
use std::fmt;

pub const PROMPT: &str = "Click \"Run Checks\" to scan for issues.";
pub const NO_ISSUES: &str = "No common accessibility issues found!";
pub const HIGHLIGHT_HINT: &str = "Highlighted elements on the page.";
pub const CLEARED: &str = "Highlights cleared. Click \"Run Checks\" to scan again.";

/// What the results area currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum ResultsView {
    /// Nothing scanned yet
    #[default]
    Prompt,
    Report(DefectReport),
    Cleared,
}

impl ResultsView {
    /// Lines of text, in display order
    pub fn lines(&self) -> Vec<String> {
        match self {
            ResultsView::Prompt => vec![PROMPT.to_string()],
            ResultsView::Cleared => vec![CLEARED.to_string()],
            ResultsView::Report(report) if report.is_empty() => vec![NO_ISSUES.to_string()],
            ResultsView::Report(report) => {
                let mut lines = vec![format!("Found {} issues:", report.total())];
                if !report.missing_alt.is_empty() {
                    lines.push(format!(
                        "Missing ALT text on {} image(s) (red outline).",
                        report.missing_alt.len()
                    ));
                }
                if !report.empty_links.is_empty() {
                    lines.push(format!(
                        "Empty or inaccessible links: {} (orange outline).",
                        report.empty_links.len()
                    ));
                }
                lines.push(HIGHLIGHT_HINT.to_string());
                lines
            }
        }
    }

    /// Whether the view carries defects
    pub fn has_issues(&self) -> bool {
        matches!(self, ResultsView::Report(report) if !report.is_empty())
    }
}

impl fmt::Display for ResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::DomTree;

    #[test]
    fn test_prompt_and_cleared() {
        assert_eq!(ResultsView::Prompt.to_string(), PROMPT);
        assert_eq!(ResultsView::Cleared.to_string(), CLEARED);
        assert!(!ResultsView::Cleared.has_issues());
    }

    #[test]
    fn test_empty_report() {
        let view = ResultsView::Report(DefectReport::default());
        assert_eq!(view.lines(), vec![NO_ISSUES]);
        assert!(!view.has_issues());
    }

    #[test]
    fn test_report_lines() {
        let mut tree = DomTree::new();
        let nodes: Vec<_> = (0..3).map(|_| tree.create_element("img")).collect();
        let view = ResultsView::Report(DefectReport {
            missing_alt: nodes[..2].to_vec(),
            empty_links: nodes[2..].to_vec(),
        });

        assert!(view.has_issues());
        assert_eq!(
            view.lines(),
            vec![
                "Found 3 issues:",
                "Missing ALT text on 2 image(s) (red outline).",
                "Empty or inaccessible links: 1 (orange outline).",
                HIGHLIGHT_HINT,
            ]
        );
    }

    #[test]
    fn test_only_links_omits_alt_line() {
        let mut tree = DomTree::new();
        let link = tree.create_element("a");
        let view = ResultsView::Report(DefectReport { missing_alt: vec![], empty_links: vec![link] });
        let text = view.to_string();
        assert!(text.starts_with("Found 1 issues:"));
        assert!(!text.contains("Missing ALT"));
    }
}
