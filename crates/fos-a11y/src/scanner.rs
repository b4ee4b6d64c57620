//! Diagnostic Scanner
//!
//! Finds images without alternative text and links without an accessible
//! name, marks them on the document, and can undo every mark it made.
//!
//! Each annotation is recorded together with the data needed to reverse it
//! (the element's original `class` and, for images, original `alt`).
//! [`DiagnosticScanner::clear_annotations`] replays that log; it never
//! inspects the document to decide what to restore.
//!
//! A document saved while highlighted carries no log. For that case an
//! existing `alt` is also copied into [`ORIGINAL_ALT_ATTRIBUTE`], and
//! [`DiagnosticScanner::restore_stale_annotations`] undoes marks found on a
//! freshly loaded page from the document alone.

use fos_dom::{DomTree, ElementQuery, NodeId};
use serde::Serialize;
use std::collections::HashSet;

/// Marker class for images missing alternative text
pub const MISSING_ALT_MARKER: &str = "accessibility-highlight-alt";
/// Marker class for empty or inaccessible links
pub const EMPTY_LINK_MARKER: &str = "accessibility-highlight-link";
/// Alternative text substituted on flagged images
pub const MISSING_ALT_SENTINEL: &str = "[MISSING ALT]";
/// Attribute holding an image's `alt` while the sentinel replaces it
pub const ORIGINAL_ALT_ATTRIBUTE: &str = "data-accessibility-original-alt";

/// Marker names and sentinel text used when annotating
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    pub missing_alt_marker: String,
    pub empty_link_marker: String,
    pub missing_alt_sentinel: String,
    pub original_alt_attribute: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            missing_alt_marker: MISSING_ALT_MARKER.to_string(),
            empty_link_marker: EMPTY_LINK_MARKER.to_string(),
            missing_alt_sentinel: MISSING_ALT_SENTINEL.to_string(),
            original_alt_attribute: ORIGINAL_ALT_ATTRIBUTE.to_string(),
        }
    }
}

/// Elements to examine, in document order. Supplied fresh for every scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanTargets {
    pub images: Vec<NodeId>,
    pub links: Vec<NodeId>,
}

impl ScanTargets {
    /// Enumerate every connected `img` and `a` element of the tree
    pub fn collect(tree: &DomTree) -> Self {
        Self {
            images: tree.get_elements_by_tag_name(tree.root(), "img"),
            links: tree.get_elements_by_tag_name(tree.root(), "a"),
        }
    }
}

/// A detected defect with the data required to undo its annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Defect {
    /// Image with no `alt` or a blank one. `original_alt` is `None` when the
    /// attribute was absent.
    MissingAltText {
        element: NodeId,
        original_alt: Option<String>,
    },
    /// Link with no rendered text, no described image and no `aria-label`
    EmptyOrInaccessibleLink { element: NodeId },
}

impl Defect {
    pub fn element(&self) -> NodeId {
        match self {
            Defect::MissingAltText { element, .. } | Defect::EmptyOrInaccessibleLink { element } => *element,
        }
    }
}

/// One applied annotation plus its undo datum
#[derive(Debug, Clone)]
struct Annotation {
    defect: Defect,
    original_class: Option<String>,
}

/// Result of a scan, each list in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DefectReport {
    pub missing_alt: Vec<NodeId>,
    pub empty_links: Vec<NodeId>,
}

impl DefectReport {
    /// Total defects of both kinds
    pub fn total(&self) -> usize {
        self.missing_alt.len() + self.empty_links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Scans a document and owns the undo log for its annotations
#[derive(Debug, Default)]
pub struct DiagnosticScanner {
    config: ScannerConfig,
    annotations: Vec<Annotation>,
    active: bool,
}

impl DiagnosticScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScannerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// True from a scan until the next clear
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Defects currently annotated on the document, in annotation order
    pub fn defects(&self) -> impl Iterator<Item = &Defect> {
        self.annotations.iter().map(|a| &a.defect)
    }

    /// Number of annotations that a clear would undo
    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }

    /// Scan `targets`, annotating every defect found.
    ///
    /// Always clears the previous scan first, so repeated scans never stack
    /// annotations. Every element is classified before any annotation is
    /// applied: a link is judged by the real `alt` of the images inside it,
    /// never by the sentinel.
    pub fn scan(&mut self, tree: &mut DomTree, targets: &ScanTargets) -> DefectReport {
        self.clear_annotations(tree);

        let missing_alt = unique_elements(tree, &targets.images)
            .filter(|&img| is_missing_alt(tree, img))
            .collect::<Vec<_>>();
        let empty_links = unique_elements(tree, &targets.links)
            .filter(|&link| is_empty_link(tree, link))
            .collect::<Vec<_>>();

        for &img in &missing_alt {
            let original_alt = tree.attribute(img, "alt").map(str::to_string);
            self.annotate(tree, Defect::MissingAltText { element: img, original_alt });
        }
        for &link in &empty_links {
            self.annotate(tree, Defect::EmptyOrInaccessibleLink { element: link });
        }

        self.active = true;
        tracing::info!(
            images = targets.images.len(),
            links = targets.links.len(),
            missing_alt = missing_alt.len(),
            empty_links = empty_links.len(),
            "Diagnostic scan complete"
        );

        DefectReport { missing_alt, empty_links }
    }

    fn annotate(&mut self, tree: &mut DomTree, defect: Defect) {
        let element = defect.element();
        let original_class = tree.attribute(element, "class").map(str::to_string);

        match &defect {
            Defect::MissingAltText { original_alt, .. } => {
                tree.add_class(element, &self.config.missing_alt_marker);
                if let Some(alt) = original_alt {
                    tree.set_attribute(element, &self.config.original_alt_attribute, alt);
                }
                tree.set_attribute(element, "alt", &self.config.missing_alt_sentinel);
            }
            Defect::EmptyOrInaccessibleLink { .. } => {
                tree.add_class(element, &self.config.empty_link_marker);
            }
        }

        tracing::trace!(%element, ?defect, "Annotated");
        self.annotations.push(Annotation { defect, original_class });
    }

    /// Undo every annotation from the last scan. Elements no longer in the
    /// document are skipped. Safe to call when nothing is annotated.
    ///
    /// Returns the number of elements restored.
    pub fn clear_annotations(&mut self, tree: &mut DomTree) -> usize {
        let mut restored = 0;

        // Undo in reverse order of application
        while let Some(Annotation { defect, original_class }) = self.annotations.pop() {
            let element = defect.element();
            if !tree.is_connected(element) {
                tracing::debug!(%element, "Annotated element left the document; skipping restore");
                continue;
            }

            restore_attribute(tree, element, "class", original_class.as_deref());
            if let Defect::MissingAltText { original_alt, .. } = &defect {
                restore_attribute(tree, element, "alt", original_alt.as_deref());
                tree.remove_attribute(element, &self.config.original_alt_attribute);
            }
            restored += 1;
        }

        if self.active {
            tracing::debug!(restored, "Diagnostic highlights cleared");
        }
        self.active = false;
        restored
    }

    /// Undo marks left in the document by a scan this scanner did not
    /// record, such as one saved with the page before it was reloaded.
    ///
    /// Images get back the `alt` kept in the original-alt attribute, or lose
    /// the sentinel when there is none. Returns the number of elements
    /// restored.
    pub fn restore_stale_annotations(&self, tree: &mut DomTree) -> usize {
        let config = &self.config;
        let mut restored = 0;

        for img in tree.get_elements_by_class_name(tree.root(), &config.missing_alt_marker) {
            match tree.attribute(img, &config.original_alt_attribute).map(str::to_string) {
                Some(alt) => {
                    tree.set_attribute(img, "alt", &alt);
                    tree.remove_attribute(img, &config.original_alt_attribute);
                }
                None if tree.attribute(img, "alt") == Some(config.missing_alt_sentinel.as_str()) => {
                    tree.remove_attribute(img, "alt");
                }
                None => {}
            }
            tree.remove_class(img, &config.missing_alt_marker);
            restored += 1;
        }
        for link in tree.get_elements_by_class_name(tree.root(), &config.empty_link_marker) {
            tree.remove_class(link, &config.empty_link_marker);
            restored += 1;
        }

        if restored > 0 {
            tracing::debug!(restored, "Restored stale annotations");
        }
        restored
    }
}

/// Connected elements from `ids`, first occurrence only
fn unique_elements<'a>(tree: &'a DomTree, ids: &'a [NodeId]) -> impl Iterator<Item = NodeId> + 'a {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(move |&id| {
        let usable = tree.get(id).is_some_and(|n| n.is_element()) && tree.is_connected(id);
        usable && seen.insert(id)
    })
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

fn is_missing_alt(tree: &DomTree, img: NodeId) -> bool {
    !has_text(tree.attribute(img, "alt"))
}

// Judged by each image's real `alt`: callers classify before any sentinel is written
fn is_empty_link(tree: &DomTree, link: NodeId) -> bool {
    if !tree.inner_text(link).trim().is_empty() {
        return false;
    }
    let described_image = tree
        .get_elements_by_tag_name(link, "img")
        .into_iter()
        .any(|img| has_text(tree.attribute(img, "alt")));
    !described_image && !has_text(tree.attribute(link, "aria-label"))
}

fn restore_attribute(tree: &mut DomTree, element: NodeId, name: &str, original: Option<&str>) {
    match original {
        Some(value) => {
            tree.set_attribute(element, name, value);
        }
        None => {
            tree.remove_attribute(element, name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with(build: impl FnOnce(&mut DomTree, NodeId)) -> DomTree {
        let mut tree = DomTree::new();
        let body = tree.create_element("body");
        tree.append_child(tree.root(), body);
        build(&mut tree, body);
        tree
    }

    fn scan_all(scanner: &mut DiagnosticScanner, tree: &mut DomTree) -> DefectReport {
        let targets = ScanTargets::collect(tree);
        scanner.scan(tree, &targets)
    }

    fn child(tree: &mut DomTree, parent: NodeId, tag: &str) -> NodeId {
        let id = tree.create_element(tag);
        tree.append_child(parent, id);
        id
    }

    #[test]
    fn test_missing_alt_absent_restored_to_absent() {
        let mut img = NodeId::NONE;
        let mut tree = tree_with(|t, body| img = child(t, body, "img"));
        let mut scanner = DiagnosticScanner::new();

        let report = scan_all(&mut scanner, &mut tree);
        assert_eq!(report.missing_alt, vec![img]);
        assert_eq!(tree.attribute(img, "alt"), Some(MISSING_ALT_SENTINEL));
        assert!(tree.has_class(img, MISSING_ALT_MARKER));

        assert_eq!(scanner.clear_annotations(&mut tree), 1);
        assert_eq!(tree.attribute(img, "alt"), None);
        assert_eq!(tree.attribute(img, "class"), None);
    }

    #[test]
    fn test_whitespace_alt_is_missing() {
        let mut img = NodeId::NONE;
        let mut tree = tree_with(|t, body| {
            img = child(t, body, "img");
            t.set_attribute(img, "alt", "   ");
        });
        let mut scanner = DiagnosticScanner::new();
        let report = scan_all(&mut scanner, &mut tree);
        assert_eq!(report.missing_alt, vec![img]);
        scanner.clear_annotations(&mut tree);
        assert_eq!(tree.attribute(img, "alt"), Some("   "));
    }

    #[test]
    fn test_existing_classes_survive_round_trip() {
        let mut link = NodeId::NONE;
        let mut tree = tree_with(|t, body| {
            link = child(t, body, "a");
            t.set_attribute(link, "class", "nav  primary");
        });
        let mut scanner = DiagnosticScanner::new();
        scan_all(&mut scanner, &mut tree);
        assert!(tree.has_class(link, EMPTY_LINK_MARKER));
        assert!(tree.has_class(link, "nav"));

        scanner.clear_annotations(&mut tree);
        assert_eq!(tree.attribute(link, "class"), Some("nav  primary"));
        assert!(!tree.has_class(link, EMPTY_LINK_MARKER));
    }

    #[test]
    fn test_link_around_unlabelled_image_is_flagged() {
        // The sentinel written onto the image must not rescue the link
        let (mut link, mut img) = (NodeId::NONE, NodeId::NONE);
        let mut tree = tree_with(|t, body| {
            link = child(t, body, "a");
            img = child(t, link, "img");
        });
        let mut scanner = DiagnosticScanner::new();
        let report = scan_all(&mut scanner, &mut tree);
        assert_eq!(report.missing_alt, vec![img]);
        assert_eq!(report.empty_links, vec![link]);
    }

    #[test]
    fn test_duplicate_targets_annotated_once() {
        let mut img = NodeId::NONE;
        let mut tree = tree_with(|t, body| img = child(t, body, "img"));
        let targets = ScanTargets { images: vec![img, img], links: Vec::new() };
        let mut scanner = DiagnosticScanner::new();

        let report = scanner.scan(&mut tree, &targets);
        assert_eq!(report.missing_alt, vec![img]);
        assert_eq!(scanner.annotation_count(), 1);
        scanner.clear_annotations(&mut tree);
        assert_eq!(tree.attribute(img, "alt"), None);
    }

    #[test]
    fn test_non_element_targets_ignored() {
        let mut text = NodeId::NONE;
        let mut tree = tree_with(|t, body| {
            text = t.create_text("hello");
            t.append_child(body, text);
        });
        let targets = ScanTargets { images: vec![text, NodeId::NONE], links: vec![text] };
        let report = DiagnosticScanner::new().scan(&mut tree, &targets);
        assert!(report.is_empty());
    }

    #[test]
    fn test_clear_when_idle_is_noop() {
        let mut tree = tree_with(|_, _| {});
        let mut scanner = DiagnosticScanner::new();
        assert_eq!(scanner.clear_annotations(&mut tree), 0);
        assert!(!scanner.is_active());
    }

    #[test]
    fn test_custom_config() {
        let mut img = NodeId::NONE;
        let mut tree = tree_with(|t, body| img = child(t, body, "img"));
        let mut scanner = DiagnosticScanner::with_config(ScannerConfig {
            missing_alt_marker: "flag-img".into(),
            empty_link_marker: "flag-link".into(),
            missing_alt_sentinel: "??".into(),
            original_alt_attribute: "data-old-alt".into(),
        });
        scan_all(&mut scanner, &mut tree);
        assert!(tree.has_class(img, "flag-img"));
        assert_eq!(tree.attribute(img, "alt"), Some("??"));
        assert_eq!(tree.attribute(img, "data-old-alt"), None);
    }

    #[test]
    fn test_original_alt_kept_while_annotated() {
        let mut img = NodeId::NONE;
        let mut tree = tree_with(|t, body| {
            img = child(t, body, "img");
            t.set_attribute(img, "alt", "");
        });
        let mut scanner = DiagnosticScanner::new();
        scan_all(&mut scanner, &mut tree);
        assert_eq!(tree.attribute(img, ORIGINAL_ALT_ATTRIBUTE), Some(""));

        scanner.clear_annotations(&mut tree);
        assert_eq!(tree.attribute(img, "alt"), Some(""));
        assert!(!tree.has_attribute(img, ORIGINAL_ALT_ATTRIBUTE));
    }

    #[test]
    fn test_restore_stale_annotations_from_document() {
        let (mut bare, mut blank, mut link) = (NodeId::NONE, NodeId::NONE, NodeId::NONE);
        let mut tree = tree_with(|t, body| {
            bare = child(t, body, "img");
            blank = child(t, body, "img");
            t.set_attribute(blank, "alt", " ");
            link = child(t, body, "a");
            t.set_attribute(link, "class", "nav");
        });
        // Marks from a scan whose log is gone
        scan_all(&mut DiagnosticScanner::new(), &mut tree);

        let scanner = DiagnosticScanner::new();
        assert_eq!(scanner.restore_stale_annotations(&mut tree), 3);
        assert_eq!(tree.attribute(bare, "alt"), None);
        assert_eq!(tree.attribute(bare, "class"), None);
        assert_eq!(tree.attribute(blank, "alt"), Some(" "));
        assert!(!tree.has_attribute(blank, ORIGINAL_ALT_ATTRIBUTE));
        assert_eq!(tree.attribute(link, "class"), Some("nav"));
        assert_eq!(scanner.restore_stale_annotations(&mut tree), 0);
    }
}
