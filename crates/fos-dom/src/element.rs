//! Element Query and Methods
//!
//! getElementsByTagName, getElementsByClassName, querySelectorAll for simple
//! selector lists, and text extraction.

use crate::{DomTree, NodeData, NodeId};

/// Element query trait
pub trait ElementQuery {
    /// Query all elements matching a comma-separated list of simple selectors
    fn query_selector_all(&self, root: NodeId, selector: &str) -> Vec<NodeId>;

    /// Get elements by class name
    fn get_elements_by_class_name(&self, root: NodeId, class: &str) -> Vec<NodeId>;

    /// Get elements by tag name
    fn get_elements_by_tag_name(&self, root: NodeId, tag: &str) -> Vec<NodeId>;

    /// Check if element matches selector
    fn matches(&self, element: NodeId, selector: &SimpleSelector) -> bool;

    /// Concatenated descendant text
    fn text_content(&self, element: NodeId) -> String;

    /// Text a reader would perceive: like `text_content`, but skips
    /// non-rendered subtrees (`script`, `style`, `noscript`, `template`) and
    /// subtrees carrying the `hidden` attribute
    fn inner_text(&self, element: NodeId) -> String;
}

/// Simple selector for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Tag(String),
    Class(String),
    Id(String),
    Universal,
}

impl SimpleSelector {
    /// Parse a simple selector string
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if s == "*" {
            Some(Self::Universal)
        } else if let Some(id) = s.strip_prefix('#') {
            Some(Self::Id(id.to_string()))
        } else if let Some(class) = s.strip_prefix('.') {
            Some(Self::Class(class.to_string()))
        } else {
            Some(Self::Tag(s.to_lowercase()))
        }
    }

    /// Parse a comma-separated selector list, dropping empty entries
    pub fn parse_list(s: &str) -> Vec<Self> {
        s.split(',').filter_map(Self::parse).collect()
    }
}

/// Tags whose content is never rendered as text
const NON_RENDERED_TAGS: &[&str] = &["script", "style", "noscript", "template"];

impl DomTree {
    fn collect_text(&self, element: NodeId, rendered_only: bool, out: &mut String) {
        for (child_id, child) in self.children(element) {
            match &child.data {
                NodeData::Text(text) => out.push_str(&text.content),
                NodeData::Element(elem) => {
                    if rendered_only {
                        let tag = self.resolve(elem.name.local);
                        if NON_RENDERED_TAGS.contains(&tag) || self.has_attribute(child_id, "hidden") {
                            continue;
                        }
                    }
                    self.collect_text(child_id, rendered_only, out);
                }
                _ => {}
            }
        }
    }
}

impl ElementQuery for DomTree {
    fn query_selector_all(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let selectors = SimpleSelector::parse_list(selector);
        if selectors.is_empty() {
            return Vec::new();
        }
        self.descendants(root)
            .filter(|&id| selectors.iter().any(|s| self.matches(id, s)))
            .collect()
    }

    fn get_elements_by_class_name(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.query_selector_all(root, &format!(".{class}"))
    }

    fn get_elements_by_tag_name(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        let selector = SimpleSelector::Tag(tag.to_lowercase());
        self.descendants(root)
            .filter(|&id| self.matches(id, &selector))
            .collect()
    }

    fn matches(&self, element: NodeId, selector: &SimpleSelector) -> bool {
        let Some(elem) = self.get(element).and_then(|n| n.as_element()) else {
            return false;
        };
        match selector {
            SimpleSelector::Universal => true,
            SimpleSelector::Tag(tag) => self.resolve(elem.name.local).eq_ignore_ascii_case(tag),
            SimpleSelector::Id(id) => elem.id.is_some_and(|i| self.resolve(i) == id),
            SimpleSelector::Class(class) => self.has_class(element, class),
        }
    }

    fn text_content(&self, element: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(element, false, &mut out);
        out
    }

    fn inner_text(&self, element: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(element, true, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_selector_parse() {
        assert!(matches!(SimpleSelector::parse("div"), Some(SimpleSelector::Tag(_))));
        assert!(matches!(SimpleSelector::parse(".class"), Some(SimpleSelector::Class(_))));
        assert!(matches!(SimpleSelector::parse("#id"), Some(SimpleSelector::Id(_))));
        assert!(matches!(SimpleSelector::parse("*"), Some(SimpleSelector::Universal)));
        assert_eq!(SimpleSelector::parse("  "), None);
        assert_eq!(SimpleSelector::parse_list(".a, .b,").len(), 2);
    }

    #[test]
    fn test_query_by_tag_in_document_order() {
        let mut tree = DomTree::new();
        let body = tree.create_element("body");
        let img1 = tree.create_element("img");
        let p = tree.create_element("p");
        let img2 = tree.create_element("IMG");
        tree.append_child(tree.root(), body);
        tree.append_child(body, img1);
        tree.append_child(body, p);
        tree.append_child(p, img2);

        assert_eq!(tree.get_elements_by_tag_name(tree.root(), "img"), vec![img1, img2]);
    }

    #[test]
    fn test_query_selector_list() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a");
        let b = tree.create_element("img");
        tree.append_child(tree.root(), a);
        tree.append_child(tree.root(), b);
        tree.add_class(a, "x");
        tree.add_class(b, "y");

        assert_eq!(tree.query_selector_all(tree.root(), ".x, .y"), vec![a, b]);
        assert_eq!(tree.get_elements_by_class_name(tree.root(), "y"), vec![b]);
    }

    #[test]
    fn test_inner_text_skips_non_rendered() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a");
        let script = tree.create_element("script");
        let code = tree.create_text("var x = 1;");
        let span = tree.create_element("span");
        let hidden = tree.create_text("secret");
        tree.append_child(tree.root(), a);
        tree.append_child(a, script);
        tree.append_child(script, code);
        tree.append_child(a, span);
        tree.append_child(span, hidden);
        tree.set_attribute(span, "hidden", "");

        assert_eq!(tree.text_content(a), "var x = 1;secret");
        assert_eq!(tree.inner_text(a), "");
    }
}
