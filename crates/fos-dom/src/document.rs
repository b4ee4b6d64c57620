//! Document - High-level document API

use crate::{DomTree, ElementQuery, NodeId};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with an html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate and cache the html/head/body elements after the tree has been
    /// built externally
    pub fn finalize(&mut self) {
        let root = self.tree.root();
        self.html_element = self.first_child_tagged(root, "html");
        self.head_element = self.first_child_tagged(self.html_element, "head");
        self.body_element = self.first_child_tagged(self.html_element, "body");
    }

    fn first_child_tagged(&self, parent: NodeId, tag: &str) -> NodeId {
        self.tree
            .children(parent)
            .map(|(id, _)| id)
            .find(|&id| self.tree.tag_name(id) == Some(tag))
            .unwrap_or(NodeId::NONE)
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }
        self.tree
            .get_elements_by_tag_name(self.head_element, "title")
            .first()
            .map(|&title| self.tree.text_content(title).trim().to_string())
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get the first connected element with the given id
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let target = self.tree.interner().lookup(id)?;
        self.tree.descendants(self.tree.root()).find(|&node_id| {
            self.tree
                .get(node_id)
                .and_then(|n| n.as_element())
                .is_some_and(|e| e.id == Some(target))
        })
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
