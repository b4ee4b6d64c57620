//! fOS HTML Parser
//!
//! HTML5 parser built on html5ever, producing an `fos_dom::Document`, plus
//! the serializer that writes a document back out.

mod parser;
mod serializer;

pub use fos_dom::Document;
pub use parser::HtmlParser;
pub use serializer::{HtmlSerializer, get_inner_html, get_outer_html};

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}

/// Serialize a whole document back to HTML
pub fn serialize(document: &Document) -> String {
    HtmlSerializer::new().serialize_outer(document.tree(), document.tree().root())
}
