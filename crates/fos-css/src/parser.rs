//! CSS Parser using lightningcss
//!
//! Parses CSS stylesheets into our internal representation. Only plain style
//! rules are kept; at-rules are skipped.

use crate::{CssError, Declaration, Rule, Stylesheet};
use lightningcss::declaration::DeclarationBlock;
use lightningcss::printer::PrinterOptions;
use lightningcss::properties::Property;
use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{ParserOptions, StyleSheet};
use lightningcss::traits::ToCss;

/// CSS Parser
pub struct CssParser;

impl CssParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a CSS stylesheet
    pub fn parse(&self, css: &str) -> Result<Stylesheet, CssError> {
        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| CssError::ParseError { message: e.to_string() })?;

        let mut result = Stylesheet::new();
        for rule in stylesheet.rules.0.iter() {
            if let Some(converted) = self.convert_rule(rule)? {
                result.push(converted);
            }
        }

        tracing::trace!("Parsed {} style rules", result.rules.len());
        Ok(result)
    }

    fn convert_rule(&self, rule: &CssRule) -> Result<Option<Rule>, CssError> {
        match rule {
            CssRule::Style(style_rule) => {
                let selectors = style_rule
                    .selectors
                    .to_css_string(PrinterOptions::default())
                    .map_err(|e| CssError::ParseError { message: e.to_string() })?;
                let mut converted = Rule::new(selectors.split(',').map(str::trim));
                converted.declarations = self.convert_declarations(&style_rule.declarations)?;
                Ok(Some(converted))
            }
            _ => Ok(None),
        }
    }

    fn convert_declarations(&self, block: &DeclarationBlock) -> Result<Vec<Declaration>, CssError> {
        let normal = block.declarations.iter().map(|p| (p, false));
        let important = block.important_declarations.iter().map(|p| (p, true));
        normal
            .chain(important)
            .map(|(property, important)| self.convert_declaration(property, important))
            .collect()
    }

    fn convert_declaration(&self, property: &Property, important: bool) -> Result<Declaration, CssError> {
        let value = property
            .value_to_css_string(PrinterOptions::default())
            .map_err(|e| CssError::ParseError { message: e.to_string() })?;
        Ok(Declaration::new(property.property_id().name(), value, important))
    }
}

impl Default for CssParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_important_declarations() {
        let sheet = CssParser::new()
            .parse("a { text-decoration: underline !important; font-weight: bold; }")
            .unwrap();
        let rule = sheet.rule_for("a").unwrap();
        assert!(rule.get("text-decoration").unwrap().important);
        assert!(!rule.get("font-weight").unwrap().important);
    }

    #[test]
    fn test_selector_list_split() {
        let sheet = CssParser::new().parse("body, html { letter-spacing: 2px; }").unwrap();
        assert_eq!(sheet.rules[0].selectors, vec!["body".to_string(), "html".to_string()]);
    }

    #[test]
    fn test_at_rules_skipped() {
        let sheet = CssParser::new()
            .parse("@media (max-width: 600px) { a { color: red; } } p { color: blue; }")
            .unwrap();
        assert_eq!(sheet.rules.len(), 1);
    }
}
