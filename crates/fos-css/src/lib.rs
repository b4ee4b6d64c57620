//! fOS CSS
//!
//! Minimal stylesheet model used to generate style blocks, a writer that
//! turns it into CSS text, and lightningcss-backed parsing and color
//! validation.

mod parser;
mod color;

pub use parser::CssParser;
pub use color::validate_color;

use std::fmt::{self, Write};

/// Parse a CSS stylesheet
pub fn parse_stylesheet(css: &str) -> Result<Stylesheet, CssError> {
    CssParser::new().parse(css)
}

/// Parsed or generated stylesheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Find the first rule whose selector list contains `selector`
    pub fn rule_for(&self, selector: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.selectors.iter().any(|s| s == selector))
    }

    /// Serialize to CSS text, one rule per block
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}

/// CSS style rule
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selectors: Vec<String>,
    pub declarations: Vec<Declaration>,
}

impl Rule {
    /// Start a rule for a selector list
    pub fn new<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selectors: selectors.into_iter().map(Into::into).collect(),
            declarations: Vec::new(),
        }
    }

    /// Add a normal declaration
    pub fn declare(mut self, property: &str, value: impl Into<String>) -> Self {
        self.declarations.push(Declaration::new(property, value, false));
        self
    }

    /// Add an `!important` declaration
    pub fn declare_important(mut self, property: &str, value: impl Into<String>) -> Self {
        self.declarations.push(Declaration::new(property, value, true));
        self
    }

    /// Look up a declaration by property name
    pub fn get(&self, property: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.property == property)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.selectors.join(", "))?;
        for decl in &self.declarations {
            writeln!(f, "    {decl};")?;
        }
        f.write_char('}')
    }
}

/// CSS declaration (property: value)
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

impl Declaration {
    pub fn new(property: &str, value: impl Into<String>, important: bool) -> Self {
        Self {
            property: property.to_string(),
            value: value.into(),
            important,
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)?;
        if self.important {
            f.write_str(" !important")?;
        }
        Ok(())
    }
}

/// CSS error
#[derive(Debug, thiserror::Error)]
pub enum CssError {
    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Invalid color value: {0:?}")]
    InvalidColor(String),
}
