//! Generated stylesheet tests for fos-css
//!
//! Text written by [`Stylesheet::to_css`] must be accepted by the parser
//! with selectors and `!important` flags intact.

use fos_css::{CssError, Rule, Stylesheet, parse_stylesheet, validate_color};

fn overlay_like_sheet() -> Stylesheet {
    let mut sheet = Stylesheet::new();
    sheet.push(
        Rule::new([".hc button", ".hc input", ".hc select"])
            .declare_important("background-color", "#333")
            .declare_important("color", "#fff"),
    );
    sheet.push(Rule::new([".focus *:focus"]).declare_important("outline", "3px solid #00f"));
    sheet.push(Rule::new(["a"]).declare("font-weight", "bold"));
    sheet
}

#[test]
fn test_generated_sheet_reparses() {
    let sheet = overlay_like_sheet();
    let parsed = parse_stylesheet(&sheet.to_css()).unwrap();

    assert_eq!(parsed.rules.len(), 3);
    assert_eq!(parsed.rules[0].selectors, vec![".hc button", ".hc input", ".hc select"]);
    assert!(parsed.rules[0].declarations.iter().all(|d| d.important));
    assert!(parsed.rule_for(".focus :focus").is_some() || parsed.rule_for(".focus *:focus").is_some());
    assert!(!parsed.rule_for("a").unwrap().get("font-weight").unwrap().important);
}

#[test]
fn test_empty_input_parses_to_no_rules() {
    assert!(parse_stylesheet("").unwrap().rules.is_empty());
    assert!(parse_stylesheet("/* nothing */").unwrap().rules.is_empty());
}

#[test]
fn test_invalid_color_error_names_input() {
    let err = validate_color("bluish").unwrap_err();
    assert!(matches!(err, CssError::InvalidColor(ref c) if c == "bluish"));
    assert!(err.to_string().contains("bluish"));
}
