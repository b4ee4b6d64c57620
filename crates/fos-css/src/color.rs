//! Color validation

use crate::CssError;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;

/// Check that `value` is a single, complete CSS `<color>` (named color, hex,
/// `rgb()`, `hsl()`, `currentColor`, ...)
pub fn validate_color(value: &str) -> Result<(), CssError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CssError::InvalidColor(value.to_string()));
    }
    CssColor::parse_string(trimmed)
        .map(|_| ())
        .map_err(|_| CssError::InvalidColor(value.to_string()))
}
