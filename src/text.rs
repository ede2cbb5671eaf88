//! Coordinate literal formatting and parsing.
//!
//! The separator convention is explicit configuration rather than ambient
//! locale state: when the decimal separator is `,`, components separate
//! with `;` to keep the literal unambiguous, otherwise with `,`.

use crate::error::{ParseError, Result};

/// Formatting configuration for coordinate text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateFormat {
    /// The character separating the integer and fractional digits.
    pub decimal_separator: char,
}

impl CoordinateFormat {
    /// Period decimal separator, comma component separator.
    pub const DEFAULT: Self = Self {
        decimal_separator: '.',
    };

    /// The component separator implied by the decimal separator.
    #[must_use]
    pub const fn component_separator(&self) -> char {
        if self.decimal_separator == ',' {
            ';'
        } else {
            ','
        }
    }
}

impl Default for CoordinateFormat {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Renders three components as `(x<sep> y<sep> z)`.
#[must_use]
pub fn format_components(x: f64, y: f64, z: f64, format: &CoordinateFormat) -> String {
    let sep = format.component_separator();
    let render = |value: f64| {
        let text = value.to_string();
        if format.decimal_separator == '.' {
            text
        } else {
            text.replace('.', &format.decimal_separator.to_string())
        }
    };
    format!("({}{sep} {}{sep} {})", render(x), render(y), render(z))
}

/// Parses a coordinate literal into exactly 3 finite components.
///
/// Accepts optional surrounding parentheses and either separator
/// convention; with `;` separators, components may use `,` as their
/// decimal separator.
///
/// # Errors
///
/// Returns a [`ParseError`] for unbalanced parentheses, a component count
/// other than 3, or a component that is not a finite number.
pub fn parse_components(text: &str) -> Result<[f64; 3]> {
    let trimmed = text.trim();
    let inner = if trimmed.starts_with('(') || trimmed.ends_with(')') {
        trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ParseError::MalformedLiteral(text.to_string()))?
    } else {
        trimmed
    };

    let semicolon_separated = inner.contains(';');
    let separator = if semicolon_separated { ';' } else { ',' };
    let parts: Vec<&str> = inner.split(separator).map(str::trim).collect();
    if parts.len() != 3 {
        return Err(ParseError::InvalidComponentCount(parts.len()).into());
    }

    let mut components = [0.0_f64; 3];
    for (slot, part) in components.iter_mut().zip(&parts) {
        let normalized = if semicolon_separated {
            part.replace(',', ".")
        } else {
            (*part).to_string()
        };
        let value: f64 = normalized
            .parse()
            .map_err(|_| ParseError::InvalidNumber((*part).to_string()))?;
        if !value.is_finite() {
            return Err(ParseError::InvalidNumber((*part).to_string()).into());
        }
        *slot = value;
    }
    Ok(components)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_default_separators() {
        let format = CoordinateFormat::DEFAULT;
        assert_eq!(format_components(1.25, -2.0, 0.5, &format), "(1.25, -2, 0.5)");
    }

    #[test]
    fn comma_decimal_switches_component_separator() {
        let format = CoordinateFormat {
            decimal_separator: ',',
        };
        assert_eq!(format.component_separator(), ';');
        assert_eq!(format_components(1.25, -2.0, 0.5, &format), "(1,25; -2; 0,5)");
    }

    #[test]
    fn parses_plain_and_parenthesized() {
        assert_eq!(parse_components("1, 2, 3").unwrap(), [1.0, 2.0, 3.0]);
        assert_eq!(parse_components("(1.5, -2, 3)").unwrap(), [1.5, -2.0, 3.0]);
        assert_eq!(parse_components("  (1, 2, 3)  ").unwrap(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn parses_semicolon_with_comma_decimals() {
        assert_eq!(parse_components("(1,25; -2; 0,5)").unwrap(), [1.25, -2.0, 0.5]);
        assert_eq!(parse_components("1; 2; 3").unwrap(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn rejects_malformed_literals() {
        assert!(parse_components("(1, 2, 3").is_err());
        assert!(parse_components("1, 2").is_err());
        assert!(parse_components("1, 2, 3, 4").is_err());
        assert!(parse_components("1, two, 3").is_err());
        assert!(parse_components("1, inf, 3").is_err());
        assert!(parse_components("1, NaN, 3").is_err());
    }
}
