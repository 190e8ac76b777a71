//! Scalar display formatters.
//!
//! Three pure functions, one per value class. Their exact output is part
//! of the contract: tests pin truncation length, the percent `".0"`
//! replacement (including its known quirks), and the one-digit rounding.

/// Truncate a string value for display.
///
/// Anything longer than 12 characters becomes its first 12 characters plus
/// a literal `"..."` (15 characters total); shorter strings pass through.
pub fn str_output(value: &str) -> String {
    if value.chars().count() > 12 {
        let head: String = value.chars().take(12).collect();
        format!("{}...", head)
    } else {
        value.to_string()
    }
}

/// Render a cocoa fraction as a percentage.
///
/// The fraction is scaled to a percentage and printed with a trailing
/// `.0` when integral, then every `".0"` substring becomes `"%"`:
/// `0.70` -> `"70.0"` -> `"70%"`, while `0.655` -> `"65.5"` keeps no sign
/// at all. A value like `10.05` would collapse to `"10%5"`; that quirk is
/// part of the fixed output contract and intentionally not fixed.
pub fn percent_output(fraction: f64) -> String {
    let percent = fraction * 100.0;
    let text = if percent.fract() == 0.0 {
        format!("{:.1}", percent)
    } else {
        format!("{}", percent)
    };
    text.replace(".0", "%")
}

/// Render a rating with exactly one digit after the decimal point.
pub fn digits_output(value: f64) -> String {
    format!("{:.1}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_output_short_unchanged() {
        assert_eq!(str_output("Soma"), "Soma");
        // Exactly 12 characters passes through
        assert_eq!(str_output("abcdefghijkl"), "abcdefghijkl");
    }

    #[test]
    fn test_str_output_truncates_beyond_12() {
        // 13 characters: first 12 plus "..."
        assert_eq!(str_output("abcdefghijklm"), "abcdefghijkl...");
        assert_eq!(str_output("abcdefghijklm").chars().count(), 15);
        assert_eq!(
            str_output("Scharffen Berger"),
            "Scharffen Be..."
        );
    }

    #[test]
    fn test_percent_output_integral() {
        assert_eq!(percent_output(0.70), "70%");
        assert_eq!(percent_output(0.60), "60%");
        assert_eq!(percent_output(1.0), "100%");
    }

    #[test]
    fn test_percent_output_fractional_unchanged() {
        assert_eq!(percent_output(0.655), "65.5");
    }

    #[test]
    fn test_percent_output_idempotent_without_point_zero() {
        let once = percent_output(0.655);
        assert_eq!(once.replace(".0", "%"), once);
    }

    #[test]
    fn test_digits_output() {
        assert_eq!(digits_output(3.0), "3.0");
        assert_eq!(digits_output(3.5), "3.5");
        // Rust's one-digit rendering resolves the 3.25 tie downwards
        assert_eq!(digits_output(3.25), "3.2");
    }
}
