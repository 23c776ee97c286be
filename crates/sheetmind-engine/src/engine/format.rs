/// Format a number for display.
///
/// Integral values print without a fractional part; everything else prints the
/// shortest decimal that round-trips. Formula results are always finite, since
/// evaluation reports overflow as an error.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // Also folds -0 into 0.
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// Text substituted for a number inside a formula before arithmetic
/// evaluation. Negative values are parenthesized so `2-A1` stays well formed.
pub(crate) fn format_operand(n: f64) -> String {
    if n < 0.0 {
        format!("({})", n)
    } else {
        format_number(n)
    }
}
