//! Text helpers shared by point naming, serialization and slicing.
//!
//! The external simulator reads directives with a strict parser, so every
//! rendered value goes through [`format_value`].

/// Number of decimals used for every rendered coordinate.
pub const VALUE_PRECISION: usize = 3;

/// Render a coordinate value with fixed precision.
///
/// Negative zero is rendered as `0.000`.
pub fn format_value(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    let rendered = format!("{:.*}", VALUE_PRECISION, value);
    // Small negatives round to "-0.000"
    match rendered.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => rendered,
    }
}

/// Strip every character outside ASCII letters and digits.
pub fn sanitize(name: &str) -> String {
    name.chars().filter(char::is_ascii_alphanumeric).collect()
}
