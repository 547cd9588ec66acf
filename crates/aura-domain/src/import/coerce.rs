//! Cell-to-field type coercion for imported rows.

use crate::lead::{sanitize_value, LeadStatus};

/// Turn a money-ish cell into a deal value.
///
/// Everything except digits, `.` and `-` is stripped, then the longest
/// numeric prefix is parsed. Anything unparseable, negative or non-finite
/// becomes `0`.
pub fn coerce_value(raw: &str) -> f64 {
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    parse_float_prefix(&stripped).map(sanitize_value).unwrap_or(0.0)
}

/// Parse the longest leading `-?digits[.digits]` run, ignoring trailing junk
/// such as a second decimal point.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    let mut digits = 0;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if digits == 0 {
        return None;
    }
    s[..end].parse::<f64>().ok()
}

/// Match a status cell case-insensitively; anything else starts as `New`.
pub fn coerce_status(raw: &str) -> LeadStatus {
    raw.parse::<LeadStatus>().unwrap_or(LeadStatus::New)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_formatting_is_stripped() {
        assert_eq!(coerce_value("$1,234.56"), 1234.56);
        assert_eq!(coerce_value("USD 12 500"), 12500.0);
        assert_eq!(coerce_value("€45"), 45.0);
    }

    #[test]
    fn test_unparseable_values_become_zero() {
        assert_eq!(coerce_value("abc"), 0.0);
        assert_eq!(coerce_value(""), 0.0);
        assert_eq!(coerce_value("-"), 0.0);
        assert_eq!(coerce_value("."), 0.0);
        assert_eq!(coerce_value("--5"), 0.0);
    }

    #[test]
    fn test_negative_values_are_clamped() {
        assert_eq!(coerce_value("-250"), 0.0);
    }

    #[test]
    fn test_prefix_parsing() {
        assert_eq!(parse_float_prefix("1.2.3"), Some(1.2));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("7."), Some(7.0));
        assert_eq!(parse_float_prefix("12-3"), Some(12.0));
        assert_eq!(parse_float_prefix("-3.5"), Some(-3.5));
        assert_eq!(parse_float_prefix(""), None);
    }

    #[test]
    fn test_status_coercion() {
        assert_eq!(coerce_status("won"), LeadStatus::Won);
        assert_eq!(coerce_status(" Proposal "), LeadStatus::Proposal);
        assert_eq!(coerce_status("Closed Won"), LeadStatus::New);
        assert_eq!(coerce_status(""), LeadStatus::New);
    }
}
