use std::sync::LazyLock;

use regex::Regex;

static GROUPED_NUMBER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d{1,3}(,\d{3})+(\.\d+)?$").ok());

/// Strict numeric coercion: anything that is not a plain finite number,
/// including blanks and sentinels such as "N/A", becomes `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    finite(text.parse::<f64>().ok())
}

/// Like [`parse_number`], but also accepts well-formed thousands grouping
/// such as "1,234.5". Any other comma makes the value missing.
pub fn parse_grouped_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if !text.contains(',') {
        return parse_number(text);
    }

    match GROUPED_NUMBER.as_ref() {
        Some(re) if re.is_match(text) => parse_number(&text.replace(',', "")),
        _ => None,
    }
}

pub fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
