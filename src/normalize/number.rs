//! Locale-aware parsing of measurement values.

use std::borrow::Cow;

/// Cell contents the portal uses for "no measurement".
const MISSING_TOKENS: [&str; 3] = ["-", "n.a.", "NaN"];

/// Parse a value cell, returning `None` for missing or unparseable text.
///
/// Accepts German decimal commas (`12,5`) with optional thousands dots
/// (`1.234,5`) as well as plain decimal dots (`1.234` stays `1.234`).
pub fn parse_number(raw: &str) -> Option<f64> {
    let text = raw.trim();
    if text.is_empty() || MISSING_TOKENS.contains(&text) {
        return None;
    }

    normalize_decimal(text)
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Rewrite a comma-decimal number into the form `f64::from_str` expects.
fn normalize_decimal(text: &str) -> Cow<'_, str> {
    let Some(comma) = text.find(',') else {
        return Cow::Borrowed(text);
    };

    // Dots in front of the decimal comma group thousands.
    let dots_group_thousands = text.rfind('.').is_none_or(|dot| dot < comma);
    if dots_group_thousands {
        Cow::Owned(text.replace('.', "").replace(',', "."))
    } else {
        Cow::Owned(text.replace(',', "."))
    }
}
