// src/normalize.rs
//! Raw price text -> canonical decimal. Single normalization choke point:
//! every strategy hands plain text here, whatever the source format.

use once_cell::sync::OnceCell;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ExtractError;

/// Keep only the lower bound of a ranged listing ("£20.00 to £30.00").
/// `to` counts when no letter touches it, so "£20.00to£30.00" splits too
/// but "stock" does not.
fn lower_bound(s: &str) -> &str {
    static RE_RANGE: OnceCell<Regex> = OnceCell::new();
    let re = RE_RANGE.get_or_init(|| {
        Regex::new(r"(?i)(?:^|[^a-z])(to)(?:[^a-z]|$)|(\s[-\x{2013}\x{2014}]\s)")
            .expect("static regex")
    });
    let cut = re
        .captures(s)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.start());
    match cut {
        Some(at) => &s[..at],
        None => s,
    }
}

fn drop_separators(s: &str) -> String {
    s.chars().filter(|c| *c != ',' && *c != '.').collect()
}

/// Resolve `,` vs `.`:
/// - both present: whichever comes last is the decimal separator ("1.234,56");
/// - comma only: a trailing group of one or two digits is a decimal comma
///   ("34,99"), otherwise commas group thousands ("1,299");
/// - dot only: left as is.
fn canonical_digits(s: &str) -> String {
    let kept: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();

    let decimal_at = match (kept.rfind('.'), kept.rfind(',')) {
        (Some(dot), Some(comma)) => Some(dot.max(comma)),
        (None, Some(comma)) if (1..=2).contains(&(kept.len() - comma - 1)) => Some(comma),
        (None, Some(_)) => None,
        (Some(_), None) | (None, None) => return kept,
    };
    match decimal_at {
        Some(pos) => format!(
            "{}.{}",
            drop_separators(&kept[..pos]),
            drop_separators(&kept[pos + 1..])
        ),
        None => drop_separators(&kept),
    }
}

/// Normalize locale-formatted price text into a decimal.
///
/// 1. decode HTML entities (`&pound;34.99`),
/// 2. keep the left side of a range,
/// 3. drop everything but digits and separators,
/// 4. parse.
pub fn normalize_price(raw: &str) -> Result<Decimal, ExtractError> {
    let decoded = html_escape::decode_html_entities(raw);
    let left = lower_bound(&decoded);
    let digits = canonical_digits(left);

    if digits.is_empty() {
        return Err(ExtractError::UnparsablePrice {
            raw: raw.to_string(),
        });
    }
    Decimal::from_str(&digits).map_err(|_| ExtractError::UnparsablePrice {
        raw: raw.to_string(),
    })
}
