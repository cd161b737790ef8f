//! Normalization of heterogeneous date tokens into canonical period keys.
//!
//! The tracker sheet has been hand-edited for years and carries at least four
//! date spellings. Everything downstream keys on the canonical `YYYY-MM`
//! form, whose lexicographic order is chronological order.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `YYYY.MM.DD` with an optional trailing dot.
    static ref DOTTED_YMD: Regex = Regex::new(r"^(\d{4})\.(\d{1,2})\.(\d{1,2})\.?$")
        .expect("Invalid dotted date regex pattern");

    /// `YYYY-MM-DD` or `YYYY/MM/DD`.
    static ref ISO_YMD: Regex = Regex::new(r"^(\d{4})[-/](\d{1,2})[-/](\d{1,2})$")
        .expect("Invalid ISO date regex pattern");

    /// `MM/DD/YYYY`.
    static ref US_MDY: Regex = Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$")
        .expect("Invalid US date regex pattern");

    /// `YY/MM`, two-digit year assumed to be in the 2000s.
    static ref SHORT_YM: Regex = Regex::new(r"^(\d{2})/(\d{1,2})$")
        .expect("Invalid short date regex pattern");
}

/// Converts a date-like token into a canonical `YYYY-MM` period key.
///
/// All whitespace is removed first, tolerating accidental spaces such as
/// `"19/ 07"`. The four recognized patterns are tried in order and the first
/// match wins; the month component is always zero-padded. `None` means "this
/// cell is not a date" and callers are expected to keep scanning.
pub fn normalize_period(token: &str) -> Option<String> {
    let compact: String = token.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    if let Some(caps) = DOTTED_YMD.captures(&compact) {
        return Some(format_key(&caps[1], &caps[2]));
    }
    if let Some(caps) = ISO_YMD.captures(&compact) {
        return Some(format_key(&caps[1], &caps[2]));
    }
    if let Some(caps) = US_MDY.captures(&compact) {
        return Some(format_key(&caps[3], &caps[1]));
    }
    if let Some(caps) = SHORT_YM.captures(&compact) {
        let year = 2000
            + caps[1]
                .parse::<u32>()
                .expect("two-digit capture is always numeric");
        return Some(format_key(&year.to_string(), &caps[2]));
    }

    None
}

/// Extracts the `YYYY` year component of a period key.
pub fn year_of(period: &str) -> &str {
    &period[..period.len().min(4)]
}

fn format_key(year: &str, month: &str) -> String {
    format!("{}-{:0>2}", year, month)
}
