//! Lexical coercion of raw cell text into numbers.
//!
//! One deterministic rule for the whole pipeline: a cell either yields a
//! finite number or zero. A malformed financial cell must never halt
//! ingestion of an otherwise-valid row, so the policy is fail-to-zero rather
//! than fail-to-error. Accounting-grade consumers would need a stricter
//! policy than this.

/// Sentinel tokens the spreadsheet emits for broken references.
const ERROR_SENTINELS: [&str; 2] = ["#N/A", "#REF!"];

/// Coerces arbitrary cell text into a definite number.
///
/// Sentinels and empty cells read as 0. Currency symbols, percent signs,
/// thousands separators, and whitespace are stripped before parsing. The
/// numeric prefix of the remainder is parsed, so `"1,234원"` reads as 1234
/// and `"12.5%"` as 12.5. Anything unparseable reads as 0. Never panics,
/// never returns NaN.
pub fn coerce(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() || ERROR_SENTINELS.contains(&trimmed) {
        return 0.0;
    }

    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, '₩' | '$' | ',' | '%') && !c.is_whitespace())
        .collect();

    match parse_float_prefix(&stripped) {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

/// Parses the longest leading float literal of `s`, tolerating trailing
/// non-numeric text (unit suffixes like "원" survive the symbol stripping).
fn parse_float_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        let frac_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        has_digits = has_digits || end > frac_start;
    }

    if !has_digits {
        return None;
    }

    // Exponent is only part of the literal when fully formed.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
