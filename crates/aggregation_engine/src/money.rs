//! Permissive parsing of user-typed currency and percentage strings.
//!
//! Values arrive exactly as the user left them in the box: "$ 1,200.00",
//! "5%", "" or plain junk. A bad value must never poison the totals for a
//! whole canvas, so every parse here is total and degrades to 0.0.

/// Currency symbols stripped from the front of a raw value.
const CURRENCY_SYMBOLS: [char; 3] = ['$', '\u{20AC}', '\u{00A3}'];

/// Parses a raw currency string, returning 0.0 for anything unusable.
///
/// Strips a leading currency symbol and thousands separators, then parses
/// the rest as a decimal. When the full string does not parse, falls back
/// to the longest leading number ("100abc" counts as 100, matching what the
/// editing layer always tolerated).
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim().trim_start_matches(|c| CURRENCY_SYMBOLS.contains(&c));
    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();

    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => leading_number(cleaned),
    }
}

/// Parses a raw percentage string ("5", "5%", "5.25") the same permissive
/// way, returning 0.0 for anything unusable.
pub fn parse_rate(raw: &str) -> f64 {
    parse_amount(raw.trim().trim_end_matches('%'))
}

/// Longest leading decimal number in `s`, or 0.0 if it does not start with
/// one. Accepts an optional sign and a single decimal point.
fn leading_number(s: &str) -> f64 {
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            '0'..='9' => seen_digit = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return 0.0;
    }
    s[..end].parse::<f64>().unwrap_or(0.0)
}

/// Formats a value as a US-dollar string with thousands grouping, e.g.
/// `$1,234.56`. Negative values come out as `-$1,234.56`.
pub fn format_usd(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();
    let rem = cents % 100;

    let mut grouped = String::new();
    for (i, c) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, rem)
}
