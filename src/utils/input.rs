//! Lenient parsing of form-style text fields.

use regex::Regex;
use std::sync::OnceLock;

fn leading_int() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid regex"))
}

/// Integer prefix of `s` (`"12abc"` → 12), or 0 when there is none.
/// Values beyond the i64 range saturate.
pub fn parse_int_or_zero(s: &str) -> i64 {
    let Some(caps) = leading_int().captures(s) else {
        return 0;
    };
    let digits = &caps[1];

    digits.parse::<i64>().unwrap_or_else(|_| {
        if digits.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}
