/// ANSI color helper utilities for terminal output.
use crate::models::tier::Tier;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Clock color for a tier:
/// normal → default, warning → yellow, urgent → red
pub fn color_for_tier(tier: Tier) -> &'static str {
    match tier {
        Tier::Normal => RESET,
        Tier::Warning => YELLOW,
        Tier::Urgent => RED,
    }
}

/// Returns GREY for "Not Set" style placeholders, RESET otherwise.
pub fn color_for_optional_field(value: &str) -> &'static str {
    match value.trim() {
        "" | "Not Set" | "Invalid Date" => GREY,
        _ => RESET,
    }
}

pub fn colorize_tier(text: &str, tier: Tier) -> String {
    format!("{BOLD}{}{text}{RESET}", color_for_tier(tier))
}
