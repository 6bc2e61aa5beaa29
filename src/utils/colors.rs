/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Net amount color:
/// \>0 → green
/// \<0 → red
/// 0 → reset
pub fn color_for_net(value: f64) -> &'static str {
    if value > 0.0 {
        GREEN
    } else if value < 0.0 {
        RED
    } else {
        RESET
    }
}

/// Efficiency above 100% means bad upstream data and is shown in red.
pub fn color_for_efficiency(pct: i64) -> &'static str {
    match pct {
        p if p > 100 => RED,
        p if p >= 75 => GREEN,
        p if p >= 50 => YELLOW,
        _ => GREY,
    }
}

/// Returns formatted grey text for empty placeholders ("--:--", "0 min", ...).
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty()
        || value.trim() == "--:--"
        || value.trim() == "00h 00m"
        || value.trim() == "--"
    {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
