/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Rate color:
/// \>= 75 → green
/// \>= 40 → yellow
/// below → red
pub fn color_for_rate(value: i64) -> &'static str {
    if value >= 75 {
        GREEN
    } else if value >= 40 {
        YELLOW
    } else {
        RED
    }
}

