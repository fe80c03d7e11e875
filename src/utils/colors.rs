/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Net pay color: negative (deductions exceed gross) in red.
pub fn color_for_net(value: rust_decimal::Decimal) -> &'static str {
    if value.is_sign_negative() && !value.is_zero() {
        RED
    } else {
        GREEN
    }
}
