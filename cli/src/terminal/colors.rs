use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const SECONDARY: Color = Color::Cyan;
pub const ACCENT: Color = Color::BrightYellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const MAC_ADDR: Color = Color::Yellow;
pub const VENDOR: Color = Color::Magenta;
pub const IPV4_ADDR: Color = Color::BrightBlue;
pub const IPV4_PREFIX: Color = Color::Blue;
pub const IPV6_ADDR: Color = Color::BrightCyan;
pub const IPV6_PREFIX: Color = Color::Cyan;

pub const STATE_UP: Color = Color::Green;
pub const STATE_DOWN: Color = Color::Red;
pub const STATE_UNKNOWN: Color = Color::Yellow;
