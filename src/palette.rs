use std::fmt::Display;

/// ANSI colours for plain terminal output.
pub struct Palette;

impl Palette {
    pub const WARNING: &'static str = "\x1b[33m";
    pub const SUCCESS: &'static str = "\x1b[32m";
    pub const DANGER: &'static str = "\x1b[31m";

    const DIM: &'static str = "\x1b[2m";
    const BOLD: &'static str = "\x1b[1m";
    const RESET: &'static str = "\x1b[0m";

    pub fn paint(color: &str, text: impl Display) -> String {
        format!("{color}{text}{}", Self::RESET)
    }

    pub fn dim(text: impl Display) -> String {
        Self::paint(Self::DIM, text)
    }

    pub fn bold(text: impl Display) -> String {
        Self::paint(Self::BOLD, text)
    }
}
