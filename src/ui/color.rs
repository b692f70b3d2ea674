//! Terminal styling for dashboard text output

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";

    pub const GREEN: &'static str = "\x1b[32m";
    pub const CYAN: &'static str = "\x1b[36m";

    pub const BRIGHT_BLUE: &'static str = "\x1b[94m";
    pub const BRIGHT_YELLOW: &'static str = "\x1b[93m";
}

/// What a piece of dashboard text is, which decides how it is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Title,
    Caption,
    Notice,
    Heading,
    Bar,
    Name,
}

impl Role {
    pub fn color(self) -> &'static str {
        match self {
            Role::Title => Colors::BRIGHT_BLUE,
            Role::Caption => Colors::DIM,
            Role::Notice => Colors::BRIGHT_YELLOW,
            Role::Heading => Colors::BOLD,
            Role::Bar => Colors::CYAN,
            Role::Name => Colors::GREEN,
        }
    }
}

/// Paint text for its role if the terminal supports it
pub fn paint(text: &str, role: Role) -> String {
    colorize(text, role.color())
}

/// Apply color to text if terminal supports it
pub fn colorize(text: &str, color: &str) -> String {
    if supports_formatting() {
        format!("{color}{text}{}", Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Prefix text with an emoji if terminal supports it
pub fn with_emoji(emoji: &str, text: &str) -> String {
    if supports_formatting() {
        format!("{emoji} {text}")
    } else {
        text.to_string()
    }
}

/// Whether stdout gets colors and emojis.
///
/// `NO_COLOR` or `FORCE_COLOR=0` turn formatting off, any other
/// `FORCE_COLOR` turns it on. Otherwise only an interactive, non-dumb
/// terminal gets it.
pub fn supports_formatting() -> bool {
    use std::env;
    use std::io::IsTerminal;

    if env::var("NO_COLOR").is_ok() || env::var("FORCE_COLOR").as_deref() == Ok("0") {
        return false;
    }
    if env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Keep test output plain
    if cfg!(test) || env::var("RUST_TEST_TIME_UNIT").is_ok() {
        return false;
    }

    if !std::io::stdout().is_terminal() {
        return false;
    }

    match env::var("TERM") {
        Ok(term) => !(term == "dumb" || term.is_empty()),
        Err(_) => env::var("TERM_PROGRAM").is_ok(),
    }
}
