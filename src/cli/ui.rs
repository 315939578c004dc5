//! Unified CLI UI components for consistent, polished output
//!
//! Inspired by: cargo, ripgrep, bat, fd

/// ANSI color codes for terminal styling
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const GREEN: &str = "\x1b[32m";
    pub const BRIGHT_GREEN: &str = "\x1b[92m";
    pub const BRIGHT_CYAN: &str = "\x1b[96m";
    pub const BRIGHT_RED: &str = "\x1b[91m";
}

/// Check if colors should be enabled
pub fn colors_enabled() -> bool {
    // Respect NO_COLOR and TERM conventions
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
        return false;
    }
    // Check if stderr is a terminal
    atty::is(atty::Stream::Stderr)
}

/// Status line printer with consistent formatting
/// Inspired by cargo's output style: `   Compiling foo v0.1.0`
pub struct StatusPrinter {
    use_colors: bool,
}

impl StatusPrinter {
    pub fn new() -> Self {
        Self {
            use_colors: colors_enabled(),
        }
    }

    fn styled(&self, color: &str, bold: bool, text: &str) -> String {
        if self.use_colors {
            let bold_code = if bold { colors::BOLD } else { "" };
            format!("{}{}{}{}", bold_code, color, text, colors::RESET)
        } else {
            text.to_string()
        }
    }

    /// Print a status line: `    Checking  tfplan.json`
    pub fn status(&self, keyword: &str, message: &str) {
        let keyword_styled = self.styled(colors::BRIGHT_GREEN, true, &format!("{:>12}", keyword));
        eprintln!("{} {}", keyword_styled, message);
    }

    /// Print an info line
    pub fn info(&self, keyword: &str, message: &str) {
        let keyword_styled = self.styled(colors::BRIGHT_CYAN, true, &format!("{:>12}", keyword));
        eprintln!("{} {}", keyword_styled, message);
    }

    /// Print an error line
    pub fn error(&self, keyword: &str, message: &str) {
        let keyword_styled = self.styled(colors::BRIGHT_RED, true, &format!("{:>12}", keyword));
        eprintln!("{} {}", keyword_styled, message);
    }

    /// Print a success line
    pub fn success(&self, keyword: &str, message: &str) {
        let keyword_styled = self.styled(colors::GREEN, true, &format!("{:>12}", keyword));
        eprintln!("{} {}", keyword_styled, message);
    }

    /// Print a dim/secondary info line
    pub fn dim(&self, message: &str) {
        let msg = if self.use_colors {
            format!("{}{}{}", colors::DIM, message, colors::RESET)
        } else {
            message.to_string()
        };
        eprintln!("             {}", msg);
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        let key_styled = self.styled(colors::DIM, false, key);
        eprintln!("  {}: {}", key_styled, value);
    }
}

impl Default for StatusPrinter {
    fn default() -> Self {
        Self::new()
    }
}
