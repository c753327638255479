use owo_colors::OwoColorize;
use termimad::MadSkin;

/// Standard output formatting for the CLI
pub struct Output {
    skin: MadSkin,
}

impl Output {
    pub fn new() -> Self {
        let mut skin = MadSkin::default();
        // Keep it simple for copy-paste friendliness
        skin.set_headers_fg(termimad::ansi(6)); // cyan
        skin.bold.set_fg(termimad::ansi(15)); // bright white
        skin.inline_code.set_fg(termimad::ansi(11)); // bright yellow

        // Rendered tool results are mostly JSON code blocks
        skin.code_block.set_fg(termimad::ansi(15));

        Self { skin }
    }

    /// Print markdown produced by a tool renderer
    pub fn markdown(&self, content: &str) {
        self.skin.print_text(content);
    }

    /// Print an informational message (indented)
    pub fn info(&self, label: &str, value: &str) {
        println!("  {} {}", label.bright_blue(), value);
    }

    /// Print a success message (indented)
    pub fn success(&self, message: &str) {
        println!("  {} {}", "✓".bright_green(), message);
    }

    /// Print an error message (indented)
    pub fn error(&self, message: &str) {
        println!("  {} {}", "✗".bright_red(), message);
    }

    /// Print a warning message (indented)
    pub fn warning(&self, message: &str) {
        println!("  {} {}", "⚠".yellow(), message);
    }

    /// Print a section header
    pub fn section(&self, title: &str) {
        println!();
        println!("{}", title.bright_cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
    }

    /// Print a list item (already indented)
    pub fn list_item(&self, item: &str) {
        println!("    • {}", item);
    }

    /// Print a key-value pair (indented)
    pub fn kv(&self, key: &str, value: &str) {
        println!("  {} {}", format!("{}:", key).dimmed(), value);
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a duration in milliseconds with two decimals
pub fn format_millis(duration: std::time::Duration) -> String {
    format!("{:.2} ms", duration.as_secs_f64() * 1000.0)
}
