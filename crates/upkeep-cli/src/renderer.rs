//! Terminal output for the markdown produced by the core display types.
//!
//! Rich mode styles headers and inline markdown with termimad. Plain mode
//! (`--no-color`) prints the markdown untouched, which keeps output stable for
//! scripts and cron mail.

use anyhow::Result;
use termimad::{MadSkin, crossterm::style::Color};

const HEADER_COLOR: &str = "\x1b[34m";
const FAILURE_COLOR: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Renders markdown either through termimad or as plain text.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            // Headers keep their hash marks so ids stay visible
            if line.starts_with('#') {
                println!("{HEADER_COLOR}{line}{RESET}");
            } else if line.starts_with("Error:") {
                println!("{FAILURE_COLOR}{line}{RESET}");
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_color_disables_rich_output() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
        assert!(renderer.render("# 1. Pump check\n").is_ok());
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.rich_enabled);
        assert!(renderer.render("Error: Plan 3 not found\n").is_ok());
    }
}
