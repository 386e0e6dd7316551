//! Output formatting for the CLI.
//!
//! Every helper returns a `String`; the menu decides where it is written.

use console::{Style, StyledObject};

/// Width of header borders.
const BORDER_WIDTH: usize = 50;

/// Styling palette, with color forced on or off from configuration.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint<'a>(&self, style: Style, text: &'a str) -> StyledObject<&'a str> {
        style.force_styling(self.color).apply_to(text)
    }

    /// Blue text: numbering, borders, confirmations.
    pub fn accent(&self, text: &str) -> String {
        self.paint(Style::new().color256(39), text).to_string()
    }

    /// Yellow text: prompts and warnings.
    pub fn highlight(&self, text: &str) -> String {
        self.paint(Style::new().color256(220), text).to_string()
    }

    /// Bold text.
    pub fn bold(&self, text: &str) -> String {
        self.paint(Style::new().bold(), text).to_string()
    }

    /// A centered title between two `=` borders.
    pub fn header(&self, text: &str) -> String {
        let border = "=".repeat(BORDER_WIDTH);
        let title = format!("{:^width$}", text, width = BORDER_WIDTH);
        format!(
            "{}\n{}\n{}",
            self.accent(&border),
            self.paint(Style::new().color256(39).bold(), &title),
            self.accent(&border)
        )
    }

    /// The banner shown above the main menu.
    pub fn banner(&self, store_name: &str) -> String {
        self.header(&store_name.to_uppercase())
    }

    /// A numbered menu or list entry: `3. text`.
    pub fn numbered(&self, number: usize, text: &str) -> String {
        format!("{} {}", self.accent(&format!("{number}.")), text)
    }
}
