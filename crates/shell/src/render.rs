//! Terminal rendering of command output

use crossterm::style::{Color, Stylize};

use cmdtask_core::{Message, Output, Style};

const COFFEE: Color = Color::Rgb {
    r: 180,
    g: 83,
    b: 9,
};

/// Apply a message's style for the terminal
pub fn paint(message: &Message, color: bool) -> String {
    let text = message.text.as_str();
    if !color {
        return text.to_string();
    }

    match message.style {
        Style::Success => text.green().to_string(),
        Style::Warn => text.yellow().to_string(),
        Style::Danger => text.red().to_string(),
        Style::Muted => text.dark_grey().italic().to_string(),
        Style::Complete => text.dark_grey().to_string(),
        Style::Info => text.blue().to_string(),
        Style::Coffee => text.with(COFFEE).to_string(),
        Style::Plain => text.to_string(),
    }
}

/// Printable lines for an output
pub fn render(output: &Output, color: bool) -> Vec<String> {
    output
        .lines()
        .iter()
        .map(|message| paint(message, color))
        .collect()
}
