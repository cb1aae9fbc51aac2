//! Submit button with an in-place loading indicator

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// What the submit trigger shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitButton<'a> {
    Ready(&'a str),
    /// A submit is in flight; `tick` advances the spinner
    Loading { label: &'a str, tick: usize },
}

impl SubmitButton<'_> {
    fn text(&self) -> String {
        match self {
            SubmitButton::Ready(label) => format!(" {label} "),
            SubmitButton::Loading { label, tick } => {
                format!(" {} {label} ", SPINNER[tick % SPINNER.len()])
            }
        }
    }

    fn is_loading(&self) -> bool {
        matches!(self, SubmitButton::Loading { .. })
    }
}

/// Render the submit trigger; it reads as disabled while loading
pub fn render_submit_button(frame: &mut Frame, area: Rect, button: SubmitButton<'_>, is_selected: bool) {
    let (border_style, text_style) = match (button.is_loading(), is_selected) {
        (true, _) => (
            Style::default().fg(Color::Yellow),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        ),
        (false, true) => (
            Style::default().fg(Color::Cyan),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        (false, false) => (Style::default().fg(Color::DarkGray), Style::default()),
    };

    let mut block = Block::default().borders(Borders::ALL).border_style(border_style);
    if button.is_loading() {
        block = block.title(" submitting ");
    }

    let paragraph = Paragraph::new(button.text())
        .style(text_style)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}
