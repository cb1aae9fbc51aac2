//! Field rendering utilities for forms

use formstate::{InputKind, InputProps};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn field_block(label: &str, error: bool, is_active: bool) -> Block<'static> {
    let border_color = match (error, is_active) {
        (true, _) => Color::Red,
        (false, true) => Color::Cyan,
        (false, false) => Color::DarkGray,
    };
    let title = if error {
        format!(" {label} (invalid) ")
    } else {
        format!(" {label} ")
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}

/// Draw a single-value input from its generated props
pub fn draw_field(frame: &mut Frame, area: Rect, label: &str, props: &InputProps, is_active: bool) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let raw = match props.value.as_number() {
        Some(n) if n.is_nan() => String::new(),
        _ => props.value.display_value(),
    };
    let display_value = if props.kind == InputKind::Password {
        "•".repeat(raw.chars().count())
    } else {
        raw
    };
    let display_str = if display_value.is_empty() && !is_active {
        "(empty)".to_string()
    } else {
        display_value
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_str, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    frame.render_widget(
        content
            .wrap(Wrap { trim: false })
            .block(field_block(label, props.error, is_active)),
        area,
    );
}

/// Draw a radio group or checkbox group on one line.
/// `cursor` highlights the option that Space would toggle.
pub fn draw_choices(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    choices: &[InputProps],
    cursor: Option<usize>,
    is_active: bool,
) {
    let error = choices.iter().any(|props| props.error);
    let mut spans = Vec::new();

    for (index, props) in choices.iter().enumerate() {
        let checked = props.checked.unwrap_or(false);
        let marker = match (props.kind, checked) {
            (InputKind::Radio, true) => "(•)",
            (InputKind::Radio, false) => "( )",
            (_, true) => "[x]",
            (_, false) => "[ ]",
        };

        let mut style = if checked {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        if is_active && cursor == Some(index) {
            style = style.add_modifier(Modifier::REVERSED);
        }

        if index > 0 {
            spans.push(Span::raw("  "));
        }
        // Flag checkboxes have no option text
        let text = format!("{marker} {}", props.value.as_text());
        spans.push(Span::styled(text.trim_end().to_string(), style));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(field_block(label, error, is_active)),
        area,
    );
}
