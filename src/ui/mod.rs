//! UI module for rendering the TUI

mod button;
mod field_renderer;

use crate::app::{App, RowKind, ROWS};
use button::{render_submit_button, SubmitButton, BUTTON_HEIGHT};
use field_renderer::{draw_choices, draw_field};
use formstate::{InputOptions, InputProps};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const ROW_HEIGHT: u16 = 3;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App<'_>, tick: usize) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(30), // Action panel
        ])
        .split(chunks[0]);

    draw_form(frame, main_chunks[0], app);
    draw_action_panel(frame, main_chunks[1], app, tick);
    draw_status_bar(frame, chunks[1], app);
}

/// Draw the form fields
fn draw_form(frame: &mut Frame, area: Rect, app: &App<'_>) {
    let block = Block::default()
        .title(" Sign up ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let rows: Vec<_> = ROWS
        .iter()
        .enumerate()
        .filter(|(_, row)| row.kind != RowKind::Submit)
        .collect();
    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            rows.iter()
                .map(|_| Constraint::Length(ROW_HEIGHT))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .margin(1)
        .split(area);

    let inputs = app.form.inputs();
    for ((index, row), area) in rows.into_iter().zip(areas.iter()) {
        let is_active = app.focus == index;
        match row.kind {
            RowKind::Text(kind) => {
                let props = inputs.input(kind, row.name, InputOptions::default());
                draw_field(frame, *area, row.label, &props, is_active);
            }
            RowKind::Radio(options) => {
                let choices: Vec<InputProps> = options
                    .iter()
                    .map(|option| inputs.radio(row.name, option))
                    .collect();
                draw_choices(frame, *area, row.label, &choices, None, is_active);
            }
            RowKind::Group(options) => {
                let choices: Vec<InputProps> = options
                    .iter()
                    .map(|option| inputs.checkbox_option(row.name, option))
                    .collect();
                draw_choices(frame, *area, row.label, &choices, Some(app.option_cursor), is_active);
            }
            RowKind::Checkbox => {
                let choices = [inputs.checkbox(row.name)];
                draw_choices(frame, *area, row.label, &choices, Some(0), is_active);
            }
            RowKind::Submit => {}
        }
    }
}

/// Draw submit button, loading state and failing validation keys
fn draw_action_panel(frame: &mut Frame, area: Rect, app: &App<'_>, tick: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .margin(1)
        .split(area);

    let submit_index = ROWS.len() - 1;
    let button = if app.form.loading() {
        SubmitButton::Loading {
            label: "Signing up",
            tick,
        }
    } else {
        SubmitButton::Ready(ROWS[submit_index].label)
    };
    render_submit_button(frame, chunks[0], button, app.focus == submit_index);

    let phase = Paragraph::new(Span::styled(
        format!(" phase: {:?}", app.form.phase()),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(phase, chunks[1]);

    let failing = app.form.errors().failing();
    let lines: Vec<Line> = if failing.is_empty() {
        vec![Line::from(Span::styled(
            "No errors",
            Style::default().fg(Color::Green),
        ))]
    } else {
        failing
            .iter()
            .map(|key| Line::from(Span::styled(format!("✗ {key}"), Style::default().fg(Color::Red))))
            .collect()
    };
    let errors = Paragraph::new(lines).block(
        Block::default()
            .title(" Errors ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(errors, chunks[2]);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App<'_>) {
    let mut spans = vec![Span::styled(
        " Tab:next  ←/→:choose  Space:toggle  Enter:submit  ^S:save draft  ^L:load profile  Esc:quit ",
        Style::default().fg(Color::Gray),
    )];
    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}
