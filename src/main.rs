//! formstate demo - a terminal sign-up form
//!
//! A Ratatui host that drives one form entirely through the formstate API:
//! typed input becomes input events, Enter submits, and pending submit work
//! runs on the tokio runtime.

mod app;
mod ui;

use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use formstate::{FormContext, FormsConfig, Notification};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formstate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = FormsConfig::load()?;
    let (tx, rx) = mpsc::unbounded_channel();
    let ctx = FormContext::builder()
        .form(app::FORM_NAME, app::initial_form())
        .config(config)
        .validators_for(app::FORM_NAME, app::signup_validators())
        .on_submit(app::submit_signup)
        .on_notify(move |notification: Notification| {
            let _ = tx.send(notification);
        })
        .build();
    ctx.subscribe(|event| tracing::debug!(form = event.form_name(), ?event, "store updated"));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let result = match App::new(&ctx, rx) {
        Ok(mut app) => run_app(&mut terminal, &mut app).await,
        Err(err) => Err(err),
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App<'_>,
) -> Result<()> {
    let mut tick = 0usize;
    loop {
        app.drain_notifications();
        terminal.draw(|frame| ui::draw(frame, app, tick))?;

        // Faster polling while a submit is in flight so the spinner moves
        let poll_duration = if app.form.loading() {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_duration)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }
                    app.handle_key(key)?;
                }
            }
        }

        tick = tick.wrapping_add(1);

        if app.should_quit() {
            return Ok(());
        }
    }
}
