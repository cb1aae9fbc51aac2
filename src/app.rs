//! Application state and core logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use formstate::{
    AccessorOptions, FieldValue, Form, FormAccessor, FormContext, FormError, FormsConfig,
    InputEvent, InputKind, InputProps, Notification, SubmitEvent, SubmitOptions, SubmitOutcome,
    SubmitParams, SubmitReturn, ValidationResults, Validators,
};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

/// Name of the demo form in the shared context
pub const FORM_NAME: &str = "signup";

/// How a row is edited and rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Text(InputKind),
    Radio(&'static [&'static str]),
    Group(&'static [&'static str]),
    Checkbox,
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    pub label: &'static str,
    pub name: &'static str,
    pub kind: RowKind,
}

pub const ROWS: &[Row] = &[
    Row { label: "Name", name: "name", kind: RowKind::Text(InputKind::Text) },
    Row { label: "Email", name: "email", kind: RowKind::Text(InputKind::Email) },
    Row { label: "Password", name: "password", kind: RowKind::Text(InputKind::Password) },
    Row { label: "Confirm password", name: "confirm", kind: RowKind::Text(InputKind::Password) },
    Row { label: "Age", name: "age", kind: RowKind::Text(InputKind::Number) },
    Row { label: "Birthday (YYYY-MM-DD)", name: "birthday", kind: RowKind::Text(InputKind::Date) },
    Row { label: "Plan", name: "plan", kind: RowKind::Radio(&["free", "pro", "team"]) },
    Row { label: "Topics", name: "topics", kind: RowKind::Group(&["rust", "go", "zig"]) },
    Row { label: "Accept terms", name: "terms", kind: RowKind::Checkbox },
    Row { label: "Sign up", name: "", kind: RowKind::Submit },
];

/// Cross-field check that both password entries agree
pub const PASSWORDS_MATCH: &str = "passwordsMatch";

pub fn initial_form() -> Form {
    Form::new()
        .with("name", "")
        .with("email", "")
        .with("password", "")
        .with("confirm", "")
        .with("age", 18)
        .with("birthday", "")
        .with("plan", "free")
        .with("topics", Vec::<String>::new())
        .with("terms", false)
}

/// Profile fetched "later", replacing whatever was typed so far
pub fn sample_profile() -> Form {
    Form::new()
        .with("name", "Ada Lovelace")
        .with("email", "ada@analytical.engine")
        .with("password", "")
        .with("confirm", "")
        .with("age", 36)
        .with("birthday", "1815-12-10")
        .with("plan", "pro")
        .with("topics", vec!["rust"])
        .with("terms", false)
}

pub fn signup_validators() -> Validators {
    Validators::factory(|fields, submitting| {
        let email = fields.text("email");
        let password = fields.text("password");
        ValidationResults::new()
            .with("name", !submitting || !fields.text("name").trim().is_empty())
            .with("email", (!submitting && email.is_empty()) || email.contains('@'))
            .with("password", (!submitting && password.is_empty()) || password.len() >= 8)
            .with("confirm", true)
            .with("age", fields.number("age").is_some_and(|age| age >= 13.0))
            .with(
                "birthday",
                fields.text("birthday").is_empty() || fields.date("birthday").is_some(),
            )
            .with("plan", !fields.text("plan").is_empty())
            .with("topics", !submitting || !fields.list("topics").is_empty())
            .with("terms", !submitting || fields.flag("terms"))
            .with(PASSWORDS_MATCH, password == fields.text("confirm"))
    })
}

/// Pretend network call
pub fn submit_signup(params: SubmitParams) -> SubmitReturn {
    params.set_loading(true);
    SubmitReturn::pending(async move {
        tokio::time::sleep(Duration::from_millis(800)).await;
        params.set_loading(false);

        let email = params.fields.text("email");
        if email.ends_with("@example.com") {
            params
                .notify
                .error(Some(format!("{email} is already registered")))?;
            return Ok(());
        }

        tracing::info!(
            form = params.name.as_deref().unwrap_or_default(),
            fields = %serde_json::to_string(&params.fields)?,
            "signed up"
        );
        params.notify.success()?;
        Ok(())
    })
}

/// Main application struct
pub struct App<'ctx> {
    pub form: FormAccessor<'ctx>,
    /// Focused row in `ROWS`
    pub focus: usize,
    /// Highlighted option within a radio or checkbox group row
    pub option_cursor: usize,
    pub status_message: Option<String>,
    notifications: UnboundedReceiver<Notification>,
    quit: bool,
}

impl<'ctx> App<'ctx> {
    pub fn new(ctx: &'ctx FormContext, notifications: UnboundedReceiver<Notification>) -> Result<Self> {
        let form = FormAccessor::bind(ctx, AccessorOptions::named(FORM_NAME))?;
        Ok(Self {
            form,
            focus: 0,
            option_cursor: 0,
            status_message: None,
            notifications,
            quit: false,
        })
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn current_row(&self) -> &'static Row {
        &ROWS[self.focus]
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % ROWS.len();
        self.option_cursor = 0;
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.checked_sub(1).unwrap_or(ROWS.len() - 1);
        self.option_cursor = 0;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let row = self.current_row();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.prev_field(),
            KeyCode::Char('s') if ctrl => self.save_draft(),
            KeyCode::Char('l') if ctrl => self.load_profile(),
            KeyCode::Enter if row.kind == RowKind::Submit => self.submit(),
            KeyCode::Enter => self.next_field(),
            _ => self.edit_row(row, key.code),
        }
        Ok(())
    }

    fn edit_row(&mut self, row: &'static Row, code: KeyCode) {
        match (row.kind, code) {
            (RowKind::Text(_), KeyCode::Char(c)) => self.edit_text(row, |value| value.push(c)),
            (RowKind::Text(_), KeyCode::Backspace) => self.edit_text(row, |value| {
                value.pop();
            }),
            (RowKind::Radio(options), KeyCode::Left | KeyCode::Right) => {
                let current = self.form.fields().value(row.name).map(FieldValue::display_value);
                let index = options
                    .iter()
                    .position(|option| Some(*option) == current.as_deref())
                    .unwrap_or(0);
                let next = step(index, options.len(), code == KeyCode::Right);
                let event = self.form.inputs().radio(row.name, options[next]).toggle(true);
                self.change(&event, None);
            }
            (RowKind::Group(options), KeyCode::Left | KeyCode::Right) => {
                self.option_cursor = step(self.option_cursor, options.len(), code == KeyCode::Right);
            }
            (RowKind::Group(options), KeyCode::Char(' ')) => {
                let props = self.form.inputs().checkbox_option(row.name, options[self.option_cursor]);
                self.toggle(&props);
            }
            (RowKind::Checkbox, KeyCode::Char(' ')) => {
                let props = self.form.inputs().checkbox(row.name);
                self.toggle(&props);
            }
            _ => {}
        }
    }

    fn edit_text(&mut self, row: &Row, edit: impl FnOnce(&mut String)) {
        let mut value = match self.form.fields().value(row.name) {
            Some(FieldValue::Number(n)) if n.is_nan() => String::new(),
            Some(value) => value.display_value(),
            None => String::new(),
        };
        edit(&mut value);

        let event = self.form.inputs().input(input_kind(row), row.name, Default::default()).change(value);
        let validations = match row.name {
            "password" | "confirm" => Some(vec![row.name.to_string(), PASSWORDS_MATCH.to_string()]),
            _ => None,
        };
        self.change(&event, validations.as_deref());
    }

    fn toggle(&mut self, props: &InputProps) {
        let event = props.toggle(!props.checked.unwrap_or(false));
        self.change(&event, None);
    }

    fn change(&mut self, event: &InputEvent, validations: Option<&[String]>) {
        if let Err(err) = self.form.apply_input_event(event, validations) {
            self.report(err);
        }
    }

    pub fn submit(&mut self) {
        if self.form.loading() {
            self.status_message = Some("Already submitting".to_string());
            return;
        }

        let mut event = SubmitEvent::default();
        match self.form.handle_submit(Some(&mut event), SubmitOptions::default()) {
            Ok(SubmitOutcome::Submitted(returned)) => {
                if let Some(work) = returned.into_future() {
                    tokio::spawn(async move {
                        if let Err(err) = work.await {
                            tracing::error!("submit failed: {err:?}");
                        }
                    });
                }
                self.status_message = Some("Submitting...".to_string());
            }
            Ok(SubmitOutcome::Blocked { failing }) => {
                tracing::debug!(?failing, "submit blocked");
            }
            Err(err) => self.report(err),
        }
    }

    /// Store the current values as the initial state for the next run
    pub fn save_draft(&mut self) {
        match FormsConfig::config_path() {
            Some(path) => self.save_draft_to(&path),
            None => self.status_message = Some("No config directory for drafts".to_string()),
        }
    }

    /// Failures are reported in the status bar; the UI keeps running
    pub fn save_draft_to(&mut self, path: &Path) {
        match self.write_draft(path) {
            Ok(()) => self.status_message = Some("Draft saved".to_string()),
            Err(err) => {
                tracing::error!(path = %path.display(), "saving draft failed: {err:?}");
                self.status_message = Some(format!("Draft not saved: {err}"));
            }
        }
    }

    fn write_draft(&self, path: &Path) -> Result<()> {
        let mut config = FormsConfig::load_from(path)?;
        config
            .initial_states
            .insert(FORM_NAME.to_string(), self.form.form());
        config.save_to(path)
    }

    pub fn load_profile(&mut self) {
        self.status_message = if self.form.set_initial_state(sample_profile()) {
            Some("Profile loaded".to_string())
        } else {
            Some("Profile unchanged".to_string())
        };
    }

    /// Turn queued notifications into status messages
    pub fn drain_notifications(&mut self) {
        while let Ok(notification) = self.notifications.try_recv() {
            self.status_message = Some(match notification {
                Notification::ValidationErrors(keys) => format!("Please check: {}", keys.join(", ")),
                Notification::SubmitError(reason) => {
                    format!("Sign-up failed: {}", reason.as_deref().unwrap_or("unknown error"))
                }
                Notification::SubmitSuccess => "Signed up!".to_string(),
            });
        }
    }

    fn report(&mut self, err: FormError) {
        tracing::error!("{err}");
        self.status_message = Some(err.to_string());
    }
}

fn input_kind(row: &Row) -> InputKind {
    match row.kind {
        RowKind::Text(kind) => kind,
        RowKind::Radio(_) => InputKind::Radio,
        RowKind::Group(_) | RowKind::Checkbox => InputKind::Checkbox,
        RowKind::Submit => InputKind::Submit,
    }
}

fn step(index: usize, len: usize, forward: bool) -> usize {
    if forward {
        (index + 1) % len
    } else {
        index.checked_sub(1).unwrap_or(len - 1)
    }
}
