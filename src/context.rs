//! Shared context holding every named form of an application scope
//!
//! A `FormContext` is constructed once by the application root and passed by
//! reference to every accessor that needs it. All reads and writes go
//! through its methods; observers subscribe for change events instead of
//! relying on an ambient re-render.

use crate::config::FormsConfig;
use crate::error::ErrorMode;
use crate::handlers::{Submit, SubmitCallback};
use crate::notify::{Notify, NotifyCallback};
use crate::state::{Form, FormsRegistry};
use crate::validation::{ContextValidators, Validators};
use indexmap::IndexMap;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Store writes reported to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// A patch was merged into the named form
    Committed(String),
    /// The named form was set from a new initial value
    Replaced(String),
}

impl FormEvent {
    pub fn form_name(&self) -> &str {
        match self {
            FormEvent::Committed(name) | FormEvent::Replaced(name) => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&FormEvent)>;

/// Forms registry plus application-wide defaults
pub struct FormContext {
    forms: RefCell<FormsRegistry>,
    validators: Option<ContextValidators>,
    on_submit: Option<SubmitCallback>,
    on_notify: Option<NotifyCallback>,
    mode: ErrorMode,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_subscription: Cell<u64>,
}

impl FormContext {
    pub fn builder() -> FormContextBuilder {
        FormContextBuilder::default()
    }

    /// Context with initial forms and no defaults
    pub fn new(initial_states: IndexMap<String, Form>) -> Self {
        Self::builder().initial_states(initial_states).build()
    }

    /// Snapshot of the named form
    pub fn form(&self, name: &str) -> Option<Form> {
        self.forms.borrow().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.forms.borrow().contains(name)
    }

    pub fn form_names(&self) -> Vec<String> {
        self.forms.borrow().names().map(str::to_string).collect()
    }

    /// Merge `patch` into the named form and notify subscribers
    pub fn commit(&self, name: &str, patch: &Form) {
        self.forms.borrow_mut().apply(name, patch);
        self.emit(&FormEvent::Committed(name.to_string()));
    }

    /// Register a form from its initial value. Later calls to
    /// `set_initial_states` compare against `initial`. Returns false when the
    /// name is already known.
    pub fn register(&self, name: &str, initial: &Form) -> bool {
        let added = self.forms.borrow_mut().register(name, initial);
        if added {
            self.emit(&FormEvent::Replaced(name.to_string()));
        }
        added
    }

    /// Feed initial values that arrived after construction.
    ///
    /// Each form whose value differs from the last initial value seen for it
    /// is replaced wholesale, discarding unsaved edits. Returns the names of
    /// replaced forms.
    pub fn set_initial_states(&self, states: &IndexMap<String, Form>) -> Vec<String> {
        let replaced: Vec<String> = {
            let mut forms = self.forms.borrow_mut();
            states
                .iter()
                .filter(|(name, form)| forms.replace(name, form))
                .map(|(name, _)| name.clone())
                .collect()
        };

        for name in &replaced {
            tracing::debug!(form = %name, "initial state replaced");
            self.emit(&FormEvent::Replaced(name.clone()));
        }
        replaced
    }

    /// Register a listener for store writes
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&FormEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Returns false when `id` was not subscribed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    fn emit(&self, event: &FormEvent) {
        // Snapshot so listeners may subscribe or read forms re-entrantly
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    /// Default validators for the named form
    pub fn validators_for(&self, name: &str) -> Option<Validators> {
        self.validators.as_ref()?.resolve(name)
    }

    pub fn on_submit(&self) -> Option<&SubmitCallback> {
        self.on_submit.as_ref()
    }

    pub fn on_notify(&self) -> Option<&NotifyCallback> {
        self.on_notify.as_ref()
    }

    pub fn error_mode(&self) -> ErrorMode {
        self.mode
    }
}

impl fmt::Debug for FormContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormContext")
            .field("forms", &self.form_names())
            .field("validators", &self.validators)
            .field("on_submit", &self.on_submit.is_some())
            .field("on_notify", &self.on_notify.is_some())
            .field("mode", &self.mode)
            .finish()
    }
}

/// Options recognized by a shared context
#[derive(Default)]
pub struct FormContextBuilder {
    initial_states: IndexMap<String, Form>,
    validators: Option<ContextValidators>,
    on_submit: Option<SubmitCallback>,
    on_notify: Option<NotifyCallback>,
    mode: Option<ErrorMode>,
}

impl FormContextBuilder {
    pub fn initial_states(mut self, states: IndexMap<String, Form>) -> Self {
        self.initial_states.extend(states);
        self
    }

    /// Add one named initial form
    pub fn form(mut self, name: impl Into<String>, form: Form) -> Self {
        self.initial_states.insert(name.into(), form);
        self
    }

    /// Validators for every form, or a per-form map
    pub fn validators(mut self, validators: impl Into<ContextValidators>) -> Self {
        self.validators = Some(validators.into());
        self
    }

    /// Validators for one form, building up a per-form map
    pub fn validators_for(mut self, name: impl Into<String>, validators: Validators) -> Self {
        let mut map = match self.validators.take() {
            Some(ContextValidators::PerForm(map)) => map,
            _ => IndexMap::new(),
        };
        map.insert(name.into(), validators);
        self.validators = Some(ContextValidators::PerForm(map));
        self
    }

    pub fn on_submit(mut self, callback: impl Submit + 'static) -> Self {
        self.on_submit = Some(Arc::new(callback));
        self
    }

    pub fn on_notify(mut self, callback: impl Notify + 'static) -> Self {
        self.on_notify = Some(Arc::new(callback));
        self
    }

    pub fn error_mode(mut self, mode: ErrorMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Seed initial states and error mode from a configuration file
    pub fn config(mut self, config: FormsConfig) -> Self {
        self.initial_states.extend(config.initial_states);
        if let Some(mode) = config.error_mode {
            self.mode = Some(mode);
        }
        self
    }

    pub fn build(self) -> FormContext {
        FormContext {
            forms: RefCell::new(FormsRegistry::new(self.initial_states)),
            validators: self.validators,
            on_submit: self.on_submit,
            on_notify: self.on_notify,
            mode: self.mode.unwrap_or_default(),
            listeners: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
        }
    }
}
