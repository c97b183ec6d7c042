//! Live form instances keyed by the `formId` the client sends along.
//!
//! Requests carrying the same id share one form, so the in-flight guard of the
//! submission handler holds across them. Requests without an id get a form of
//! their own.

use crate::forms::{LoginForm, RegisterForm};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

pub const DEFAULT_FORM_TTL: Duration = Duration::from_secs(5 * 60);
const MAX_FORM_ID_LENGTH: usize = 64;

/// Ids are opaque to the server but kept short and URL safe.
#[must_use]
pub fn valid_form_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_FORM_ID_LENGTH
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

struct Entry<F> {
    form: Arc<Mutex<F>>,
    touched_at: Instant,
}

pub struct FormStore<F> {
    ttl: Duration,
    forms: Mutex<HashMap<String, Entry<F>>>,
}

impl<F: Default> FormStore<F> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            forms: Mutex::new(HashMap::new()),
        }
    }

    /// The form registered under `id`, created on first use. Without an id
    /// the form is detached and never shared.
    pub async fn checkout(&self, id: Option<&str>) -> Arc<Mutex<F>> {
        let Some(id) = id else {
            return Arc::default();
        };

        let mut forms = self.forms.lock().await;
        forms.retain(|_, entry| entry.touched_at.elapsed() < self.ttl);

        let entry = forms.entry(id.to_string()).or_insert_with(|| Entry {
            form: Arc::default(),
            touched_at: Instant::now(),
        });
        entry.touched_at = Instant::now();
        entry.form.clone()
    }

    /// Forget `form` once its submission settled. A newer form registered
    /// under the same id is left alone.
    pub async fn release(&self, id: Option<&str>, form: &Arc<Mutex<F>>) {
        let Some(id) = id else {
            return;
        };

        let mut forms = self.forms.lock().await;
        if forms
            .get(id)
            .is_some_and(|entry| Arc::ptr_eq(&entry.form, form))
        {
            forms.remove(id);
        }
    }
}

/// Both stores, shared by the handlers through an `Extension`.
pub struct Forms {
    pub login: FormStore<LoginForm>,
    pub register: FormStore<RegisterForm>,
}

impl Forms {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            login: FormStore::new(ttl),
            register: FormStore::new(ttl),
        }
    }
}

impl Default for Forms {
    fn default() -> Self {
        Self::new(DEFAULT_FORM_TTL)
    }
}
