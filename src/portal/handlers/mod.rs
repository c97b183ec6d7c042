pub mod health;
pub use self::health::health;

pub mod login;
pub use self::login::{login, validate_login};

pub mod register;
pub use self::register::{register, validate_register};

pub mod view;

// common pieces for the form handlers
use crate::{
    auth::{AuthCollaborator, Notifier, Router},
    cli::globals::GlobalArgs,
    forms::SubmissionHandler,
    portal::store::valid_form_id,
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::{Arc, Mutex};

/// Per-request router and notifier. The handlers turn what it captured into
/// the `redirect` and `notification` of the response.
#[derive(Debug, Default)]
pub struct Recorder {
    redirect: Mutex<Option<String>>,
    notification: Mutex<Option<String>>,
}

impl Recorder {
    #[must_use]
    pub fn redirect(&self) -> Option<String> {
        self.redirect.lock().ok().and_then(|slot| slot.clone())
    }

    #[must_use]
    pub fn notification(&self) -> Option<String> {
        self.notification.lock().ok().and_then(|slot| slot.clone())
    }
}

impl Router for Recorder {
    fn navigate(&self, path: &str) {
        if let Ok(mut slot) = self.redirect.lock() {
            *slot = Some(path.to_string());
        }
    }
}

impl Notifier for Recorder {
    fn show_error(&self, message: &str) {
        if let Ok(mut slot) = self.notification.lock() {
            *slot = Some(message.to_string());
        }
    }
}

pub(crate) fn submission_handler(
    auth: &Arc<dyn AuthCollaborator>,
    globals: &GlobalArgs,
    recorder: &Arc<Recorder>,
) -> SubmissionHandler {
    SubmissionHandler::new(auth.clone(), recorder.clone(), recorder.clone())
        .with_post_login_path(globals.post_login_path.clone())
        .with_timeout(globals.submit_timeout)
}

/// Blank ids count as absent.
pub(crate) fn form_id(raw: Option<&str>) -> Result<Option<&str>, Response> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(id) if valid_form_id(id) => Ok(Some(id)),
        Some(_) => Err((StatusCode::BAD_REQUEST, "Invalid form id".to_string()).into_response()),
    }
}
