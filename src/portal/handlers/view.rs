//! JSON rendering of a form after a request has been applied to it.

use crate::forms::{
    login, register, submit::SubmitOutcome, Blocked, Field, FormState, LoginForm, Phase,
    RegisterForm,
};
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FieldEntry {
    pub field: Field,
    /// Absent for password fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(ToSchema, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub phase: Phase,
    pub fields: Vec<FieldEntry>,
    pub can_submit: bool,
    pub submit_label: String,
    pub show_spinner: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<String>,
}

impl FormResponse {
    fn from_state(state: &FormState, can_submit: bool, submit_label: &str) -> Self {
        let fields = state
            .fields()
            .map(|view| FieldEntry {
                field: view.field,
                value: (!view.field.is_secret()).then(|| view.value.to_string()),
                error: view.error.map(str::to_string),
            })
            .collect();

        Self {
            phase: state.phase(),
            fields,
            can_submit,
            submit_label: submit_label.to_string(),
            show_spinner: state.is_submitting(),
            redirect: None,
            notification: None,
        }
    }

    #[must_use]
    pub fn login(form: &LoginForm) -> Self {
        let state = form.state();
        Self::from_state(state, login::can_submit(state), login::submit_label(state))
    }

    #[must_use]
    pub fn register(form: &RegisterForm) -> Self {
        let state = form.state();
        Self::from_state(
            state,
            register::can_submit(state),
            register::submit_label(state),
        )
    }

    #[must_use]
    pub fn with_redirect(mut self, redirect: Option<String>) -> Self {
        self.redirect = redirect;
        self
    }

    #[must_use]
    pub fn with_notification(mut self, notification: Option<String>) -> Self {
        self.notification = notification;
        self
    }

    #[must_use]
    pub fn error(&self, field: Field) -> Option<&str> {
        self.fields
            .iter()
            .find(|entry| entry.field == field)
            .and_then(|entry| entry.error.as_deref())
    }
}

#[must_use]
pub fn status_for(outcome: SubmitOutcome) -> StatusCode {
    match outcome {
        SubmitOutcome::Succeeded => StatusCode::OK,
        SubmitOutcome::Failed => StatusCode::UNAUTHORIZED,
        SubmitOutcome::Blocked(Blocked::InFlight) => StatusCode::CONFLICT,
        SubmitOutcome::Blocked(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl IntoResponse for FormResponse {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::schema::EMAIL_INVALID;

    #[test]
    fn password_values_are_never_rendered() {
        let mut form = LoginForm::new();
        form.set_value(Field::Email, "user@test.com");
        form.set_value(Field::Password, "longenough1");

        let response = FormResponse::login(&form);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("user@test.com"));
        assert!(!json.contains("longenough1"));
        assert!(json.contains("\"submitLabel\":\"Entrar\""));
    }

    #[test]
    fn errors_are_rendered_per_field() {
        let mut form = LoginForm::new();
        form.set_value(Field::Email, "nope");

        let response = FormResponse::login(&form);
        assert_eq!(response.error(Field::Email), Some(EMAIL_INVALID));
        assert_eq!(response.error(Field::Password), None);
        assert_eq!(response.phase, Phase::Blocked);
    }

    #[test]
    fn statuses() {
        assert_eq!(status_for(SubmitOutcome::Succeeded), StatusCode::OK);
        assert_eq!(status_for(SubmitOutcome::Failed), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_for(SubmitOutcome::Blocked(Blocked::PasswordMismatch)),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(SubmitOutcome::Blocked(Blocked::InFlight)),
            StatusCode::CONFLICT
        );
    }
}
