use crate::{
    auth::AuthCollaborator,
    cli::globals::GlobalArgs,
    forms::{submit::SubmitOutcome, Blocked, Field, LoginForm},
    portal::{
        handlers::{
            form_id, submission_handler,
            view::{status_for, FormResponse},
            Recorder,
        },
        store::Forms,
    },
};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use std::{fmt, sync::Arc};
use tracing::{debug, instrument};
use utoipa::ToSchema;

/// Only the fields present in the body are applied to the form.
#[derive(ToSchema, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginPayload {
    /// Requests with the same id share one form, a second submit while the
    /// first is in flight is refused.
    form_id: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

impl fmt::Debug for LoginPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginPayload")
            .field("form_id", &self.form_id)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl LoginPayload {
    fn apply(self, form: &mut LoginForm) {
        if let Some(email) = self.email {
            form.set_value(Field::Email, email);
        }
        if let Some(password) = self.password {
            form.set_value(Field::Password, password);
        }
    }
}

#[utoipa::path(
    post,
    path= "/auth/login",
    request_body = LoginPayload,
    responses (
        (status = 200, description = "Signed in, follow `redirect`", body = FormResponse, content_type = "application/json"),
        (status = 400, description = "Missing payload or invalid form id", body = String),
        (status = 401, description = "Sign-in failed, show `notification`", body = FormResponse),
        (status = 409, description = "A submission for this form id is already in flight", body = FormResponse),
        (status = 422, description = "Some fields are invalid", body = FormResponse),
    ),
    tag= "auth"
)]
#[instrument(skip_all)]
pub async fn login(
    auth: Extension<Arc<dyn AuthCollaborator>>,
    globals: Extension<GlobalArgs>,
    forms: Extension<Arc<Forms>>,
    payload: Option<Json<LoginPayload>>,
) -> impl IntoResponse {
    let mut payload: LoginPayload = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    debug!("login: {:?}", payload);

    let raw_id = payload.form_id.take();
    let id = match form_id(raw_id.as_deref()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let form = forms.login.checkout(id).await;
    payload.apply(&mut *form.lock().await);

    let recorder = Arc::new(Recorder::default());
    let outcome = submission_handler(&auth, &globals, &recorder)
        .submit_login(&form)
        .await;

    if outcome != SubmitOutcome::Blocked(Blocked::InFlight) {
        forms.login.release(id, &form).await;
    }

    let body = FormResponse::login(&*form.lock().await)
        .with_redirect(recorder.redirect())
        .with_notification(recorder.notification());

    (status_for(outcome), body).into_response()
}

#[utoipa::path(
    post,
    path= "/auth/login/validate",
    request_body = LoginPayload,
    responses (
        (status = 200, description = "Errors of the fields sent and submit control state", body = FormResponse, content_type = "application/json"),
    ),
    tag= "auth"
)]
#[instrument(skip_all)]
pub async fn validate_login(payload: Option<Json<LoginPayload>>) -> impl IntoResponse {
    let payload: LoginPayload = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let mut form = LoginForm::new();
    payload.apply(&mut form);

    (StatusCode::OK, FormResponse::login(&form)).into_response()
}
