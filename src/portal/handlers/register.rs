use crate::{
    auth::AuthCollaborator,
    cli::globals::GlobalArgs,
    forms::{submit::SubmitOutcome, Blocked, Field, RegisterForm},
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

#[derive(ToSchema, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterPayload {
    form_id: Option<String>,
    name: Option<String>,
    email: Option<String>,
    cell_phone: Option<String>,
    password: Option<String>,
    confirm_password: Option<String>,
}

impl fmt::Debug for RegisterPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterPayload")
            .field("form_id", &self.form_id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("cell_phone", &self.cell_phone)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field(
                "confirm_password",
                &self.confirm_password.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl RegisterPayload {
    fn apply(self, form: &mut RegisterForm) {
        let values = [
            (Field::Name, self.name),
            (Field::Email, self.email),
            (Field::CellPhone, self.cell_phone),
            (Field::Password, self.password),
            (Field::ConfirmPassword, self.confirm_password),
        ];
        for (field, value) in values {
            if let Some(value) = value {
                form.set_value(field, value);
            }
        }
    }
}

#[utoipa::path(
    post,
    path= "/auth/register",
    request_body = RegisterPayload,
    responses (
        (status = 200, description = "Account created, follow `redirect`", body = FormResponse, content_type = "application/json"),
        (status = 400, description = "Missing payload or invalid form id", body = String),
        (status = 401, description = "The auth server refused the account, show `notification`", body = FormResponse),
        (status = 409, description = "A submission for this form id is already in flight", body = FormResponse),
        (status = 422, description = "Invalid fields or passwords do not match", body = FormResponse),
    ),
    tag= "auth"
)]
#[instrument(skip_all)]
pub async fn register(
    auth: Extension<Arc<dyn AuthCollaborator>>,
    globals: Extension<GlobalArgs>,
    forms: Extension<Arc<Forms>>,
    payload: Option<Json<RegisterPayload>>,
) -> impl IntoResponse {
    let mut payload: RegisterPayload = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    debug!("register: {:?}", payload);

    let raw_id = payload.form_id.take();
    let id = match form_id(raw_id.as_deref()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let form = forms.register.checkout(id).await;
    payload.apply(&mut *form.lock().await);

    let recorder = Arc::new(Recorder::default());
    let outcome = submission_handler(&auth, &globals, &recorder)
        .submit_registration(&form)
        .await;

    if outcome != SubmitOutcome::Blocked(Blocked::InFlight) {
        forms.register.release(id, &form).await;
    }

    let body = FormResponse::register(&*form.lock().await)
        .with_redirect(recorder.redirect())
        .with_notification(recorder.notification());

    (status_for(outcome), body).into_response()
}

#[utoipa::path(
    post,
    path= "/auth/register/validate",
    request_body = RegisterPayload,
    responses (
        (status = 200, description = "Errors of the fields sent and submit control state", body = FormResponse, content_type = "application/json"),
    ),
    tag= "auth"
)]
#[instrument(skip_all)]
pub async fn validate_register(payload: Option<Json<RegisterPayload>>) -> impl IntoResponse {
    let payload: RegisterPayload = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let mut form = RegisterForm::new();
    payload.apply(&mut form);

    (StatusCode::OK, FormResponse::register(&form)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{register::PASSWORD_MISMATCH_LABEL, schema::NAME_REQUIRED};

    fn form_from(json: &str) -> RegisterForm {
        let payload: RegisterPayload = serde_json::from_str(json).unwrap();
        let mut form = RegisterForm::new();
        payload.apply(&mut form);
        form
    }

    #[test]
    fn payload_uses_camel_case() {
        let form = form_from(
            r#"{
                "name": "Maria Silva",
                "email": "maria@test.com",
                "cellPhone": "11987654321",
                "password": "abcdefgh",
                "confirmPassword": "abcdefg1"
            }"#,
        );
        assert_eq!(form.value(Field::CellPhone), "11987654321");
        assert_eq!(form.value(Field::ConfirmPassword), "abcdefg1");

        let response = FormResponse::register(&form);
        assert!(!response.can_submit);
        assert_eq!(response.submit_label, PASSWORD_MISMATCH_LABEL);
    }

    #[test]
    fn untouched_fields_carry_no_error() {
        let form = form_from(r#"{"name":"Jo"}"#);
        assert_eq!(form.error(Field::Name), Some(NAME_REQUIRED));
        for field in [Field::Email, Field::Password, Field::ConfirmPassword] {
            assert_eq!(form.error(field), None, "{field}");
        }

        let form = form_from(r#"{"name":"Maria"}"#);
        assert!(!form.state().has_errors());
    }

    #[test]
    fn payload_debug_hides_passwords() {
        let payload = RegisterPayload {
            password: Some("abcdefgh".to_string()),
            confirm_password: Some("abcdefgh".to_string()),
            ..RegisterPayload::default()
        };
        assert!(!format!("{payload:?}").contains("abcdefgh"));
    }
}
