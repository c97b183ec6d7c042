//! Turns a valid form into a collaborator call and routes the outcome.
//!
//! The form sits behind a `tokio::sync::Mutex`, locked only to start and to
//! finish a submission. The collaborator call itself runs unlocked, so fields
//! stay editable while it is suspended, and `Phase::Submitting` keeps a second
//! submit from dispatching anything.

use crate::auth::{AuthCollaborator, AuthError, Notifier, Router, SignUp, User};
use crate::forms::{login::LoginForm, register::RegisterForm, state::Blocked};
use std::{future::Future, sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

pub const DEFAULT_POST_LOGIN_PATH: &str = "/home";
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shown on any sign-in failure, never more specific.
pub const LOGIN_FAILED: &str = "E-mail ou senha inválidos.";
pub const SIGN_UP_FAILED: &str = "Não foi possível criar a conta.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The collaborator accepted, navigation was triggered.
    Succeeded,
    /// The collaborator refused or could not be reached, a notification was shown.
    Failed,
    /// Nothing was dispatched.
    Blocked(Blocked),
}

#[derive(Clone)]
pub struct SubmissionHandler {
    auth: Arc<dyn AuthCollaborator>,
    router: Arc<dyn Router>,
    notifier: Arc<dyn Notifier>,
    post_login_path: String,
    timeout: Duration,
}

impl SubmissionHandler {
    #[must_use]
    pub fn new(
        auth: Arc<dyn AuthCollaborator>,
        router: Arc<dyn Router>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            auth,
            router,
            notifier,
            post_login_path: DEFAULT_POST_LOGIN_PATH.to_string(),
            timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_post_login_path(mut self, path: impl Into<String>) -> Self {
        self.post_login_path = path.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[instrument(skip_all)]
    pub async fn submit_login(&self, form: &Mutex<LoginForm>) -> SubmitOutcome {
        let attempt = form.lock().await.begin_submit();
        let credentials = match attempt {
            Ok(credentials) => credentials,
            Err(blocked) => {
                debug!("login blocked: {:?}", blocked);
                return SubmitOutcome::Blocked(blocked);
            }
        };

        let result = self
            .bounded(
                self.auth
                    .sign_in_with_password(&credentials.email, &credentials.password),
            )
            .await;
        drop(credentials);

        form.lock().await.finish_submit();
        self.settle(result, "sign-in", LOGIN_FAILED)
    }

    #[instrument(skip_all)]
    pub async fn submit_registration(&self, form: &Mutex<RegisterForm>) -> SubmitOutcome {
        let attempt = form.lock().await.begin_submit();
        let details = match attempt {
            Ok(details) => details,
            Err(blocked) => {
                debug!("registration blocked: {:?}", blocked);
                return SubmitOutcome::Blocked(blocked);
            }
        };

        let sign_up = SignUp {
            name: details.name,
            email: details.email,
            password: details.password,
            cell_phone: details.cell_phone,
            callback_url: self.post_login_path.clone(),
        };
        let result = self.bounded(self.auth.sign_up_with_password(&sign_up)).await;
        drop(sign_up);

        form.lock().await.finish_submit();
        self.settle(result, "sign-up", SIGN_UP_FAILED)
    }

    async fn bounded<F>(&self, call: F) -> Result<User, AuthError>
    where
        F: Future<Output = Result<User, AuthError>>,
    {
        tokio::time::timeout(self.timeout, call)
            .await
            .unwrap_or_else(|_| Err(AuthError::Timeout(self.timeout)))
    }

    fn settle(
        &self,
        result: Result<User, AuthError>,
        operation: &str,
        failure: &str,
    ) -> SubmitOutcome {
        match result {
            Ok(user) => {
                info!(user.id = %user.id, "{} succeeded", operation);
                self.router.navigate(&self.post_login_path);
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                // the cause stays in the logs, the user only sees `failure`
                error!("{} failed: {}", operation, e);
                self.notifier.show_error(failure);
                SubmitOutcome::Failed
            }
        }
    }
}
