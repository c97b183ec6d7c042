//! HTTP client for the auth server's email/password endpoints.
//!
//! `POST {base}/sign-in/email` and `POST {base}/sign-up/email` both answer
//! `{ "user": { ... } }` on success. Request bodies carry the password, so
//! nothing here logs them.

use crate::auth::{AuthCollaborator, AuthError, SignUp, User};
use crate::APP_USER_AGENT;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

const SIGN_IN_PATH: &str = "sign-in/email";
const SIGN_UP_PATH: &str = "sign-up/email";

#[derive(Serialize)]
struct SignInBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignUpBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    #[serde(rename = "cellPhone", skip_serializing_if = "Option::is_none")]
    cell_phone: Option<&'a str>,
    #[serde(rename = "callbackURL")]
    callback_url: &'a str,
}

#[derive(Deserialize)]
struct SessionResponse {
    user: User,
}

#[derive(Debug, Clone)]
pub struct RemoteAuth {
    client: Client,
    base: Url,
}

impl RemoteAuth {
    /// Build a client for the auth server mounted at `base`,
    /// e.g. `https://shop.tld/api/auth`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(mut base: Url) -> Result<Self, AuthError> {
        // without the trailing slash `join` would drop the last segment
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;

        Ok(Self { client, base })
    }

    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    async fn post<T: Serialize + Sync>(&self, path: &str, body: &T) -> Result<User, AuthError> {
        let url = self.base.join(path)?;
        let response = self.client.post(url).json(body).send().await?;

        let status = response.status();
        if status.is_success() {
            let session: SessionResponse = response
                .json()
                .await
                .map_err(|e| AuthError::Parse(e.to_string()))?;
            return Ok(session.user);
        }

        let message = response.text().await.unwrap_or_default();
        debug!("auth server answered {}", status);

        match status {
            StatusCode::UNAUTHORIZED
            | StatusCode::FORBIDDEN
            | StatusCode::UNPROCESSABLE_ENTITY
            | StatusCode::CONFLICT => Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            }),
            _ => Err(AuthError::Http {
                status: status.as_u16(),
                message,
            }),
        }
    }
}

#[async_trait]
impl AuthCollaborator for RemoteAuth {
    #[instrument(skip(self, password))]
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<User, AuthError> {
        let body = SignInBody {
            email,
            password: password.expose_secret(),
        };
        self.post(SIGN_IN_PATH, &body).await
    }

    #[instrument(skip_all, fields(email = %sign_up.email))]
    async fn sign_up_with_password(&self, sign_up: &SignUp) -> Result<User, AuthError> {
        let body = SignUpBody {
            name: &sign_up.name,
            email: &sign_up.email,
            password: sign_up.password.expose_secret(),
            cell_phone: sign_up.cell_phone.as_deref(),
            callback_url: &sign_up.callback_url,
        };
        self.post(SIGN_UP_PATH, &body).await
    }
}
