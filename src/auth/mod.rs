//! Collaborators the form flows call but do not implement: the auth server,
//! the router and the notification area.

pub mod error;
pub mod remote;
pub mod user;

pub use self::error::AuthError;
pub use self::remote::RemoteAuth;
pub use self::user::User;

use async_trait::async_trait;
use secrecy::SecretString;

/// Sign-up request forwarded to the auth server.
#[derive(Debug)]
pub struct SignUp {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub cell_phone: Option<String>,
    /// Where the auth server sends the user after email verification.
    pub callback_url: String,
}

#[async_trait]
pub trait AuthCollaborator: Send + Sync {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<User, AuthError>;

    async fn sign_up_with_password(&self, sign_up: &SignUp) -> Result<User, AuthError>;
}

/// Navigation target, fire-and-forget.
pub trait Router: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Non-blocking user notification (toast).
pub trait Notifier: Send + Sync {
    fn show_error(&self, message: &str);
}
