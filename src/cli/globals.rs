use crate::forms::submit::{DEFAULT_POST_LOGIN_PATH, DEFAULT_SUBMIT_TIMEOUT};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub post_login_path: String,
    pub submit_timeout: Duration,
}

impl Default for GlobalArgs {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalArgs {
    #[must_use]
    pub fn new() -> Self {
        Self {
            post_login_path: DEFAULT_POST_LOGIN_PATH.to_string(),
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_post_login_path(mut self, path: impl Into<String>) -> Self {
        self.post_login_path = path.into();
        self
    }

    #[must_use]
    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }
}
