use crate::forms::{
    schema::{Field, LOGIN},
    state::{Blocked, FormState},
};
use secrecy::SecretString;

pub const SUBMIT_LABEL: &str = "Entrar";

/// Validated sign-in input, built for a single submission attempt.
#[derive(Debug)]
pub struct LoginCredentials {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug)]
pub struct LoginForm {
    state: FormState,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: FormState::new(&LOGIN),
        }
    }

    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        self.state.value(field)
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) -> Option<&'static str> {
        self.state.set_value(field, value)
    }

    #[must_use]
    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.state.error(field)
    }

    /// Start a submission and hand out the trimmed credentials.
    ///
    /// # Errors
    /// Returns why nothing may be dispatched.
    pub fn begin_submit(&mut self) -> Result<LoginCredentials, Blocked> {
        self.state.begin_submit()?;
        Ok(LoginCredentials {
            email: self.state.value(Field::Email).trim().to_string(),
            password: SecretString::from(self.state.value(Field::Password).trim().to_string()),
        })
    }

    pub fn finish_submit(&mut self) {
        self.state.finish_submit();
    }
}

/// The submit control is enabled unless a submission is in flight.
#[must_use]
pub fn can_submit(state: &FormState) -> bool {
    !state.is_submitting()
}

#[must_use]
pub fn submit_label(_state: &FormState) -> &'static str {
    SUBMIT_LABEL
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::schema::EMAIL_INVALID;
    use secrecy::ExposeSecret;

    #[test]
    fn credentials_are_trimmed() {
        let mut form = LoginForm::new();
        form.set_value(Field::Email, " user@test.com ");
        form.set_value(Field::Password, " longenough1 ");

        let credentials = form.begin_submit().unwrap();
        assert_eq!(credentials.email, "user@test.com");
        assert_eq!(credentials.password.expose_secret(), "longenough1");
        assert!(!can_submit(form.state()));
    }

    #[test]
    fn invalid_email_blocks_submission() {
        let mut form = LoginForm::new();
        form.set_value(Field::Email, "user.test.com");
        form.set_value(Field::Password, "longenough1");

        assert_eq!(form.begin_submit().err(), Some(Blocked::Invalid));
        assert_eq!(form.error(Field::Email), Some(EMAIL_INVALID));
        assert!(can_submit(form.state()));
    }

    #[test]
    fn short_password_blocks_submission() {
        for password in ["", "1", "1234567", "       1234567"] {
            let mut form = LoginForm::new();
            form.set_value(Field::Email, "user@test.com");
            form.set_value(Field::Password, password);
            assert_eq!(form.begin_submit().err(), Some(Blocked::Invalid));
        }
    }

    #[test]
    fn label_is_constant() {
        let form = LoginForm::new();
        assert_eq!(submit_label(form.state()), "Entrar");
    }

    #[test]
    fn credentials_debug_hides_password() {
        let mut form = LoginForm::new();
        form.set_value(Field::Email, "user@test.com");
        form.set_value(Field::Password, "longenough1");
        let credentials = form.begin_submit().unwrap();
        assert!(!format!("{credentials:?}").contains("longenough1"));
    }
}
