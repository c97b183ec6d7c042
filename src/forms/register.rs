//! Registration form. On top of per-field rules it carries one cross-field
//! guard: password and confirmation must be identical before the submit
//! control is enabled. A mismatch swaps the submit label instead of raising a
//! field error.

use crate::forms::{
    schema::{Field, REGISTRATION},
    state::{Blocked, FormState},
};
use secrecy::SecretString;

pub const SUBMIT_LABEL: &str = "Criar Conta";
pub const PASSWORD_MISMATCH_LABEL: &str = "As senhas não coincidem";

/// Validated sign-up input with matching passwords.
#[derive(Debug)]
pub struct RegistrationDetails {
    pub name: String,
    pub email: String,
    pub cell_phone: Option<String>,
    pub password: SecretString,
}

#[derive(Debug)]
pub struct RegisterForm {
    state: FormState,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterForm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: FormState::new(&REGISTRATION),
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

    /// Start a submission. A password mismatch blocks before any field is
    /// validated, the control is disabled in that state.
    ///
    /// # Errors
    /// Returns why nothing may be dispatched.
    pub fn begin_submit(&mut self) -> Result<RegistrationDetails, Blocked> {
        if self.state.is_submitting() {
            return Err(Blocked::InFlight);
        }
        if !passwords_match(&self.state) {
            return Err(Blocked::PasswordMismatch);
        }
        self.state.begin_submit()?;

        let cell_phone = self.state.value(Field::CellPhone).trim();
        Ok(RegistrationDetails {
            name: self.state.value(Field::Name).trim().to_string(),
            email: self.state.value(Field::Email).trim().to_string(),
            cell_phone: (!cell_phone.is_empty()).then(|| cell_phone.to_string()),
            password: SecretString::from(self.state.value(Field::Password).trim().to_string()),
        })
    }

    pub fn finish_submit(&mut self) {
        self.state.finish_submit();
    }
}

/// Compares the raw inputs, exactly as typed.
#[must_use]
pub fn passwords_match(state: &FormState) -> bool {
    state.value(Field::Password) == state.value(Field::ConfirmPassword)
}

#[must_use]
pub fn can_submit(state: &FormState) -> bool {
    passwords_match(state) && !state.is_submitting()
}

#[must_use]
pub fn submit_label(state: &FormState) -> &'static str {
    if passwords_match(state) {
        SUBMIT_LABEL
    } else {
        PASSWORD_MISMATCH_LABEL
    }
}
