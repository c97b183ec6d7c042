//! Declarative validation rules for the login and registration forms.
//!
//! Every rule trims the candidate value before checking it and answers with a
//! user-facing message in pt-BR. Rules are pure: checking the same value twice
//! yields the same answer.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

pub const EMAIL_INVALID: &str = "E-mail inválido";
pub const PASSWORD_TOO_SHORT: &str = "Senha deve ter pelo menos 8 caracteres";
pub const NAME_REQUIRED: &str = "Nome é obrigatório";
pub const NAME_TOO_LONG: &str = "Nome deve ter no máximo 50 caracteres";
pub const CELL_PHONE_INVALID: &str = "Celular inválido";

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MIN_NAME_LENGTH: usize = 3;
pub const MAX_NAME_LENGTH: usize = 50;
pub const MIN_CELL_PHONE_LENGTH: usize = 11;

static EMAIL_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// Named input of a form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    CellPhone,
    Password,
    ConfirmPassword,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::CellPhone => "cellPhone",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }

    /// Secret fields are never echoed back or logged.
    #[must_use]
    pub const fn is_secret(self) -> bool {
        matches!(self, Self::Password | Self::ConfirmPassword)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    Email,
    /// Character count bounds, the upper one is optional.
    Length {
        min: usize,
        too_short: &'static str,
        max: Option<(usize, &'static str)>,
    },
}

impl Rule {
    fn check(&self, value: &str) -> Result<(), &'static str> {
        match *self {
            Self::Email => {
                if valid_email(value) {
                    Ok(())
                } else {
                    Err(EMAIL_INVALID)
                }
            }
            Self::Length {
                min,
                too_short,
                max,
            } => {
                // count chars, "João" is four characters
                let length = value.chars().count();
                if length < min {
                    return Err(too_short);
                }
                match max {
                    Some((max, too_long)) if length > max => Err(too_long),
                    _ => Ok(()),
                }
            }
        }
    }
}

/// A rule bound to a field. Optional fields accept an empty value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldRule {
    pub field: Field,
    pub rule: Rule,
    pub optional: bool,
}

impl FieldRule {
    /// Check a raw input value against the rule.
    ///
    /// # Errors
    /// Returns the user-facing message of the first failed constraint.
    pub fn check(&self, value: &str) -> Result<(), &'static str> {
        let value = value.trim();
        if self.optional && value.is_empty() {
            return Ok(());
        }
        self.rule.check(value)
    }
}

const PASSWORD_RULE: Rule = Rule::Length {
    min: MIN_PASSWORD_LENGTH,
    too_short: PASSWORD_TOO_SHORT,
    max: None,
};

/// Ordered set of field rules making up one form.
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    rules: &'static [FieldRule],
}

pub static LOGIN: Schema = Schema {
    rules: &[
        FieldRule {
            field: Field::Email,
            rule: Rule::Email,
            optional: false,
        },
        FieldRule {
            field: Field::Password,
            rule: PASSWORD_RULE,
            optional: false,
        },
    ],
};

pub static REGISTRATION: Schema = Schema {
    rules: &[
        FieldRule {
            field: Field::Name,
            rule: Rule::Length {
                min: MIN_NAME_LENGTH,
                too_short: NAME_REQUIRED,
                max: Some((MAX_NAME_LENGTH, NAME_TOO_LONG)),
            },
            optional: false,
        },
        FieldRule {
            field: Field::Email,
            rule: Rule::Email,
            optional: false,
        },
        FieldRule {
            field: Field::CellPhone,
            rule: Rule::Length {
                min: MIN_CELL_PHONE_LENGTH,
                too_short: CELL_PHONE_INVALID,
                max: None,
            },
            optional: true,
        },
        FieldRule {
            field: Field::Password,
            rule: PASSWORD_RULE,
            optional: false,
        },
        FieldRule {
            field: Field::ConfirmPassword,
            rule: PASSWORD_RULE,
            optional: false,
        },
    ],
};

impl Schema {
    /// Fields in display order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.rules.iter().map(|rule| rule.field)
    }

    #[must_use]
    pub fn rule(&self, field: Field) -> Option<&FieldRule> {
        self.rules.iter().find(|rule| rule.field == field)
    }

    /// Validate one field, `None` when the value passes or the field is not
    /// part of this schema.
    #[must_use]
    pub fn validate(&self, field: Field, value: &str) -> Option<&'static str> {
        self.rule(field).and_then(|rule| rule.check(value).err())
    }
}

#[must_use]
pub fn valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}
