//! Per-form state: current values, per-field errors and the submission phase.
//!
//! The controller is explicit. Callers read and write fields through
//! `value`/`set_value`/`error` and render each field from its own
//! [`FieldView`] slice.

use crate::forms::schema::{Field, Schema};
use serde::Serialize;
use std::{collections::BTreeMap, fmt};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Editing,
    /// Transient, only observable while a validation pass runs.
    Validating,
    Blocked,
    Submitting,
}

/// Why a submit attempt did not dispatch anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blocked {
    /// A submission is already in flight for this form.
    InFlight,
    /// At least one field failed validation.
    Invalid,
    /// Registration only: password and confirmation differ.
    PasswordMismatch,
}

/// Read-only slice of one field, enough to render it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldView<'a> {
    pub field: Field,
    pub value: &'a str,
    pub error: Option<&'static str>,
}

pub struct FormState {
    schema: &'static Schema,
    values: BTreeMap<Field, String>,
    errors: BTreeMap<Field, &'static str>,
    phase: Phase,
}

impl FormState {
    #[must_use]
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            values: schema.fields().map(|field| (field, String::new())).collect(),
            errors: BTreeMap::new(),
            phase: Phase::Editing,
        }
    }

    #[must_use]
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// Current raw value, empty for fields outside the schema.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    /// Store a new value and re-validate that field. Fields outside the
    /// schema are ignored.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) -> Option<&'static str> {
        let Some(slot) = self.values.get_mut(&field) else {
            return None;
        };
        *slot = value.into();

        let error = self.validate_field(field);
        if !self.is_submitting() {
            self.settle();
        }
        error
    }

    #[must_use]
    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Re-run the rule of one field and record the outcome.
    pub fn validate_field(&mut self, field: Field) -> Option<&'static str> {
        let error = self.schema.validate(field, self.value(field));
        match error {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
        error
    }

    /// Validate every field at once. Returns `true` when all of them pass.
    pub fn validate_all(&mut self) -> bool {
        let previous = self.phase;
        self.phase = Phase::Validating;

        let fields: Vec<Field> = self.schema.fields().collect();
        for field in fields {
            self.validate_field(field);
        }

        if previous == Phase::Submitting {
            self.phase = previous;
        } else {
            self.settle();
        }
        !self.has_errors()
    }

    /// Enter `Submitting` if nothing is in flight and every field passes.
    ///
    /// # Errors
    /// Returns the reason the attempt was blocked.
    pub fn begin_submit(&mut self) -> Result<(), Blocked> {
        if self.is_submitting() {
            return Err(Blocked::InFlight);
        }
        if !self.validate_all() {
            return Err(Blocked::Invalid);
        }
        self.phase = Phase::Submitting;
        Ok(())
    }

    /// Leave `Submitting`, whatever the outcome was.
    pub fn finish_submit(&mut self) {
        self.phase = Phase::Editing;
        self.settle();
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldView<'_>> + '_ {
        self.schema.fields().map(|field| FieldView {
            field,
            value: self.value(field),
            error: self.error(field),
        })
    }

    fn settle(&mut self) {
        self.phase = if self.has_errors() {
            Phase::Blocked
        } else {
            Phase::Editing
        };
    }
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: BTreeMap<Field, &str> = self
            .values
            .iter()
            .map(|(field, value)| {
                let shown = if field.is_secret() { "[REDACTED]" } else { value.as_str() };
                (*field, shown)
            })
            .collect();

        f.debug_struct("FormState")
            .field("values", &values)
            .field("errors", &self.errors)
            .field("phase", &self.phase)
            .finish()
    }
}
