//! Login and registration form flows: validation rules, per-form state and
//! the submission handler that talks to the auth collaborator.

pub mod login;
pub mod register;
pub mod schema;
pub mod state;
pub mod submit;

pub use self::login::{LoginCredentials, LoginForm};
pub use self::register::{RegisterForm, RegistrationDetails};
pub use self::schema::Field;
pub use self::state::{Blocked, FieldView, FormState, Phase};
pub use self::submit::{SubmissionHandler, SubmitOutcome};
