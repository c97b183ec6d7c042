//! # Portal (storefront login and registration)
//!
//! `portal` drives the two authentication forms of the storefront: sign-in with
//! email and password, and account creation.
//!
//! ## Forms
//!
//! Each form owns an explicit [`forms::FormState`]: raw values, per-field errors
//! and a phase (`Editing`, `Validating`, `Blocked`, `Submitting`). Values are
//! validated eagerly on change and once more before a submission is allowed.
//! Registration adds a cross-field guard, password and confirmation must be
//! identical before the submit control is enabled.
//!
//! ## Collaborators
//!
//! Sign-in and sign-up are delegated to an external auth server through
//! [`auth::AuthCollaborator`]; navigation and toasts go through
//! [`auth::Router`] and [`auth::Notifier`]. Failures are always reported with a
//! generic message, the underlying cause is only logged.
//!
//! ## HTTP
//!
//! The [`portal`] module exposes the flows over axum for server-rendered
//! clients and documents them with `OpenAPI`.

pub mod auth;
pub mod cli;
pub mod forms;
pub mod portal;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
