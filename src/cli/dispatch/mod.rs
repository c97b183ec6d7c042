//! Map validated CLI arguments to the action to run.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::auth;
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let auth_opts = auth::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        auth_url: auth_opts.auth_url,
        post_login_path: auth_opts.post_login_path,
        submit_timeout: auth_opts.submit_timeout,
    }))
}
