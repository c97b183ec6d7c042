use crate::{auth::RemoteAuth, cli::globals::GlobalArgs, portal};
use anyhow::{Context, Result};
use std::{sync::Arc, time::Duration};
use tracing::debug;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub auth_url: Url,
    pub post_login_path: String,
    pub submit_timeout: Duration,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the auth client cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let auth = RemoteAuth::new(args.auth_url).context("Failed to build auth client")?;

    debug!("auth server: {}", auth.base());

    let globals = GlobalArgs::new()
        .with_post_login_path(args.post_login_path)
        .with_submit_timeout(args.submit_timeout);

    portal::new(args.port, Arc::new(auth), globals).await
}
