use clap::{builder::ValueParser, Arg, ArgMatches, Command};
use std::time::Duration;
use url::Url;

pub const ARG_AUTH_URL: &str = "auth-url";
pub const ARG_POST_LOGIN_PATH: &str = "post-login-path";
pub const ARG_SUBMIT_TIMEOUT: &str = "submit-timeout";

#[derive(Debug)]
pub struct Options {
    pub auth_url: Url,
    pub post_login_path: String,
    pub submit_timeout: Duration,
}

impl Options {
    /// Parse auth collaborator arguments from matches.
    ///
    /// # Errors
    /// Returns an error if required arguments are missing.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let auth_url = matches
            .get_one::<Url>(ARG_AUTH_URL)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_AUTH_URL}"))?;

        let post_login_path = matches
            .get_one::<String>(ARG_POST_LOGIN_PATH)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_POST_LOGIN_PATH}"))?;

        let submit_timeout = matches
            .get_one::<u64>(ARG_SUBMIT_TIMEOUT)
            .copied()
            .map(Duration::from_secs)
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_SUBMIT_TIMEOUT}"))?;

        Ok(Self {
            auth_url,
            post_login_path,
            submit_timeout,
        })
    }
}

#[must_use]
pub fn validator_url() -> ValueParser {
    ValueParser::from(move |value: &str| -> std::result::Result<Url, String> {
        let url = Url::parse(value).map_err(|e| format!("invalid URL: {e}"))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(format!("unsupported scheme: {scheme}")),
        }
    })
}

#[must_use]
pub fn validator_path() -> ValueParser {
    ValueParser::from(move |value: &str| -> std::result::Result<String, String> {
        if value.starts_with('/') && !value.starts_with("//") {
            Ok(value.to_string())
        } else {
            Err("path must be absolute, e.g. /home".to_string())
        }
    })
}

pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_AUTH_URL)
                .long(ARG_AUTH_URL)
                .help("Auth server base URL, example: https://shop.tld/api/auth")
                .env("PORTAL_AUTH_URL")
                .required(true)
                .value_parser(validator_url()),
        )
        .arg(
            Arg::new(ARG_POST_LOGIN_PATH)
                .long(ARG_POST_LOGIN_PATH)
                .help("Where users land after signing in or creating an account")
                .env("PORTAL_POST_LOGIN_PATH")
                .default_value("/home")
                .value_parser(validator_path()),
        )
        .arg(
            Arg::new(ARG_SUBMIT_TIMEOUT)
                .long(ARG_SUBMIT_TIMEOUT)
                .help("Seconds to wait for the auth server before giving up")
                .env("PORTAL_SUBMIT_TIMEOUT")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}
