pub mod auth;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("portal")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("PORTAL_PORT")
                .value_parser(clap::value_parser!(u16)),
        );

    let command = auth::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use url::Url;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "portal");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            env!("CARGO_PKG_DESCRIPTION")
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_check_port_and_auth_url() {
        temp_env::with_vars(
            [
                ("PORTAL_AUTH_URL", None::<&str>),
                ("PORTAL_PORT", None),
                ("PORTAL_POST_LOGIN_PATH", None),
                ("PORTAL_SUBMIT_TIMEOUT", None),
            ],
            || {
                let matches = new().get_matches_from(vec![
                    "portal",
                    "--port",
                    "9090",
                    "--auth-url",
                    "https://shop.tld/api/auth",
                ]);

                assert_eq!(matches.get_one::<u16>("port").copied(), Some(9090));
                let options = auth::Options::parse(&matches).unwrap();
                assert_eq!(
                    options.auth_url,
                    Url::parse("https://shop.tld/api/auth").unwrap()
                );
                assert_eq!(options.post_login_path, "/home");
                assert_eq!(options.submit_timeout, Duration::from_secs(10));
            },
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("PORTAL_AUTH_URL", Some("http://localhost:3000/api/auth")),
                ("PORTAL_PORT", Some("443")),
                ("PORTAL_POST_LOGIN_PATH", Some("/conta")),
                ("PORTAL_SUBMIT_TIMEOUT", Some("3")),
                ("PORTAL_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["portal"]);
                assert_eq!(matches.get_one::<u16>("port").copied(), Some(443));
                assert_eq!(matches.get_one::<u8>("verbosity").copied(), Some(2));

                let options = auth::Options::parse(&matches).unwrap();
                assert_eq!(options.auth_url.host_str(), Some("localhost"));
                assert_eq!(options.post_login_path, "/conta");
                assert_eq!(options.submit_timeout, Duration::from_secs(3));
            },
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        temp_env::with_vars([("PORTAL_AUTH_URL", None::<&str>)], || {
            let bad = [
                vec!["portal", "--auth-url", "ftp://shop.tld"],
                vec!["portal", "--auth-url", "not a url"],
                vec!["portal", "--auth-url", "https://shop.tld", "--post-login-path", "home"],
                vec!["portal", "--auth-url", "https://shop.tld", "--submit-timeout", "0"],
                vec!["portal"],
            ];
            for args in bad {
                assert!(new().try_get_matches_from(args.clone()).is_err(), "{args:?}");
            }
        });
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("PORTAL_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "portal".to_string(),
                    "--auth-url".to_string(),
                    "https://shop.tld/api/auth".to_string(),
                ];

                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>("verbosity").copied(),
                    Some(u8::try_from(index).unwrap())
                );
            });
        }
    }
}
