//! Runtime configuration.
//!
//! Values come from the environment (a `.env` file is loaded first when
//! present). CLI flags override them.
//!
//! | Variable                   | Default                                |
//! |----------------------------|----------------------------------------|
//! | `ROSTER_FEED_URL`          | `https://jsonplaceholder.typicode.com` |
//! | `ROSTER_PORT`              | `3000`                                 |
//! | `ROSTER_HTTP_TIMEOUT_SECS` | `10`                                   |
//! | `ROSTER_STRICT`            | `false`                                |

use std::env;
use std::time::Duration;

/// Public posts API.
pub const DEFAULT_FEED_URL: &str = "https://jsonplaceholder.typicode.com";

pub const DEFAULT_PORT: u16 = 3000;

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Settings shared by the CLI and the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the posts API, without trailing slash.
    pub feed_url: String,
    /// Port the HTTP server listens on.
    pub port: u16,
    /// Timeout for a single posts API request.
    pub http_timeout: Duration,
    /// Reject malformed records instead of carrying degenerate values.
    pub strict: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            port: DEFAULT_PORT,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            strict: false,
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let feed_url = lookup("ROSTER_FEED_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.feed_url);

        let port = lookup("ROSTER_PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);

        let http_timeout = lookup("ROSTER_HTTP_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.http_timeout);

        let strict = lookup("ROSTER_STRICT")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.strict);

        Self {
            feed_url,
            port,
            http_timeout,
            strict,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[]));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.feed_url, DEFAULT_FEED_URL);
        assert_eq!(settings.port, 3000);
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("ROSTER_FEED_URL", "http://localhost:8080/"),
            ("ROSTER_PORT", "8000"),
            ("ROSTER_HTTP_TIMEOUT_SECS", "3"),
            ("ROSTER_STRICT", "yes"),
        ]));

        assert_eq!(settings.feed_url, "http://localhost:8080");
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.http_timeout, Duration::from_secs(3));
        assert!(settings.strict);
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let settings = Settings::from_lookup(lookup(&[
            ("ROSTER_PORT", "eighty"),
            ("ROSTER_HTTP_TIMEOUT_SECS", "-1"),
            ("ROSTER_STRICT", "maybe"),
        ]));

        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.http_timeout, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
        assert!(!settings.strict);
    }
}
