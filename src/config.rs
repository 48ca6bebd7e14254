//! SMTP server configuration

use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Per-command reply timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// When to run the AUTH step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// Authenticate unless the host is `127.0.0.1` or `localhost`.
    #[default]
    Auto,
    /// Always authenticate.
    Always,
    /// Never authenticate.
    Never,
}

impl FromStr for AuthMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => Err(Error::Config(format!("Invalid SMTP_AUTH: {other}"))),
        }
    }
}

/// SMTP server connection details for a send.
#[derive(Debug, Clone)]
pub struct MailServer {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// PEM bundle of trusted CAs; only read when `use_tls` is set.
    pub ca_cert_path: PathBuf,
    pub use_tls: bool,
    pub auth: AuthMode,
    /// How long to wait for each server reply.
    pub timeout: Duration,
}

impl MailServer {
    /// Plaintext server with the default auth mode and no CA file.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            password: password.into(),
            ca_cert_path: PathBuf::new(),
            use_tls: false,
            auth: AuthMode::Auto,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Switch to implicit TLS, trusting only the CAs in `ca_cert_path`.
    #[must_use]
    pub fn with_tls(mut self, ca_cert_path: impl Into<PathBuf>) -> Self {
        self.use_tls = true;
        self.ca_cert_path = ca_cert_path.into();
        self
    }

    #[must_use]
    pub const fn with_auth(mut self, auth: AuthMode) -> Self {
        self.auth = auth;
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `host:port`, ready for dialing.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether the host is one of the loopback names that skip AUTH
    /// under [`AuthMode::Auto`].
    #[must_use]
    pub fn is_loopback(&self) -> bool {
        self.host == "127.0.0.1" || self.host == "localhost"
    }

    #[must_use]
    pub fn should_authenticate(&self) -> bool {
        match self.auth {
            AuthMode::Auto => !self.is_loopback(),
            AuthMode::Always => true,
            AuthMode::Never => false,
        }
    }

    /// Load SMTP configuration from environment variables
    ///
    /// Reads from `.env` file if present. Required variables:
    /// - `SMTP_USERNAME`
    /// - `SMTP_PASSWORD`
    ///
    /// Optional (with defaults):
    /// - `SMTP_HOST` (default: `127.0.0.1`)
    /// - `SMTP_PORT` (default: `25`)
    /// - `SMTP_USE_TLS` (default: `false`)
    /// - `SMTP_CA_CERT` (default: empty)
    /// - `SMTP_AUTH` (`auto`, `always` or `never`; default: `auto`)
    /// - `SMTP_TIMEOUT` (seconds; default: `60`)
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a required variable is missing or
    /// a value does not parse.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            host: env::var("SMTP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "25".to_string())
                .parse()
                .map_err(|e| Error::Config(format!("Invalid SMTP_PORT: {e}")))?,
            username: env::var("SMTP_USERNAME")
                .map_err(|_| Error::Config("SMTP_USERNAME not set".into()))?,
            password: env::var("SMTP_PASSWORD")
                .map_err(|_| Error::Config("SMTP_PASSWORD not set".into()))?,
            ca_cert_path: env::var("SMTP_CA_CERT").map(PathBuf::from).unwrap_or_default(),
            use_tls: env::var("SMTP_USE_TLS")
                .map_or(Ok(false), |v| parse_bool(&v))
                .map_err(|v| Error::Config(format!("Invalid SMTP_USE_TLS: {v}")))?,
            auth: env::var("SMTP_AUTH").map_or(Ok(AuthMode::Auto), |v| v.parse())?,
            timeout: env::var("SMTP_TIMEOUT").map_or(Ok(DEFAULT_TIMEOUT), |v| {
                v.trim()
                    .parse()
                    .map(Duration::from_secs)
                    .map_err(|e| Error::Config(format!("Invalid SMTP_TIMEOUT: {e}")))
            })?,
        })
    }
}

fn parse_bool(value: &str) -> std::result::Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(other.to_string()),
    }
}
