//! Configuration constants and env-driven settings for the path report

use std::time::Duration;

/// Login endpoint path
pub const LOGIN_PATH: &str = "/api/aaaLogin.json";

/// Class query endpoint prefix
pub const CLASS_PATH: &str = "/api/node/class";

/// Cookie carrying the session token on class reads
pub const SESSION_COOKIE_NAME: &str = "APIC-cookie";

/// Envelope key wrapping every REST response's object list
pub const RESPONSE_ENVELOPE_KEY: &str = "imdata";

/// Per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Prefix stripped from BD DNs in the report
pub const DN_PREFIX: &str = "uni/";

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse_u64(name: &str, default: u64, min: u64, max: u64) -> u64 {
    match env_var(name).and_then(|v| v.parse::<u64>().ok()) {
        Some(v) => v.clamp(min, max),
        None => default,
    }
}

fn env_parse_bool(name: &str, default: bool) -> bool {
    match env_var(name) {
        Some(value) => {
            let normalized = value.to_ascii_lowercase();
            match normalized.as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => default,
            }
        }
        None => default,
    }
}

pub const MIN_TIMEOUT_MS: u64 = 500;
pub const MAX_TIMEOUT_MS: u64 = 120_000;

/// Clamp a user-supplied timeout into the accepted range.
pub fn clamp_timeout_ms(ms: u64) -> u64 {
    ms.clamp(MIN_TIMEOUT_MS, MAX_TIMEOUT_MS)
}

/// Runtime settings (env-driven, overridable from the command line).
#[derive(Debug, Clone)]
pub struct ApicSettings {
    /// Env: `EPG_PATHS_HOST`
    pub host: Option<String>,
    /// Env: `EPG_PATHS_USER`
    pub username: Option<String>,
    /// Env: `EPG_PATHS_PASSWORD`
    pub password: Option<String>,
    /// Env: `EPG_PATHS_TIMEOUT_MS`
    pub timeout_ms: u64,
    /// Skip TLS certificate validation (self-signed leaf certificates).
    /// Env: `EPG_PATHS_INSECURE`
    pub insecure: bool,
    /// Env: `EPG_PATHS_DN_PREFIX`
    pub dn_prefix: String,
}

impl Default for ApicSettings {
    fn default() -> Self {
        Self {
            host: None,
            username: None,
            password: None,
            timeout_ms: REQUEST_TIMEOUT.as_millis() as u64,
            insecure: false,
            dn_prefix: DN_PREFIX.to_string(),
        }
    }
}

impl ApicSettings {
    pub fn from_env() -> Self {
        Self {
            host: env_var("EPG_PATHS_HOST"),
            username: env_var("EPG_PATHS_USER"),
            password: env_var("EPG_PATHS_PASSWORD"),
            timeout_ms: env_parse_u64(
                "EPG_PATHS_TIMEOUT_MS",
                REQUEST_TIMEOUT.as_millis() as u64,
                MIN_TIMEOUT_MS,
                MAX_TIMEOUT_MS,
            ),
            insecure: env_parse_bool("EPG_PATHS_INSECURE", false),
            dn_prefix: env_var("EPG_PATHS_DN_PREFIX").unwrap_or_else(|| DN_PREFIX.to_string()),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
