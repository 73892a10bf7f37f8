use std::env;

use tracing::warn;

pub const DEFAULT_INSTITUTION: &str = "University of Chicago";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_UPLOAD_MB: usize = 32;

/// Service settings read from the environment (after `.env` is loaded).
///
/// - `PUBTRACK_INSTITUTION`: text marking the tracked institution in affiliations
/// - `PUBTRACK_BIND`: listen address
/// - `PUBTRACK_MAX_UPLOAD_MB`: request body limit for uploads
#[derive(Debug, Clone)]
pub struct Settings {
    pub institution: String,
    pub bind_addr: String,
    pub max_upload_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            institution: DEFAULT_INSTITUTION.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let defaults = Settings::default();

        let max_upload_mb = match env::var("PUBTRACK_MAX_UPLOAD_MB") {
            Ok(raw) => raw.trim().parse::<usize>().unwrap_or_else(|_| {
                warn!(value = %raw, "PUBTRACK_MAX_UPLOAD_MB is not a number, using default");
                DEFAULT_MAX_UPLOAD_MB
            }),
            Err(_) => DEFAULT_MAX_UPLOAD_MB,
        };

        Self {
            institution: non_empty_var("PUBTRACK_INSTITUTION").unwrap_or(defaults.institution),
            bind_addr: non_empty_var("PUBTRACK_BIND").unwrap_or(defaults.bind_addr),
            max_upload_bytes: max_upload_mb * 1024 * 1024,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
