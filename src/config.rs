use anyhow::{Context, Result};
use chrono_tz::Tz;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    /// Zone used to anchor calendar-day bounds. Day filters like
    /// `start_date=2024-01-05` mean midnight-to-midnight in this zone, never
    /// in whatever zone the host happens to run in.
    pub query_tz: Tz,
    pub static_root: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env(cli_static_root: Option<PathBuf>) -> Result<Self> {
        let database_url = env_optional_string("MEASUREMENTS_DATABASE_URL")
            .context("MEASUREMENTS_DATABASE_URL must be set")?;

        let query_tz = resolve_query_tz(&env_string("MEASUREMENTS_QUERY_TIMEZONE", "UTC"))?;
        let static_root =
            cli_static_root.or_else(|| env_optional_path("MEASUREMENTS_STATIC_ROOT"));

        Ok(Self {
            database_url,
            query_tz,
            static_root,
        })
    }
}

/// Accepts any IANA zone name, or the special value `local` to adopt the
/// host zone. An unrecognized value fails startup instead of silently
/// falling back to UTC.
fn resolve_query_tz(raw: &str) -> Result<Tz> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("local") {
        let name = iana_time_zone::get_timezone()
            .context("failed to resolve the host timezone for MEASUREMENTS_QUERY_TIMEZONE=local")?;
        return name.parse::<Tz>().map_err(|_| {
            anyhow::anyhow!("host timezone {name:?} is not a recognized IANA zone")
        });
    }
    trimmed.parse::<Tz>().map_err(|_| {
        anyhow::anyhow!(
            "MEASUREMENTS_QUERY_TIMEZONE must be an IANA zone name or 'local', got {trimmed:?}"
        )
    })
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_optional_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_optional_path(key: &str) -> Option<PathBuf> {
    env_optional_string(key).map(PathBuf::from)
}
