use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_base_url: String,
    pub assets_dir: PathBuf,
    pub session_ttl: Duration,
    pub cookie_secure: bool,
    pub api_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            api_base_url: "http://localhost:8080/api".into(),
            assets_dir: PathBuf::from("./assets"),
            session_ttl: Duration::from_secs(120 * 60),
            cookie_secure: false,
            api_timeout: Duration::from_secs(15),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from `TCU_*` variables; unset ones keep their defaults, malformed
    /// numbers are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Config::default();

        if let Some(v) = lookup("TCU_HOST") {
            config.host = v;
        }
        if let Some(v) = lookup("TCU_PORT") {
            config.port = parse("TCU_PORT", &v)?;
        }
        if let Some(v) = lookup("TCU_API_BASE_URL") {
            config.api_base_url = v;
        }
        if let Some(v) = lookup("TCU_ASSETS_DIR") {
            config.assets_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("TCU_SESSION_TTL_MINUTES") {
            let minutes: u64 = parse("TCU_SESSION_TTL_MINUTES", &v)?;
            if minutes == 0 {
                anyhow::bail!("TCU_SESSION_TTL_MINUTES must be at least 1");
            }
            let secs = minutes
                .checked_mul(60)
                .with_context(|| format!("TCU_SESSION_TTL_MINUTES is too large, got {}", minutes))?;
            config.session_ttl = Duration::from_secs(secs);
        }
        if let Some(v) = lookup("TCU_COOKIE_SECURE") {
            config.cookie_secure = parse_bool("TCU_COOKIE_SECURE", &v)?;
        }
        if let Some(v) = lookup("TCU_API_TIMEOUT_SECS") {
            config.api_timeout = Duration::from_secs(parse("TCU_API_TIMEOUT_SECS", &v)?);
        }

        Ok(config)
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

fn parse<T>(key: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().with_context(|| format!("{} must be a number, got {:?}", key, value))
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => anyhow::bail!("{} must be true or false, got {:?}", key, value),
    }
}
