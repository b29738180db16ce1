//! Gateway configuration loading.
//!
//! JSON is the sole config source. Default config path:
//! `/etc/sip2-gateway/config.json`, overridable via `SIP2_GATEWAY_CONFIG`.
//!
//! # Required fields
//! - `acs.host`, `acs.port`
//! - `login.user_id`, `login.password`, `login.location_code`

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub acs: AcsConfig,
    pub login: LoginConfig,
    pub pool: PoolConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone)]
pub struct AcsConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct LoginConfig {
    pub user_id: String,
    pub password: String,
    pub location_code: String,
}

#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub size: usize,
    pub connect_timeout_secs: u64,
    pub io_timeout_secs: u64,
    pub write_retries: u32,
    pub read_retries: u32,
    /// Whether a corrupted checksum on a response is fatal or logged and
    /// passed through as-is. Defaults to `true`: the original's config
    /// shape never documented a default, so this favors rejecting
    /// untrustworthy frames over silently accepting them.
    pub error_detection: bool,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub bind: String,
}

pub const DEFAULT_CONFIG_PATH: &str = "/etc/sip2-gateway/config.json";
pub const CONFIG_PATH_ENV: &str = "SIP2_GATEWAY_CONFIG";

#[derive(Debug, Deserialize)]
struct RawConfig {
    acs: Option<RawAcsConfig>,
    login: Option<RawLoginConfig>,
    pool: Option<RawPoolConfig>,
    http: Option<RawHttpConfig>,
}

#[derive(Debug, Deserialize)]
struct RawAcsConfig {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct RawLoginConfig {
    user_id: Option<String>,
    password: Option<String>,
    location_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPoolConfig {
    size: Option<usize>,
    connect_timeout_secs: Option<u64>,
    io_timeout_secs: Option<u64>,
    write_retries: Option<u32>,
    read_retries: Option<u32>,
    error_detection: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawHttpConfig {
    bind: Option<String>,
}

pub fn load_config() -> Result<GatewayConfig, ConfigError> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());
    load_config_from_path(Path::new(&path))
}

pub fn load_config_from_path(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let json_str = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Io(format!("reading config file '{}': {e}", path.display())))?;
    load_config_from_str(&json_str)
}

pub fn load_config_from_str(json_str: &str) -> Result<GatewayConfig, ConfigError> {
    let raw: RawConfig = serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))?;

    let raw_acs = raw.acs.ok_or_else(|| ConfigError::MissingField("acs".to_owned()))?;
    let acs = AcsConfig {
        host: raw_acs.host.ok_or_else(|| ConfigError::MissingField("acs.host".to_owned()))?,
        port: raw_acs.port.ok_or_else(|| ConfigError::MissingField("acs.port".to_owned()))?,
    };

    let raw_login = raw.login.ok_or_else(|| ConfigError::MissingField("login".to_owned()))?;
    let login = LoginConfig {
        user_id: raw_login.user_id.ok_or_else(|| ConfigError::MissingField("login.user_id".to_owned()))?,
        password: raw_login.password.ok_or_else(|| ConfigError::MissingField("login.password".to_owned()))?,
        location_code: raw_login
            .location_code
            .ok_or_else(|| ConfigError::MissingField("login.location_code".to_owned()))?,
    };

    let pool = match raw.pool {
        Some(p) => PoolConfig {
            size: p.size.unwrap_or(4),
            connect_timeout_secs: p.connect_timeout_secs.unwrap_or(5),
            io_timeout_secs: p.io_timeout_secs.unwrap_or(5),
            write_retries: p.write_retries.unwrap_or(3),
            read_retries: p.read_retries.unwrap_or(3),
            error_detection: p.error_detection.unwrap_or(true),
        },
        None => PoolConfig {
            size: 4,
            connect_timeout_secs: 5,
            io_timeout_secs: 5,
            write_retries: 3,
            read_retries: 3,
            error_detection: true,
        },
    };

    let http = match raw.http {
        Some(h) => HttpConfig { bind: h.bind.unwrap_or_else(|| "0.0.0.0:8080".to_owned()) },
        None => HttpConfig { bind: "0.0.0.0:8080".to_owned() },
    };

    if pool.size == 0 {
        return Err(ConfigError::InvalidValue("pool.size must be at least 1".to_owned()));
    }

    Ok(GatewayConfig { acs, login, pool, http })
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("missing required field: {0}")]
    MissingField(String),
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "acs": {"host": "acs.example.org", "port": 6002},
        "login": {"user_id": "scuser", "password": "scpass", "location_code": "branch1"}
    }"#;

    #[test]
    fn minimal_config_fills_in_defaults() {
        let cfg = load_config_from_str(MINIMAL).unwrap();
        assert_eq!(cfg.acs.host, "acs.example.org");
        assert_eq!(cfg.pool.size, 4);
        assert!(cfg.pool.error_detection);
        assert_eq!(cfg.http.bind, "0.0.0.0:8080");
    }

    #[test]
    fn missing_required_field_is_reported() {
        let err = load_config_from_str(r#"{"login": {"user_id":"a","password":"b","location_code":"c"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(field) if field == "acs"));
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let json = r#"{
            "acs": {"host": "h", "port": 1},
            "login": {"user_id": "a", "password": "b", "location_code": "c"},
            "pool": {"size": 0}
        }"#;
        assert!(matches!(load_config_from_str(json), Err(ConfigError::InvalidValue(_))));
    }
}
