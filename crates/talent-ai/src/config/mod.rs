use std::env;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub operators: Vec<OperatorCredential>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let operators = match env::var("APP_OPERATOR_TOKENS") {
            Ok(raw) => parse_operator_tokens(&raw)?,
            Err(_) => vec![OperatorCredential::development_default()],
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            operators,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// One entry of the static operator roster used by the console auth gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorCredential {
    pub token: String,
    pub operator_id: String,
    pub display_name: String,
}

impl OperatorCredential {
    /// Installed when `APP_OPERATOR_TOKENS` is unset so the console is
    /// drivable out of the box. Production deployments override the roster.
    pub fn development_default() -> Self {
        Self {
            token: "dev-token".to_string(),
            operator_id: "op-dev".to_string(),
            display_name: "Dev Operator".to_string(),
        }
    }
}

/// Parses `token:operator_id:Display Name` entries separated by commas.
fn parse_operator_tokens(raw: &str) -> Result<Vec<OperatorCredential>, ConfigError> {
    let mut roster = Vec::new();

    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        let mut parts = entry.splitn(3, ':');
        let token = parts.next().unwrap_or_default().trim();
        let operator_id = parts.next().unwrap_or_default().trim();
        let display_name = parts.next().unwrap_or_default().trim();

        if token.is_empty() || operator_id.is_empty() || display_name.is_empty() {
            return Err(ConfigError::InvalidOperatorToken {
                entry: entry.to_string(),
            });
        }

        roster.push(OperatorCredential {
            token: token.to_string(),
            operator_id: operator_id.to_string(),
            display_name: display_name.to_string(),
        });
    }

    if roster.is_empty() {
        return Err(ConfigError::InvalidOperatorToken {
            entry: raw.to_string(),
        });
    }

    Ok(roster)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a valid u16")]
    InvalidPort,
    #[error("APP_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost { source: std::net::AddrParseError },
    #[error("APP_OPERATOR_TOKENS entry '{entry}' must be 'token:operator_id:Display Name'")]
    InvalidOperatorToken { entry: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_OPERATOR_TOKENS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(
            config.operators,
            vec![OperatorCredential::development_default()]
        );
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn parses_operator_roster() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var(
            "APP_OPERATOR_TOKENS",
            "tok-a:op-1:Ava Reviewer, tok-b:op-2:Ben Screener",
        );
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.operators.len(), 2);
        assert_eq!(config.operators[0].token, "tok-a");
        assert_eq!(config.operators[1].operator_id, "op-2");
        assert_eq!(config.operators[1].display_name, "Ben Screener");
    }

    #[test]
    fn rejects_malformed_roster_entry() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_OPERATOR_TOKENS", "tok-a:op-1");
        match AppConfig::load() {
            Err(ConfigError::InvalidOperatorToken { entry }) => {
                assert_eq!(entry, "tok-a:op-1");
            }
            other => panic!("expected roster error, got {other:?}"),
        }
    }
}
