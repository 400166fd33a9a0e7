use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::scoring::ScoringPolicy;

const ENV_STAGE: &str = "APP_ENV";
const ENV_HOST: &str = "APP_HOST";
const ENV_PORT: &str = "APP_PORT";
const ENV_LOG_LEVEL: &str = "APP_LOG_LEVEL";
const ENV_ABSENT_CRITICAL_FAILS: &str = "SCORING_ABSENT_CRITICAL_FAILS";
const ENV_ROLLING_WINDOW_DAYS: &str = "SCORING_ROLLING_WINDOW_DAYS";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Deployment stage; only development gets colourised logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Development;
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    fn wants_ansi(self) -> bool {
        matches!(self, Self::Development)
    }
}

fn env_value(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// Top-level configuration for the scoring service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringPolicy,
}

impl AppConfig {
    /// Reads `.env` (when present) and then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::parse(env_value(ENV_STAGE).as_deref());
        let server = ServerConfig {
            host: env_value(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: match env_value(ENV_PORT) {
                Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort)?,
                None => DEFAULT_PORT,
            },
        };
        let telemetry = TelemetryConfig {
            log_level: env_value(ENV_LOG_LEVEL).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            ansi: environment.wants_ansi(),
        };

        Ok(Self {
            environment,
            server,
            telemetry,
            scoring: scoring_policy_from_env()?,
        })
    }
}

fn scoring_policy_from_env() -> Result<ScoringPolicy, ConfigError> {
    let defaults = ScoringPolicy::default();

    let absent_critical_section_fails = match env_value(ENV_ABSENT_CRITICAL_FAILS) {
        Some(value) => parse_flag(&value).ok_or(ConfigError::InvalidFlag {
            name: ENV_ABSENT_CRITICAL_FAILS,
            value,
        })?,
        None => defaults.absent_critical_section_fails,
    };

    let rolling_window_days = match env_value(ENV_ROLLING_WINDOW_DAYS) {
        Some(value) => value
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|days| *days > 0)
            .ok_or(ConfigError::InvalidRollingWindow)?,
        None => defaults.rolling_window_days,
    };

    Ok(ScoringPolicy {
        absent_critical_section_fails,
        rolling_window_days,
    })
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Address the HTTP adapter binds to.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Resolves the bind address. `localhost` maps to the IPv4 loopback.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = match self.host.trim() {
            host if host.eq_ignore_ascii_case("localhost") => IpAddr::V4(Ipv4Addr::LOCALHOST),
            host => host
                .parse::<IpAddr>()
                .map_err(|source| ConfigError::InvalidHost { source })?,
        };
        Ok(SocketAddr::from((ip, self.port)))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    /// Colourised output, only enabled for local development.
    pub ansi: bool,
}

/// Rejected environment values.
#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidFlag { name: &'static str, value: String },
    InvalidRollingWindow,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "{ENV_PORT} must be a port number (0-65535)"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "{ENV_HOST} must be `localhost` or an IP address")
            }
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be true or false, got '{value}'")
            }
            ConfigError::InvalidRollingWindow => {
                write!(f, "{ENV_ROLLING_WINDOW_DAYS} must be a positive number of days")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let ConfigError::InvalidHost { source } = self {
            Some(source)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard, OnceLock};

    const ALL_VARS: [&str; 6] = [
        ENV_STAGE,
        ENV_HOST,
        ENV_PORT,
        ENV_LOG_LEVEL,
        ENV_ABSENT_CRITICAL_FAILS,
        ENV_ROLLING_WINDOW_DAYS,
    ];

    /// Serialises env-mutating tests and starts each from a clean slate.
    fn clean_env() -> MutexGuard<'static, ()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        let lock = GUARD
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for name in ALL_VARS {
            env::remove_var(name);
        }
        lock
    }

    #[test]
    fn defaults_apply_without_environment() {
        let _env = clean_env();
        let config = AppConfig::load().expect("config loads with defaults");

        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.telemetry.ansi);
        assert_eq!(config.scoring, ScoringPolicy::default());
    }

    #[test]
    fn localhost_binds_to_loopback() {
        let _env = clean_env();
        env::set_var(ENV_HOST, "localhost");
        env::set_var(ENV_PORT, "8088");

        let addr = AppConfig::load()
            .expect("config loads")
            .server
            .socket_addr()
            .expect("localhost resolves");

        assert_eq!(addr, SocketAddr::from(([127, 0, 0, 1], 8088)));
        env::remove_var(ENV_HOST);
        env::remove_var(ENV_PORT);
    }

    #[test]
    fn hostnames_other_than_localhost_are_rejected() {
        let server = ServerConfig {
            host: "inspections.internal".to_string(),
            port: 3000,
        };
        let error = server.socket_addr().expect_err("hostname rejected");

        assert!(matches!(error, ConfigError::InvalidHost { .. }));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn scoring_policy_reads_overrides() {
        let _env = clean_env();
        env::set_var(ENV_STAGE, "production");
        env::set_var(ENV_ABSENT_CRITICAL_FAILS, "off");
        env::set_var(ENV_ROLLING_WINDOW_DAYS, "14");

        let config = AppConfig::load().expect("config loads");

        assert_eq!(config.environment, AppEnvironment::Production);
        assert!(!config.telemetry.ansi);
        assert!(!config.scoring.absent_critical_section_fails);
        assert_eq!(config.scoring.rolling_window_days, 14);
        for name in ALL_VARS {
            env::remove_var(name);
        }
    }

    #[test]
    fn rejects_invalid_values() {
        let _env = clean_env();

        env::set_var(ENV_PORT, "70000");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidPort)));
        env::remove_var(ENV_PORT);

        env::set_var(ENV_ABSENT_CRITICAL_FAILS, "sometimes");
        let error = AppConfig::load().expect_err("flag rejected");
        assert!(matches!(
            error,
            ConfigError::InvalidFlag {
                name: ENV_ABSENT_CRITICAL_FAILS,
                ..
            }
        ));
        env::remove_var(ENV_ABSENT_CRITICAL_FAILS);

        env::set_var(ENV_ROLLING_WINDOW_DAYS, "0");
        let error = AppConfig::load().expect_err("window rejected");
        assert!(matches!(error, ConfigError::InvalidRollingWindow));
        assert_eq!(
            error.to_string(),
            "SCORING_ROLLING_WINDOW_DAYS must be a positive number of days"
        );
        env::remove_var(ENV_ROLLING_WINDOW_DAYS);
    }
}
