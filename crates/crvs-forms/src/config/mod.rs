use crate::forms::address::{AddressSettings, AdminLevelDepth};
use crate::forms::FormConfigError;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

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
    pub forms: FormsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3040".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let admin_levels = env::var("ADMIN_LEVELS")
            .unwrap_or_else(|_| "2".to_string())
            .trim()
            .parse::<u8>()
            .map_err(|_| ConfigError::InvalidAdminLevels { source: None })?;
        let admin_levels = AdminLevelDepth::new(admin_levels)
            .map_err(|source| ConfigError::InvalidAdminLevels {
                source: Some(source),
            })?;

        let default_country = env::var("DEFAULT_COUNTRY").unwrap_or_else(|_| "FAR".to_string());
        let default_country = default_country.trim().to_ascii_uppercase();
        if default_country.len() != 3 || !default_country.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(ConfigError::InvalidCountry(default_country));
        }

        let base_dir = PathBuf::from(env::var("FORMS_DIR").unwrap_or_else(|_| "forms".to_string()));
        let address_configuration = env::var("ADDRESS_CONFIG_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            forms: FormsConfig {
                admin_levels,
                default_country,
                base_dir,
                address_configuration,
            },
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

/// Inputs for composing the registration forms.
#[derive(Debug, Clone)]
pub struct FormsConfig {
    pub admin_levels: AdminLevelDepth,
    /// ISO 3166-1 alpha-3 code of the country the forms are deployed in.
    pub default_country: String,
    /// Directory holding `birth.json`, `death.json` and `marriage.json`.
    pub base_dir: PathBuf,
    /// Optional JSON file replacing the built-in address configuration.
    pub address_configuration: Option<PathBuf>,
}

impl FormsConfig {
    pub fn address_settings(&self) -> AddressSettings {
        AddressSettings::new(self.admin_levels, self.default_country.clone())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidAdminLevels { source: Option<FormConfigError> },
    InvalidCountry(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidAdminLevels { .. } => {
                write!(f, "ADMIN_LEVELS must be an integer between 1 and 5")
            }
            ConfigError::InvalidCountry(value) => write!(
                f,
                "DEFAULT_COUNTRY must be a three letter country code, got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidCountry(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidAdminLevels { source } => source
                .as_ref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
        }
    }
}
