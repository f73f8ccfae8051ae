use std::path::PathBuf;

use chrono_tz::Tz;

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./canteen-data | database and logs live here |
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | development / staging / production |
/// | UPI_ID | (unset) | payee VPA for UPI QR codes |
/// | PAYEE_NAME | Canteen | payee name shown by UPI apps |
/// | TIMEZONE | Asia/Kolkata | business time zone (IANA name) |
/// | QR_MODULE_SCALE | 8 | pixels per QR module in PNG output |
/// | LOG_LEVEL | info | tracing level |
/// | CANTEEN_ADMIN_ID | (unset) | bootstrap manager id |
/// | CANTEEN_ADMIN_PASSWORD | (unset) | bootstrap manager password |
/// | REQUEST_TIMEOUT_MS | 30000 | per-request timeout |
///
/// JWT settings (`JWT_SECRET`, `JWT_EXPIRATION_MINUTES`, `JWT_ISSUER`,
/// `JWT_AUDIENCE`) are read by [`JwtConfig::from_env`].
///
/// ```ignore
/// WORK_DIR=/srv/canteen UPI_ID=canteen@upi cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory (database/, logs/)
    pub work_dir: String,
    pub http_port: u16,
    pub jwt: JwtConfig,
    /// development | staging | production
    pub environment: String,
    /// UPI virtual payment address; payments are unavailable when unset
    pub upi_id: Option<String>,
    pub payee_name: String,
    pub timezone: Tz,
    pub qr_module_scale: u32,
    pub log_level: String,
    pub admin_id: Option<String>,
    pub admin_password: Option<String>,
    pub request_timeout_ms: u64,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let tz_name = env_or("TIMEZONE", "Asia/Kolkata");
        let timezone: Tz = tz_name
            .parse()
            .map_err(|_| ServerError::Config(format!("Unknown TIMEZONE '{tz_name}'")))?;

        Ok(Self {
            work_dir: env_or("WORK_DIR", "./canteen-data"),
            http_port: env_parse("HTTP_PORT", 3000),
            jwt: JwtConfig::from_env().map_err(|e| ServerError::Config(e.to_string()))?,
            environment: env_or("ENVIRONMENT", "development"),
            upi_id: env_opt("UPI_ID"),
            payee_name: env_or("PAYEE_NAME", "Canteen"),
            timezone,
            qr_module_scale: env_parse("QR_MODULE_SCALE", 8u32).clamp(1, 32),
            log_level: env_or("LOG_LEVEL", "info"),
            admin_id: env_opt("CANTEEN_ADMIN_ID"),
            admin_password: env_opt("CANTEEN_ADMIN_PASSWORD"),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS", 30_000),
        })
    }

    /// Self-contained configuration that ignores the environment
    ///
    /// Used by tests and embedders: fixed JWT secret, Asia/Kolkata time zone,
    /// a test payee.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        Self {
            work_dir: work_dir.into(),
            http_port,
            jwt: JwtConfig::with_secret("canteen-local-secret-for-tests-0123456789"),
            environment: "development".into(),
            upi_id: Some("canteen@upi".into()),
            payee_name: "Canteen".into(),
            timezone: chrono_tz::Asia::Kolkata,
            qr_module_scale: 4,
            log_level: "info".into(),
            admin_id: None,
            admin_password: None,
            request_timeout_ms: 30_000,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// work_dir/database
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// work_dir/database/canteen.db
    pub fn database_path(&self) -> PathBuf {
        self.database_dir().join("canteen.db")
    }

    /// work_dir/logs
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create work_dir/{database,logs} if missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_dir_layout() {
        let config = Config::with_overrides("/tmp/canteen", 3100);
        assert_eq!(config.database_path(), PathBuf::from("/tmp/canteen/database/canteen.db"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/canteen/logs"));
        assert!(config.is_development());
        assert!(!config.is_production());
    }

    #[test]
    fn test_ensure_work_dir_structure() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_overrides(dir.path().to_string_lossy(), 0);
        config.ensure_work_dir_structure().unwrap();
        assert!(config.database_dir().is_dir());
        assert!(config.log_dir().is_dir());
    }
}
