//! Configuration management for panelprobe
//!
//! Settings come from four layers, highest precedence first: CLI flags,
//! environment variables (both handled by clap), the YAML config file, and
//! the built-in defaults below.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Base URL probed when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Probe configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Admin panel base URL (scheme + host + optional port)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Treat duplicate-tolerant outcomes as failures
    #[serde(default)]
    pub strict: bool,

    /// Admin login used by the authentication checks
    #[serde(default)]
    pub credentials: Credentials,

    /// Server-side data the checks expect to find or create
    #[serde(default)]
    pub fixtures: Fixtures,
}

/// Admin credentials. Read-only: never serialized, and `Debug` masks the
/// password
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            email: "admin@gibbonnutrition.com".to_string(),
            password: "gibbonsecret".to_string(),
        }
    }
}

/// Identifiers of seeded or probe-created records
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixtures {
    /// Seeded order used by the order workflow checks
    pub order_id: String,

    /// Discount code created, updated and deleted by the discount checks
    pub discount_code: String,

    /// Promo code submitted to the validation endpoint
    pub promo_code: String,

    /// Address invited by the staff invite check
    pub staff_email: String,

    /// Product handle the review checks attach reviews to
    pub review_product: String,

    /// Name sent as the acting user in order/review mutations
    pub operator: String,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            order_id: "ORD-2024-001".to_string(),
            discount_code: "TEST20".to_string(),
            promo_code: "WELCOME10".to_string(),
            staff_email: "staff@test.com".to_string(),
            review_product: "whey-protein-chocolate".to_string(),
            operator: "Test Agent".to_string(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            strict: false,
            credentials: Credentials::default(),
            fixtures: Fixtures::default(),
        }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: Option<u64>,
    pub strict: bool,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".panelprobe").join("config.yaml"))
    }

    /// Resolve the config file location from an explicit path or the default
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration, falling back to defaults when no file exists.
    ///
    /// An explicitly requested file must exist; the default location is
    /// optional.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let resolved = Self::resolve_path(path)?;

        if !resolved.exists() {
            if path.is_some() {
                return Err(ConfigError::NotFound(resolved).into());
            }
            log::debug!(
                "No config file at {}, using built-in defaults",
                resolved.display()
            );
            return Ok(Self::default());
        }

        Self::load_from(&resolved)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply CLI/env overrides on top of the file values
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(ref url) = overrides.base_url {
            self.base_url = url.clone();
        }
        if let Some(ref email) = overrides.email {
            self.credentials.email = email.clone();
        }
        if let Some(ref password) = overrides.password {
            self.credentials.password = password.clone();
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.timeout_secs = timeout;
        }
        if overrides.strict {
            self.strict = true;
        }
    }

    /// Base URL without a trailing slash, ready for path concatenation
    pub fn normalized_base_url(&self) -> String {
        self.base_url.trim_end_matches('/').to_string()
    }

    /// Validate the resolved configuration before any request is made
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            ConfigError::Invalid(format!("base_url '{}': {}", self.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            ))
            .into());
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be positive".to_string()).into());
        }

        if self.credentials.email.trim().is_empty() || self.credentials.password.is_empty() {
            return Err(ConfigError::MissingCredentials.into());
        }

        Ok(())
    }
}
