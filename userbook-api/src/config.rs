/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `API_CORS_ORIGINS`: Comma-separated allowed origins (default: *)
/// - `API_PRODUCTION`: Enables HSTS (default: false)
/// - `STORE_SHARDS`: Shard count of the in-memory user store (default: 16)
/// - `DOCS_ENABLED`: Serve the OpenAPI document at /api-docs (default: true)
/// - `DOCS_INCLUDE_PREFIX`: Only paths under this prefix are documented (default: /users)
/// - `DOCS_TITLE`: Title of the OpenAPI document
/// - `DOCS_DESCRIPTION`: Description of the OpenAPI document
/// - `DOCS_TERMS_OF_SERVICE`: Terms of service of the OpenAPI document
/// - `DOCS_CONTACT_EMAIL`: Contact email of the OpenAPI document (optional)
/// - `DOCS_LICENSE_NAME`: License name of the OpenAPI document
/// - `DOCS_LICENSE_URL`: License URL of the OpenAPI document
/// - `RUST_LOG`: Log level (default: userbook_api=debug,tower_http=debug)
///
/// # Example
///
/// ```no_run
/// use userbook_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use userbook_shared::store::memory::DEFAULT_SHARDS;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// User store configuration
    pub store: StoreConfig,

    /// API documentation configuration
    pub docs: DocsConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` allows any origin
    pub cors_origins: Vec<String>,

    /// Production mode (HTTPS deployments only)
    pub production: bool,
}

/// User store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Number of lock shards in the in-memory store
    pub shards: usize,
}

/// API documentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocsConfig {
    /// Whether `/api-docs` is mounted
    pub enabled: bool,

    /// Only routes whose path starts with this prefix are documented
    pub include_prefix: String,

    pub title: String,
    pub description: String,
    pub terms_of_service: String,
    pub contact_email: Option<String>,
    pub license_name: String,
    pub license_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: vec!["*".to_string()],
            production: false,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            shards: DEFAULT_SHARDS,
        }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            include_prefix: "/users".to_string(),
            title: "User Directory API".to_string(),
            description: "Endpoint for user management".to_string(),
            terms_of_service: "Provided as-is for evaluation".to_string(),
            contact_email: None,
            license_name: "AGPL-3.0".to_string(),
            license_url: Some("https://www.gnu.org/licenses/agpl-3.0.html".to_string()),
        }
    }
}

/// Reads and parses an environment variable, falling back to `default` when unset
fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value {:?}: {}", name, raw, e)),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a value that does not parse
    /// (e.g. `API_PORT=http`) or if `STORE_SHARDS` is zero.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let host = env::var("API_HOST").unwrap_or(defaults.api.host);
        let port = parse_var("API_PORT", defaults.api.port)?;
        let cors_origins = match env::var("API_CORS_ORIGINS") {
            Ok(raw) => parse_origins(&raw),
            Err(_) => defaults.api.cors_origins,
        };
        let production = parse_var("API_PRODUCTION", defaults.api.production)?;

        let shards = parse_var("STORE_SHARDS", defaults.store.shards)?;
        if shards == 0 {
            anyhow::bail!("STORE_SHARDS must be at least 1");
        }

        let docs = DocsConfig {
            enabled: parse_var("DOCS_ENABLED", defaults.docs.enabled)?,
            include_prefix: env::var("DOCS_INCLUDE_PREFIX")
                .unwrap_or(defaults.docs.include_prefix),
            title: env::var("DOCS_TITLE").unwrap_or(defaults.docs.title),
            description: env::var("DOCS_DESCRIPTION").unwrap_or(defaults.docs.description),
            terms_of_service: env::var("DOCS_TERMS_OF_SERVICE")
                .unwrap_or(defaults.docs.terms_of_service),
            contact_email: env::var("DOCS_CONTACT_EMAIL").ok(),
            license_name: env::var("DOCS_LICENSE_NAME").unwrap_or(defaults.docs.license_name),
            license_url: env::var("DOCS_LICENSE_URL")
                .ok()
                .or(defaults.docs.license_url),
        };

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
                production,
            },
            store: StoreConfig { shards },
            docs,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Whether any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.api.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
