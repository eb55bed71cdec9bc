//! Configuration loaded from the environment (and `.env`).

use crate::application::catalog::UrlPolicy;
use crate::domain::user::UserAccount;
use std::env;
use std::path::PathBuf;

const DEFAULT_USERS: &str = "admin:pass:admin+user,user0:pass:user";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Which `VideoRepository` backs the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Redis,
}

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    /// HTTP server bind address
    pub addr: String,
    /// HTTP server port
    pub port: u16,
    pub store: StoreKind,
    /// Redis connection URL, used when `store` is `Redis`
    pub redis_url: String,
    /// Directory holding uploaded video payloads
    pub data_dir: PathBuf,
    pub url_policy: UrlPolicy,
    /// Overrides the request's Host when deriving data urls
    pub public_base_url: Option<String>,
    pub users: Vec<UserAccount>,
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let port: u16 = var("PORT", "8080").parse().map_err(|e| ConfigError::Invalid {
            key: "PORT",
            message: format!("{}", e),
        })?;

        let store = match var("STORE", "memory").to_ascii_lowercase().as_str() {
            "memory" => StoreKind::Memory,
            "redis" => StoreKind::Redis,
            other => {
                return Err(ConfigError::Invalid {
                    key: "STORE",
                    message: format!("expected memory or redis, got {:?}", other),
                })
            }
        };

        let url_policy = match var("URL_POLICY", "derived").to_ascii_lowercase().as_str() {
            "derived" => UrlPolicy::Derived,
            "client" => UrlPolicy::CallerSupplied,
            other => {
                return Err(ConfigError::Invalid {
                    key: "URL_POLICY",
                    message: format!("expected derived or client, got {:?}", other),
                })
            }
        };

        let users = UserAccount::parse_list(&var("USERS", DEFAULT_USERS))
            .map_err(|message| ConfigError::Invalid { key: "USERS", message })?;

        Ok(Self {
            addr: var("ADDR", "127.0.0.1"),
            port,
            store,
            redis_url: var("REDIS_URL", "redis://127.0.0.1/"),
            data_dir: PathBuf::from(var("DATA_DIR", "./videos")),
            url_policy,
            public_base_url: lookup("PUBLIC_BASE_URL").filter(|url| !url.is_empty()),
            users,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<CatalogConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CatalogConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.url_policy, UrlPolicy::Derived);
        assert_eq!(config.data_dir, PathBuf::from("./videos"));
        assert!(config.public_base_url.is_none());
        assert_eq!(config.users.len(), 2);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "3000"),
            ("STORE", "Redis"),
            ("URL_POLICY", "client"),
            ("PUBLIC_BASE_URL", "https://videos.example.com"),
            ("USERS", "root:toor:admin"),
        ])
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.store, StoreKind::Redis);
        assert_eq!(config.url_policy, UrlPolicy::CallerSupplied);
        assert_eq!(
            config.public_base_url.as_deref(),
            Some("https://videos.example.com")
        );
        assert_eq!(config.users[0].name, "root");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
        assert!(matches!(
            load(&[("STORE", "postgres")]),
            Err(ConfigError::Invalid { key: "STORE", .. })
        ));
        assert!(matches!(
            load(&[("USERS", "admin")]),
            Err(ConfigError::Invalid { key: "USERS", .. })
        ));
    }
}
