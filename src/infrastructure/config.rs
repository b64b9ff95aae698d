use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::errors::DomainError;
use crate::infrastructure::persistence::file_system::read_json_file;

pub const CONFIG_PATH_VAR: &str = "CATALOG_CONFIG";
pub const BIND_ADDRESS_VAR: &str = "CATALOG_BIND_ADDRESS";
pub const DATA_ROOT_VAR: &str = "CATALOG_DATA_ROOT";

const DEFAULT_CONFIG_FILE: &str = "catalog.json";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8787";
const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_UPLOAD_CHUNK_SIZE: usize = 256 * 1024;
const DEFAULT_NOTIFICATION_CAPACITY: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalBackendConfig {
    /// Prefix of every public object URL, e.g. `http://127.0.0.1:8787/storage`
    pub public_base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirebaseConfig {
    pub project_id: String,
    pub api_key: String,
    pub storage_bucket: String,
}

/// Where documents and images are kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
    Local(LocalBackendConfig),
    Firebase(FirebaseConfig),
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::Local(LocalBackendConfig {
            public_base_url: public_base_url_for(DEFAULT_BIND_ADDRESS),
        })
    }
}

/// Storage URL served by this process when listening on `bind_address`.
/// A wildcard address is reached through loopback.
fn public_base_url_for(bind_address: &str) -> String {
    let host = match bind_address.parse::<SocketAddr>() {
        Ok(address) if address.ip().is_unspecified() => {
            format!("{}:{}", Ipv4Addr::LOCALHOST, address.port())
        }
        _ => bind_address.to_string(),
    };
    format!("http://{}/storage", host)
}

/// Where the loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file at the path, defaults were used
    Defaults(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_address: String,
    pub data_root: PathBuf,
    pub log_dir: PathBuf,
    pub max_image_bytes: usize,
    pub upload_chunk_size: usize,
    pub notification_capacity: usize,
    pub backend: BackendConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            data_root: PathBuf::from("data"),
            log_dir: PathBuf::from("logs"),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            upload_chunk_size: DEFAULT_UPLOAD_CHUNK_SIZE,
            notification_capacity: DEFAULT_NOTIFICATION_CAPACITY,
            backend: BackendConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `CATALOG_CONFIG` or `catalog.json`, apply environment
    /// overrides and validate
    pub async fn load() -> Result<(Self, ConfigSource), DomainError> {
        let path = std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let (mut config, source) = Self::from_file(&path).await?;
        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok((config, source))
    }

    /// A missing file yields the defaults
    pub async fn from_file(path: &Path) -> Result<(Self, ConfigSource), DomainError> {
        match read_json_file::<Self>(path).await {
            Ok(config) => Ok((config, ConfigSource::File(path.to_path_buf()))),
            Err(DomainError::NotFound(_)) => {
                Ok((Self::default(), ConfigSource::Defaults(path.to_path_buf())))
            }
            Err(error) => Err(error),
        }
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(address) = lookup(BIND_ADDRESS_VAR).filter(|value| !value.trim().is_empty()) {
            self.bind_address = address.trim().to_string();
        }
        if let Some(root) = lookup(DATA_ROOT_VAR).filter(|value| !value.trim().is_empty()) {
            self.data_root = PathBuf::from(root.trim());
        }
        self.follow_bind_address();
    }

    /// An untouched local storage URL tracks the final bind address
    fn follow_bind_address(&mut self) {
        if let BackendConfig::Local(local) = &mut self.backend {
            if local.public_base_url == public_base_url_for(DEFAULT_BIND_ADDRESS) {
                local.public_base_url = public_base_url_for(&self.bind_address);
            }
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.bind_address.trim().is_empty() {
            return Err(DomainError::InvalidData(
                "bind_address cannot be empty".to_string(),
            ));
        }
        if self.upload_chunk_size == 0 {
            return Err(DomainError::InvalidData(
                "upload_chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.max_image_bytes == 0 {
            return Err(DomainError::InvalidData(
                "max_image_bytes must be greater than zero".to_string(),
            ));
        }

        match &self.backend {
            BackendConfig::Local(local) => {
                Url::parse(&local.public_base_url).map_err(|error| {
                    DomainError::InvalidData(format!(
                        "Invalid public_base_url '{}': {}",
                        local.public_base_url, error
                    ))
                })?;
            }
            BackendConfig::Firebase(firebase) => {
                let fields = [
                    ("project_id", &firebase.project_id),
                    ("api_key", &firebase.api_key),
                    ("storage_bucket", &firebase.storage_bucket),
                ];
                if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
                    return Err(DomainError::InvalidData(format!(
                        "Firebase {} cannot be empty",
                        name
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::random;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join(format!("sports-catalog-config-{}.json", random::<u64>()));

        let (config, source) = AppConfig::from_file(&path).await.expect("defaults");

        assert_eq!(source, ConfigSource::Defaults(path));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.max_image_bytes, 10 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn firebase_backend_parses_from_tagged_json() {
        let config: AppConfig = serde_json::from_value(json!({
            "bind_address": "0.0.0.0:9000",
            "backend": {
                "kind": "firebase",
                "project_id": "league-app",
                "api_key": "key-123",
                "storage_bucket": "league-app.appspot.com"
            }
        }))
        .expect("config should parse");

        assert_eq!(config.bind_address, "0.0.0.0:9000");
        assert_eq!(config.upload_chunk_size, 256 * 1024);
        assert!(matches!(
            &config.backend,
            BackendConfig::Firebase(firebase) if firebase.project_id == "league-app"
        ));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn overrides_replace_address_and_data_root() {
        let mut config = AppConfig::default();

        config.apply_overrides(|name| match name {
            BIND_ADDRESS_VAR => Some("0.0.0.0:8080".to_string()),
            DATA_ROOT_VAR => Some("  ".to_string()),
            _ => None,
        });

        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.data_root, PathBuf::from("data"));
        assert_eq!(
            config.backend,
            BackendConfig::Local(LocalBackendConfig {
                public_base_url: "http://127.0.0.1:8080/storage".to_string(),
            })
        );
    }

    #[test]
    fn explicit_public_base_url_survives_address_override() {
        let mut config = AppConfig {
            backend: BackendConfig::Local(LocalBackendConfig {
                public_base_url: "https://cdn.example/storage".to_string(),
            }),
            ..AppConfig::default()
        };

        config.apply_overrides(|name| {
            (name == BIND_ADDRESS_VAR).then(|| "10.0.0.5:9000".to_string())
        });

        assert_eq!(config.bind_address, "10.0.0.5:9000");
        assert_eq!(
            config.backend,
            BackendConfig::Local(LocalBackendConfig {
                public_base_url: "https://cdn.example/storage".to_string(),
            })
        );
        assert_eq!(
            public_base_url_for("10.0.0.5:9000"),
            "http://10.0.0.5:9000/storage"
        );
    }

    #[test]
    fn validation_rejects_bad_values() {
        let zero_chunk = AppConfig {
            upload_chunk_size: 0,
            ..AppConfig::default()
        };
        assert!(zero_chunk.validate().is_err());

        let bad_url = AppConfig {
            backend: BackendConfig::Local(LocalBackendConfig {
                public_base_url: "not a url".to_string(),
            }),
            ..AppConfig::default()
        };
        assert!(bad_url.validate().is_err());

        let blank_key = AppConfig {
            backend: BackendConfig::Firebase(FirebaseConfig {
                project_id: "league-app".to_string(),
                api_key: " ".to_string(),
                storage_bucket: "bucket".to_string(),
            }),
            ..AppConfig::default()
        };
        assert!(matches!(
            blank_key.validate(),
            Err(DomainError::InvalidData(message)) if message.contains("api_key")
        ));
    }
}
