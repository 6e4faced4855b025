use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// PostgreSQL connection string; empty selects the in-memory stores
    #[serde(default)]
    pub database_url: String,

    /// Shared secret for the cron drain endpoint; empty disables it
    /// (requests fail closed with 401)
    #[serde(default)]
    pub cron_secret: String,

    /// Absolute origin used in robots.txt and sitemap.xml
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    #[serde(default)]
    pub push: PushConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Push-messaging provider settings.
///
/// All fields are absent-safe: the provider is an external collaborator and
/// nothing here fails when it is unconfigured. The `public_*` variants are
/// the values exposed to browser clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushConfig {
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub cluster: String,
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub public_cluster: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: String::new(),
            cron_secret: String::new(),
            public_base_url: default_public_base_url(),
            push: PushConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)?
        } else {
            // Default to YAML
            serde_yaml::from_str(&contents)?
        };

        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("TOURBASE_HOST") {
            self.host = val;
        }

        if let Ok(val) = std::env::var("TOURBASE_PORT") {
            if let Ok(port) = val.parse::<u16>() {
                self.port = port;
            }
        }

        if let Ok(val) = std::env::var("DATABASE_URL") {
            self.database_url = val;
        }

        if let Ok(val) = std::env::var("CRON_SECRET") {
            self.cron_secret = val;
        }

        if let Ok(val) = std::env::var("TOURBASE_PUBLIC_BASE_URL") {
            self.public_base_url = val;
        }

        // Push provider settings (no TOURBASE_ prefix for these)
        if let Ok(val) = std::env::var("PUSH_APP_ID") {
            self.push.app_id = val;
        }
        if let Ok(val) = std::env::var("PUSH_KEY") {
            self.push.key = val;
        }
        if let Ok(val) = std::env::var("PUSH_SECRET") {
            self.push.secret = val;
        }
        if let Ok(val) = std::env::var("PUSH_CLUSTER") {
            self.push.cluster = val;
        }
        if let Ok(val) = std::env::var("PUBLIC_PUSH_KEY") {
            self.push.public_key = val;
        }
        if let Ok(val) = std::env::var("PUBLIC_PUSH_CLUSTER") {
            self.push.public_cluster = val;
        }

        if let Ok(val) = std::env::var("TOURBASE_LOG_LEVEL") {
            self.logging.level = val;
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_public_base_url() -> String {
    "https://www.tourbase.app".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_absent_safe() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert!(config.database_url.is_empty());
        assert!(config.cron_secret.is_empty());
        assert!(config.push.app_id.is_empty());
        assert!(config.push.public_key.is_empty());
    }

    #[test]
    fn test_yaml_with_partial_fields() {
        let config: ServerConfig = serde_yaml::from_str(
            r#"
port: 8080
cron_secret: "drain-me"
push:
  app_id: "12345"
"#,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.cron_secret, "drain-me");
        assert_eq!(config.push.app_id, "12345");
        // Unspecified fields fall back to defaults
        assert_eq!(config.host, "127.0.0.1");
        assert!(config.push.secret.is_empty());
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "host = \"0.0.0.0\"\nport = 9000\n").unwrap();

        let config = ServerConfig::from_file(&path).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
    }
}
