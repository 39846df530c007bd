use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cinetpay: CinetPayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CinetPayConfig {
    pub apikey: String,
    pub site_id: String,
    pub base_url: String,
    /// Webhook endpoint the gateway posts payment results to.
    pub notify_url: String,
    /// Where the customer lands after the hosted payment page.
    pub return_url: String,
    #[serde(default = "default_channels")]
    pub channels: String,
}

fn default_channels() -> String {
    "ALL".to_string()
}

impl Config {
    pub fn from_toml() -> anyhow::Result<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str)
                    .with_context(|| format!("failed to parse {config_path}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // No config file: build from environment variables and defaults.
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                let database_url = get_env("DATABASE_URL")
                    .context("DATABASE_URL is required when config.toml is absent")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    cinetpay: CinetPayConfig {
                        apikey: get_env("CINETPAY_APIKEY").unwrap_or_default(),
                        site_id: get_env("CINETPAY_SITE_ID").unwrap_or_default(),
                        base_url: get_env("CINETPAY_BASE_URL")
                            .unwrap_or_else(|| "https://api-checkout.cinetpay.com".to_string()),
                        notify_url: get_env("CINETPAY_NOTIFY_URL").unwrap_or_default(),
                        return_url: get_env("CINETPAY_RETURN_URL").unwrap_or_default(),
                        channels: get_env("CINETPAY_CHANNELS").unwrap_or_else(default_channels),
                    },
                }
            }
            Err(e) => {
                return Err(anyhow::anyhow!("cannot read config file {config_path}: {e}"));
            }
        };

        // Environment overrides apply even when the file exists.
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("CINETPAY_APIKEY") {
            config.cinetpay.apikey = v;
        }
        if let Ok(v) = env::var("CINETPAY_SITE_ID") {
            config.cinetpay.site_id = v;
        }
        if let Ok(v) = env::var("CINETPAY_BASE_URL") {
            config.cinetpay.base_url = v;
        }
        if let Ok(v) = env::var("CINETPAY_NOTIFY_URL") {
            config.cinetpay.notify_url = v;
        }
        if let Ok(v) = env::var("CINETPAY_RETURN_URL") {
            config.cinetpay.return_url = v;
        }
        if let Ok(v) = env::var("CINETPAY_CHANNELS") {
            config.cinetpay.channels = v;
        }

        Ok(config)
    }
}
