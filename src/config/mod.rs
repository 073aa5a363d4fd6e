use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

/// Default retention for per-session history, in exchanges. The store keeps
/// the most recent N entries and discards the rest.
const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Default number of recent exchanges handed to the response generator.
const DEFAULT_CONTEXT_WINDOW: usize = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    #[serde(flatten)]
    pub common: CommonConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommonConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Path to an editable catalog file. When unset the copy compiled into
    /// the binary is used.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub history_limit: usize,
    pub context_window: usize,
    pub default_language: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            context_window: DEFAULT_CONTEXT_WINDOW,
            default_language: "fr".to_string(),
        }
    }
}

impl ChatConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let common = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(ChatConfig {
            common,
            catalog: CatalogConfig {
                path: env::var("CHAT_CATALOG_PATH").ok(),
            },
            session: SessionSettings {
                history_limit: get_env(
                    "CHAT_HISTORY_LIMIT",
                    Some(&DEFAULT_HISTORY_LIMIT.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_HISTORY_LIMIT),
                context_window: get_env(
                    "CHAT_CONTEXT_WINDOW",
                    Some(&DEFAULT_CONTEXT_WINDOW.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_CONTEXT_WINDOW),
                default_language: get_env("CHAT_DEFAULT_LANGUAGE", Some("fr"), is_prod)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod && default.is_none() {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
