use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

lazy_static! {
    /// `${VAR_NAME}` placeholders in config files
    static ref ENV_PLACEHOLDER: Regex = Regex::new(r"\$\{(\w+)\}").unwrap();
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub translator: TranslatorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub subscription_key: String,
    pub region: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_endpoint() -> String {
    "https://api.cognitive.microsofttranslator.com".to_string()
}

fn default_api_version() -> String {
    "3.0".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load a YAML or JSON file, chosen by extension
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            bail!("Configuration file not found: {}", path);
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        let content = substitute_env_vars(&content, |name| std::env::var(name).ok());

        let path_lower = path.to_lowercase();
        let config: Config = if path_lower.ends_with(".json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(config)
    }

    /// Build the configuration from environment variables alone
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {}", port))?,
            None => default_port(),
        };

        Ok(Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(default_host),
                port,
            },
            translator: TranslatorConfig {
                endpoint: lookup("TRANSLATOR_ENDPOINT").unwrap_or_else(default_endpoint),
                subscription_key: lookup("TRANSLATOR_KEY").unwrap_or_default(),
                region: lookup("TRANSLATOR_REGION").unwrap_or_default(),
                api_version: lookup("TRANSLATOR_API_VERSION").unwrap_or_else(default_api_version),
            },
        })
    }

    pub fn validate(&self) -> Result<()> {
        let translator = &self.translator;
        if translator.subscription_key.trim().is_empty() {
            bail!("Translator subscription key is not set (TRANSLATOR_KEY)");
        }
        if translator.region.trim().is_empty() {
            bail!("Translator region is not set (TRANSLATOR_REGION)");
        }
        if !(translator.endpoint.starts_with("https://") || translator.endpoint.starts_with("http://")) {
            bail!("Translator endpoint must be an http(s) URL: {}", translator.endpoint);
        }
        if translator.api_version.trim().is_empty() {
            bail!("Translator api version must not be empty");
        }
        Ok(())
    }
}

/// Replace `${VAR}` with its value; unknown variables are left untouched
pub fn substitute_env_vars(content: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    ENV_PLACEHOLDER
        .replace_all(content, |caps: &Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
