//! Configuration loading for Crediflow.
//! Reads crediflow.toml from the current directory or path in CREDIFLOW_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3001 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_artifact_path")]
    pub artifact_path: String,
}

fn default_artifact_path() -> String { "Bank_Personal_Loan.json".to_string() }

impl Default for ModelConfig {
    fn default() -> Self {
        Self { artifact_path: default_artifact_path() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_csv_path")]
    pub csv_path: String,
}

fn default_csv_path() -> String { "Bank_Personal_Loan.csv".to_string() }

impl Default for DatasetConfig {
    fn default() -> Self {
        Self { csv_path: default_csv_path() }
    }
}


impl Config {
    /// Load configuration from crediflow.toml.
    /// Checks CREDIFLOW_CONFIG env var first, then current directory.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CREDIFLOW_CONFIG")
            .unwrap_or_else(|_| "crediflow.toml".to_string());

        if !Path::new(&path).exists() {
            anyhow::bail!(
                "Config file not found: {}\n\
                 Copy crediflow.example.toml to crediflow.toml and edit it.",
                path
            );
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
