//! Application configuration for kubetarget

use crate::error::{KcError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Default polling window while waiting for a running pod, in seconds
pub const DEFAULT_WAIT_TIMEOUT: u64 = 120;

/// Application configuration stored in ~/.kt/config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Whether to use colors
    #[serde(default = "default_true")]
    pub colors: bool,

    /// Namespace used when neither the command line nor a selector preset names one
    #[serde(default)]
    pub default_namespace: Option<String>,

    /// Seconds to wait for a pod matching an image or label selector to run
    #[serde(default = "default_wait_timeout")]
    pub wait_timeout: u64,

    /// Question shown when picking a pod interactively
    #[serde(default)]
    pub pod_question: Option<String>,

    /// Question shown when picking a container interactively
    #[serde(default)]
    pub container_question: Option<String>,

    /// Named selector presets, chosen with --selector-name
    #[serde(default)]
    pub selectors: BTreeMap<String, SelectorConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            colors: true,
            default_namespace: None,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            pod_question: None,
            container_question: None,
            selectors: BTreeMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_wait_timeout() -> u64 {
    DEFAULT_WAIT_TIMEOUT
}

impl AppConfig {
    /// Polling window for image and label selector queries
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout)
    }

    /// Look up a selector preset by name
    pub fn selector(&self, name: &str) -> Result<&SelectorConfig> {
        self.selectors.get(name).ok_or_else(|| {
            KcError::ResolutionInput(format!("selector {} not found in config", name))
        })
    }
}

/// A named selector preset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default)]
    pub namespace: Option<String>,

    /// Pod labels to match, e.g. `{ app = "web" }`
    #[serde(default)]
    pub label_selector: BTreeMap<String, String>,

    #[serde(default)]
    pub container: Option<String>,
}

impl SelectorConfig {
    /// Render the label map as a Kubernetes label selector (`k=v,k2=v2`)
    pub fn label_selector_string(&self) -> Option<String> {
        if self.label_selector.is_empty() {
            return None;
        }

        Some(
            self.label_selector
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

/// Get the kt config directory (~/.kt)
pub fn config_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|h| h.join(".kt"))
        .ok_or_else(|| KcError::Config("Could not determine home directory".to_string()))
}

/// Load application config from ~/.kt/config.toml
pub fn load_config() -> Result<AppConfig> {
    let path = config_dir()?.join("config.toml");
    if path.exists() {
        let content = std::fs::read_to_string(&path)?;
        parse_config(&content)
    } else {
        Ok(AppConfig::default())
    }
}

/// Parse application config from TOML text
pub fn parse_config(content: &str) -> Result<AppConfig> {
    Ok(toml::from_str(content)?)
}
