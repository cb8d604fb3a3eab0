//! Inputs a target selector is built from

use crate::client::ClusterClient;
use crate::config::{AppConfig, SelectorConfig};
use crate::error::Result;

/// Target values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CmdParameter {
    pub namespace: Option<String>,
    pub label_selector: Option<String>,
    pub pod_name: Option<String>,
    pub container_name: Option<String>,
    /// Name of a `[selectors.<name>]` preset in the config file
    pub selector_name: Option<String>,
    pub pick: Option<bool>,
}

/// Resolves namespace, label selector, pod and container names.
///
/// Command line values win over the selected config preset.
#[derive(Debug, Clone, Default)]
pub struct SelectorParameter {
    pub cmd: CmdParameter,
}

impl SelectorParameter {
    pub fn new(cmd: CmdParameter) -> Self {
        Self { cmd }
    }

    /// The config preset named on the command line, if any
    pub fn preset<'c>(&self, config: &'c AppConfig) -> Result<Option<&'c SelectorConfig>> {
        match non_empty(&self.cmd.selector_name) {
            Some(name) => config.selector(name).map(Some),
            None => Ok(None),
        }
    }

    /// Namespace from the command line, the preset, the config default or
    /// the kubeconfig context, in that order
    pub fn namespace(&self, config: &AppConfig, cluster: &dyn ClusterClient) -> Result<String> {
        if let Some(ns) = non_empty(&self.cmd.namespace) {
            return Ok(ns.to_string());
        }

        let from_config = self
            .preset(config)?
            .and_then(|p| non_empty(&p.namespace))
            .or_else(|| non_empty(&config.default_namespace));

        Ok(from_config
            .unwrap_or_else(|| cluster.default_namespace())
            .to_string())
    }

    pub fn label_selector(&self, config: &AppConfig) -> Result<Option<String>> {
        if let Some(ls) = non_empty(&self.cmd.label_selector) {
            return Ok(Some(ls.to_string()));
        }

        Ok(self
            .preset(config)?
            .and_then(SelectorConfig::label_selector_string))
    }

    pub fn pod_name(&self) -> Option<String> {
        non_empty(&self.cmd.pod_name).map(String::from)
    }

    pub fn container_name(&self, config: &AppConfig) -> Result<Option<String>> {
        if let Some(name) = non_empty(&self.cmd.container_name) {
            return Ok(Some(name.to_string()));
        }

        Ok(self
            .preset(config)?
            .and_then(|p| non_empty(&p.container))
            .map(String::from))
    }

    /// Whether the caller asked for interactive selection
    pub fn pick(&self) -> bool {
        self.cmd.pick == Some(true)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
