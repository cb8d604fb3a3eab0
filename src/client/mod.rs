//! Kubernetes client abstraction

mod cluster;

pub use cluster::{ClusterClient, KubeCluster, POLL_INTERVAL};

use crate::error::{KcError, Result};
use kube::{config::KubeConfigOptions, Client, Config};

/// Create a Kubernetes client for the specified context
pub async fn create_client(context: Option<&str>) -> Result<Client> {
    let config = load_config(context).await?;
    Client::try_from(config).map_err(KcError::from)
}

/// Load Kubernetes configuration
async fn load_config(context: Option<&str>) -> Result<Config> {
    let options = KubeConfigOptions {
        context: context.map(String::from),
        ..Default::default()
    };

    match Config::from_kubeconfig(&options).await {
        Ok(config) => Ok(config),
        // In-cluster fallback only applies when no explicit context was requested
        Err(e) if context.is_none() => Config::incluster().map_err(|_| {
            KcError::Config(format!("Failed to load kubeconfig: {e}"))
        }),
        Err(e) => Err(KcError::Config(format!("Failed to load kubeconfig: {e}"))),
    }
}
