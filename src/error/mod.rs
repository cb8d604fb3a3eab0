//! Error types for kubetarget

use thiserror::Error;

/// Main error type for kubetarget
#[derive(Debug, Error)]
pub enum KcError {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Couldn't resolve target selector: {0}")]
    ResolutionInput(String),

    #[error("Couldn't get pod {name} in namespace {namespace}: {source}")]
    PodFetch {
        namespace: String,
        name: String,
        #[source]
        source: Box<KcError>,
    },

    #[error("Couldn't get pod {name}, because pod has status: {status} which is not Running")]
    PodNotRunning { name: String, status: String },

    #[error("Couldn't query pods in namespace {namespace}: {source}")]
    PodQuery {
        namespace: String,
        #[source]
        source: Box<KcError>,
    },

    #[error("Couldn't find a running pod in namespace {namespace}, because no label selector, image or pod name was specified")]
    NoSelectorNoPick { namespace: String },

    #[error("Couldn't find a running pod in namespace {namespace}")]
    NoPodFound { namespace: String },

    #[error("Couldn't find container {container} in pod {pod}")]
    ContainerNotFound { container: String, pod: String },

    #[error("Couldn't select a container in pod {pod}, because no container name was specified")]
    NoContainerNameNoPick { pod: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Timeout waiting for {0}")]
    Timeout(String),
}

impl KcError {
    /// Wrap an error raised while fetching a pod by name
    pub fn pod_fetch(namespace: &str, name: &str, source: KcError) -> Self {
        KcError::PodFetch {
            namespace: namespace.to_string(),
            name: name.to_string(),
            source: Box::new(source),
        }
    }

    /// Wrap an error raised by an image or label selector query
    pub fn pod_query(namespace: &str, source: KcError) -> Self {
        KcError::PodQuery {
            namespace: namespace.to_string(),
            source: Box::new(source),
        }
    }
}

impl From<serde_json::Error> for KcError {
    fn from(e: serde_json::Error) -> Self {
        KcError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for KcError {
    fn from(e: serde_yaml::Error) -> Self {
        KcError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for KcError {
    fn from(e: toml::de::Error) -> Self {
        KcError::Config(e.to_string())
    }
}

impl From<dialoguer::Error> for KcError {
    fn from(e: dialoguer::Error) -> Self {
        KcError::Prompt(e.to_string())
    }
}

/// Result type alias for kubetarget
pub type Result<T> = std::result::Result<T, KcError>;
