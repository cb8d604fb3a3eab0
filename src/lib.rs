//! kubetarget - resolve the pod and container a Kubernetes dev command targets

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod resources;
pub mod selector;
