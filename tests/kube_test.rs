//! Integration tests against a live cluster
//!
//! These tests require a real Kubernetes cluster.
//! Run with: cargo test --test kube_test -- --ignored

use kubetarget::client::{ClusterClient, KubeCluster};
use kubetarget::config::AppConfig;
use kubetarget::resources::KubeResource;
use kubetarget::selector::{CmdParameter, SelectorParameter, TargetSelector};
use std::time::Duration;

/// Test listing pods in kube-system namespace
#[tokio::test]
#[ignore]
async fn test_list_pods_kube_system() {
    let cluster = KubeCluster::connect(None).await.expect("Should create client");

    let pods = cluster.list_pods("kube-system", None).await;
    assert!(pods.is_ok(), "Should list pods in kube-system");
    assert!(!pods.unwrap().is_empty(), "kube-system should have pods");
}

/// Test resolving the cluster DNS pod by label without prompting
#[tokio::test]
#[ignore]
async fn test_resolve_dns_pod_by_label() {
    let cluster = KubeCluster::connect(None).await.expect("Should create client");
    let params = SelectorParameter::new(CmdParameter {
        namespace: Some("kube-system".to_string()),
        label_selector: Some("k8s-app=kube-dns".to_string()),
        ..Default::default()
    });

    let selector = TargetSelector::new(&AppConfig::default(), &cluster, &params, false, vec![])
        .expect("Should build selector");
    let (pod, container) = selector.get_container().await.expect("Should resolve DNS pod");

    assert_eq!(pod.namespace(), Some("kube-system"));
    assert!(container.is_some(), "DNS pods run a single container");
}

/// Test that waiting for pods that never appear gives up
#[tokio::test]
#[ignore]
async fn test_wait_for_missing_label_times_out() {
    let cluster = KubeCluster::connect(None).await.expect("Should create client");

    let result = cluster
        .newest_running_pod("app=does-not-exist", "default", Duration::from_secs(2))
        .await;
    assert!(result.is_err());
}
