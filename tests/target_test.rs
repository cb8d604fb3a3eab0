//! Tests for target resolution as used by the pod commands

mod common;

use common::*;
use kubetarget::cli::TargetArgs;
use kubetarget::commands::target::{cmd_parameter, resolve, target_selector};
use kubetarget::config::AppConfig;
use kubetarget::error::KcError;

#[test]
fn test_cmd_parameter_from_flags() {
    let args = TargetArgs {
        pod: Some("api-0".to_string()),
        container: Some("app".to_string()),
        label_selector: Some("app=api".to_string()),
        selector_name: Some("api".to_string()),
        pick: true,
        ..Default::default()
    };

    let cmd = cmd_parameter(Some("dev"), &args);
    assert_eq!(cmd.namespace.as_deref(), Some("dev"));
    assert_eq!(cmd.pod_name.as_deref(), Some("api-0"));
    assert_eq!(cmd.container_name.as_deref(), Some("app"));
    assert_eq!(cmd.label_selector.as_deref(), Some("app=api"));
    assert_eq!(cmd.selector_name.as_deref(), Some("api"));
    assert_eq!(cmd.pick, Some(true));
}

#[tokio::test]
async fn test_resolve_explicit_target() {
    let cluster = FakeCluster::new(vec![with_containers(
        create_mock_pod("api-0", "dev", "Running"),
        &[("app", "acme/api:3"), ("sidecar", "envoy")],
    )]);
    let args = TargetArgs {
        pod: Some("api-0".to_string()),
        container: Some("app".to_string()),
        ..Default::default()
    };

    let selector = target_selector(&cluster, &AppConfig::default(), Some("dev"), &args).unwrap();
    let target = resolve(&selector).await.unwrap();

    assert_eq!(target.namespace, "dev");
    assert_eq!(target.pod_name(), "api-0");
    assert_eq!(target.container_name(), Some("app"));
    assert_eq!(target.to_string(), "dev/api-0:app");
}

#[tokio::test]
async fn test_resolve_by_image_flag() {
    let cluster = FakeCluster::new(vec![
        with_containers(create_mock_pod("db-0", "dev", "Running"), &[("db", "postgres:16")]),
        with_containers(create_mock_pod("api-0", "dev", "Running"), &[("api", "acme/api:3")]),
    ]);
    let args = TargetArgs {
        images: vec!["acme/api".to_string()],
        no_pick: true,
        ..Default::default()
    };

    let selector = target_selector(&cluster, &AppConfig::default(), Some("dev"), &args).unwrap();
    let target = resolve(&selector).await.unwrap();
    assert_eq!(target.to_string(), "dev/api-0:api");
}

#[tokio::test]
async fn test_no_pick_flag_disables_prompt() {
    let cluster = FakeCluster::new(vec![create_mock_pod("api-0", "dev", "Running")]);
    let args = TargetArgs {
        no_pick: true,
        ..Default::default()
    };
    let prompt = ScriptedPrompt::silent();

    let selector = target_selector(&cluster, &AppConfig::default(), Some("dev"), &args)
        .unwrap()
        .with_prompt(&prompt);
    assert!(!selector.allow_pick());

    let err = resolve(&selector).await.unwrap_err();
    assert!(matches!(err, KcError::NoSelectorNoPick { .. }));
    assert!(prompt.asked().is_empty());
}

#[tokio::test]
async fn test_target_display_without_container() {
    let cluster = FakeCluster::new(vec![with_containers(
        create_mock_pod("api-0", "dev", "Running"),
        &[],
    )]);
    let args = TargetArgs {
        pod: Some("api-0".to_string()),
        ..Default::default()
    };

    let selector = target_selector(&cluster, &AppConfig::default(), Some("dev"), &args).unwrap();
    let target = resolve(&selector).await.unwrap();
    assert_eq!(target.to_string(), "dev/api-0");
    assert!(target.container_name().is_none());
}
