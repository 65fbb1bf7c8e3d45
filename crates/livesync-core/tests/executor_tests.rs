//! Tests for applying sync plans to running containers

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use livesync_core::{Error, PlanExecutor, SyncMap, SyncPlan};
use livesync_test_utils::fakes::{FakeCluster, RecordingGenerator};
use pretty_assertions::assert_eq;

const IMAGE: &str = "app:abc123";

fn plan_with(copies: &[&str], deletes: &[&str]) -> SyncPlan {
    let mut copy = SyncMap::new();
    for host in copies {
        copy.insert(*host, vec![format!("/app/{host}")]);
    }
    let mut delete = SyncMap::new();
    for host in deletes {
        delete.insert(*host, vec![format!("/app/{host}")]);
    }
    SyncPlan {
        target_image_tag: IMAGE.to_string(),
        copy,
        delete,
    }
}

fn namespaces(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_empty_plan_never_touches_cluster() {
    let cluster = FakeCluster::new().failing_on("default");
    let generator = RecordingGenerator::new();

    let synced = PlanExecutor::new(&cluster)
        .perform(IMAGE, &plan_with(&[], &[]), &namespaces(&["default"]), &generator)
        .unwrap();

    assert_eq!(synced, 0);
    assert_eq!(cluster.list_calls(), 0);
}

#[test]
fn test_syncs_only_matching_containers() {
    let cluster = FakeCluster::new()
        .with_pod("default", "web-1", &[("web", IMAGE), ("sidecar", "envoy:1")])
        .with_pod("default", "db-1", &[("db", "postgres:16")])
        .with_pod("staging", "web-2", &[("web", IMAGE)]);
    let generator = RecordingGenerator::new();

    let synced = PlanExecutor::new(&cluster)
        .perform(
            IMAGE,
            &plan_with(&["a.js"], &["b.js"]),
            &namespaces(&["default", "staging"]),
            &generator,
        )
        .unwrap();

    assert_eq!(synced, 4);
    assert_eq!(
        generator.journal(),
        vec![
            "copy a.js -> web-1/web",
            "delete b.js -> web-1/web",
            "copy a.js -> web-2/web",
            "delete b.js -> web-2/web",
        ]
    );
    assert_eq!(cluster.list_calls(), 2);
}

#[test]
fn test_image_match_is_exact() {
    let cluster = FakeCluster::new().with_pod("default", "web-1", &[("web", "app:abc1234")]);
    let generator = RecordingGenerator::new();

    let err = PlanExecutor::new(&cluster)
        .perform(IMAGE, &plan_with(&["a.js"], &[]), &namespaces(&["default"]), &generator)
        .unwrap_err();

    assert!(matches!(err, Error::NoFilesSynced));
}

#[test]
fn test_no_matching_container_is_no_files_synced() {
    let cluster = FakeCluster::new().with_pod("default", "db-1", &[("db", "postgres:16")]);
    let generator = RecordingGenerator::new();

    let err = PlanExecutor::new(&cluster)
        .perform(
            IMAGE,
            &plan_with(&["a.js"], &[]),
            &namespaces(&["default", "empty"]),
            &generator,
        )
        .unwrap_err();

    assert_eq!(err.to_string(), "didn't sync any files");
    assert_eq!(cluster.list_calls(), 2);
}

#[test]
fn test_generator_producing_nothing_is_no_files_synced() {
    let cluster = FakeCluster::new().with_pod("default", "web-1", &[("web", IMAGE)]);
    let generator = RecordingGenerator::new().producing_nothing();

    let err = PlanExecutor::new(&cluster)
        .perform(IMAGE, &plan_with(&["a.js"], &[]), &namespaces(&["default"]), &generator)
        .unwrap_err();

    assert!(matches!(err, Error::NoFilesSynced));
}

#[test]
fn test_second_of_three_failing_keeps_first_applied() {
    let cluster = FakeCluster::new()
        .with_pod("default", "web-1", &[("web", IMAGE)])
        .with_pod("default", "web-2", &[("web", IMAGE)]);
    let generator = RecordingGenerator::new().failing_at(1);

    let err = PlanExecutor::new(&cluster)
        .perform(
            IMAGE,
            &plan_with(&["a.js", "b.js", "c.js"], &[]),
            &namespaces(&["default"]),
            &generator,
        )
        .unwrap_err();

    assert_eq!(err.to_string(), "copy b.js -> web-1/web failed");
    match &err {
        Error::Execution { pod, container, .. } => {
            assert_eq!(pod, "web-1");
            assert_eq!(container, "web");
        }
        other => panic!("unexpected error: {other}"),
    }
    // First operation stays applied, nothing after the failure ran.
    assert_eq!(generator.journal(), vec!["copy a.js -> web-1/web"]);
}

#[test]
fn test_discovery_failure_stops_run() {
    let cluster = FakeCluster::new()
        .with_pod("default", "web-1", &[("web", IMAGE)])
        .failing_on("staging");
    let generator = RecordingGenerator::new();

    let err = PlanExecutor::new(&cluster)
        .perform(
            IMAGE,
            &plan_with(&["a.js"], &[]),
            &namespaces(&["default", "staging", "prod"]),
            &generator,
        )
        .unwrap_err();

    assert!(matches!(err, Error::Discovery { ref namespace, .. } if namespace == "staging"));
    assert_eq!(generator.journal(), vec!["copy a.js -> web-1/web"]);
    assert_eq!(cluster.list_calls(), 2);
}

#[test]
fn test_raised_cancel_flag_stops_before_listing() {
    let cluster = FakeCluster::new().with_pod("default", "web-1", &[("web", IMAGE)]);
    let generator = RecordingGenerator::new();
    let cancel = Arc::new(AtomicBool::new(true));

    let err = PlanExecutor::new(&cluster)
        .with_cancel(cancel)
        .perform(IMAGE, &plan_with(&["a.js"], &[]), &namespaces(&["default"]), &generator)
        .unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    assert_eq!(cluster.list_calls(), 0);
}

#[test]
fn test_cancel_between_operations_keeps_earlier_ones() {
    let cluster = FakeCluster::new()
        .with_pod("default", "web-1", &[("web", IMAGE)])
        .with_pod("default", "web-2", &[("web", IMAGE)]);
    let cancel = Arc::new(AtomicBool::new(false));
    let generator = RecordingGenerator::new().cancelling_at(0, Arc::clone(&cancel));

    let err = PlanExecutor::new(&cluster)
        .with_cancel(Arc::clone(&cancel))
        .perform(
            IMAGE,
            &plan_with(&["a.js", "b.js"], &["c.js"]),
            &namespaces(&["default"]),
            &generator,
        )
        .unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    assert!(!err.requires_rebuild());
    assert_eq!(generator.journal(), vec!["copy a.js -> web-1/web"]);
    assert_eq!(cluster.list_calls(), 1);
}
