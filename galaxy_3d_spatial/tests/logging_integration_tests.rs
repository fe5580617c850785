//! Integration tests for the logging system
//!
//! Verifies which events the spatial index and the cull visitors report,
//! and at which severity.
//!
//! Run with: cargo test --test logging_integration_tests

use galaxy_3d_spatial::galaxy3d::cull::{CullVisitor, SpatialCullVisitor};
use galaxy_3d_spatial::galaxy3d::ecs::World;
use galaxy_3d_spatial::galaxy3d::log::{
    self, Logger, LogEntry, LogSeverity,
};
use galaxy_3d_spatial::galaxy3d::scene::{Scene, SceneCamera};
use galaxy_3d_spatial::galaxy3d::spatial::{SpatialSystemComponent, SpatialSystemDesc};
use galaxy_3d_spatial::glam::{Mat4, Vec3};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn install(min_severity: LogSeverity) -> Arc<Mutex<Vec<LogEntry>>> {
    log::reset_logger();
    let (logger, entries) = TestLogger::new();
    log::set_logger(logger);
    log::set_min_severity(min_severity);
    entries
}

fn from_source(entries: &Arc<Mutex<Vec<LogEntry>>>, source: &str) -> Vec<LogEntry> {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|entry| entry.source == source)
        .cloned()
        .collect()
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_construction_logged_at_debug() {
    let entries = install(LogSeverity::Debug);

    let _spatial = SpatialSystemComponent::new();

    let tree = from_source(&entries, "galaxy3d::QuadTree");
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].severity, LogSeverity::Debug);
    assert!(tree[0].message.contains("max_depth=6"));

    let component = from_source(&entries, "galaxy3d::SpatialSystemComponent");
    assert_eq!(component.len(), 1);
    assert_eq!(component[0].severity, LogSeverity::Debug);

    log::reset_logger();
}

#[test]
#[serial]
fn test_integration_default_filter_hides_debug() {
    let entries = install(LogSeverity::Info);

    let _spatial = SpatialSystemComponent::new();

    assert!(entries.lock().unwrap().is_empty());
    log::reset_logger();
}

#[test]
#[serial]
fn test_integration_invalid_config_logged_as_error() {
    let entries = install(LogSeverity::Info);

    let desc = SpatialSystemDesc {
        max_depth: 99,
        ..Default::default()
    };
    assert!(SpatialSystemComponent::from_desc(&desc).is_err());

    let errors = from_source(&entries, "galaxy3d::SpatialSystemComponent");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].severity, LogSeverity::Error);
    assert!(errors[0].message.contains("99"));
    assert!(errors[0].file.is_some());
    assert!(errors[0].line.is_some());

    log::reset_logger();
}

#[test]
#[serial]
fn test_integration_missing_service_logged_as_error() {
    let entries = install(LogSeverity::Info);

    let mut world = World::new();
    let root = world.root();
    let plain = world.create_child(root, "plain").unwrap();
    let mut spatial = SpatialSystemComponent::new();
    assert!(spatial.insert(&world, plain).is_err());

    let errors = from_source(&entries, "galaxy3d::World");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].severity, LogSeverity::Error);
    assert!(errors[0].message.contains("plain"));

    log::reset_logger();
}

#[test]
#[serial]
fn test_integration_cull_summary_at_trace() {
    let entries = install(LogSeverity::Trace);

    let world = World::new();
    let spatial = SpatialSystemComponent::new();
    let camera = SceneCamera::new(
        Mat4::look_at_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y),
        Mat4::perspective_rh(1.0, 1.0, 0.1, 100.0),
    );
    let mut scene = Scene::new("main").with_camera(camera);
    let mut no_camera = Scene::new("offscreen");
    let mut visitor = SpatialCullVisitor::new();

    visitor.run(&world, world.root(), Some(&spatial), &mut scene).unwrap();
    visitor.run(&world, world.root(), Some(&spatial), &mut no_camera).unwrap();

    let traces = from_source(&entries, "galaxy3d::SpatialCullVisitor");
    assert_eq!(traces.len(), 2);
    assert!(traces.iter().all(|entry| entry.severity == LogSeverity::Trace));
    assert!(traces[0].message.contains("main"));
    assert!(traces[1].message.contains("offscreen"));

    // The frustum query itself is traced by the tree
    assert!(!from_source(&entries, "galaxy3d::QuadTree").is_empty());

    log::reset_logger();
}

#[test]
#[serial]
fn test_integration_reset_restores_info_filter() {
    install(LogSeverity::Trace);
    log::reset_logger();
    assert_eq!(log::min_severity(), LogSeverity::Info);
}
