//! Integration tests for Engine logging system
//!
//! These tests swap the global logger, so they run serially.
//!
//! Run with: cargo test --test logging_integration_tests

use hds_lod_engine::glam::Vec3;
use hds_lod_engine::hds::{Engine, Error};
use hds_lod_engine::hds::log::{DefaultLogger, Logger, LogEntry, LogSeverity};
use hds_lod_engine::hds::camera::ViewParams;
use hds_lod_engine::hds::lod::{BoundaryEngine, LodConfig, Simplifier, Thresholds};
use hds_lod_engine::hds::mesh::Mesh;
use hds_lod_engine::hds::octree::Octree;
use hds_lod_engine::{engine_bail, engine_debug, engine_err, engine_info, engine_warn};
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

fn triangle_mesh() -> Mesh {
    Mesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], None, vec![[0, 1, 2]]).unwrap()
}

// ============================================================================
// LOGGER TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Engine::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].severity, LogSeverity::Info);
        assert_eq!(captured[0].source, "test::module");
        assert_eq!(captured[0].message, "Test info message");
        assert_eq!(captured[1].severity, LogSeverity::Warn);
        assert_eq!(captured[1].file, None);
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_min_severity_filters() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);
    Engine::set_min_severity(LogSeverity::Warn);

    engine_debug!("test::filter", "dropped {}", 1);
    engine_info!("test::filter", "dropped {}", 2);
    engine_warn!("test::filter", "kept {}", 3);

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].message, "kept 3");
    }

    Engine::reset_logger();
    assert_eq!(Engine::min_severity(), LogSeverity::Info);
}

#[test]
#[serial]
fn test_integration_error_macros_log_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let err = engine_err!("test::error", InvalidParameter, "bad value {}", -1);
    assert_eq!(err, Error::InvalidParameter("bad value -1".to_string()));

    fn failing() -> hds_lod_engine::hds::Result<()> {
        engine_bail!("test::error", InvalidView, "no view");
    }
    assert!(matches!(failing(), Err(Error::InvalidView(_))));

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 2);
        for entry in captured.iter() {
            assert_eq!(entry.severity, LogSeverity::Error);
            assert_eq!(entry.source, "test::error");
            assert!(entry.file.is_some());
            assert!(entry.line.is_some());
        }
        assert_eq!(captured[1].message, "no view");
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);
    Engine::reset_logger();

    Engine::log(LogSeverity::Info, "test::reset", "goes to the console".to_string());
    assert!(entries.lock().unwrap().is_empty());
}

#[test]
fn test_integration_plain_format() {
    let entry = LogEntry {
        severity: LogSeverity::Warn,
        timestamp: std::time::SystemTime::now(),
        source: "hds::Octree".to_string(),
        message: "healed".to_string(),
        file: None,
        line: None,
    };
    let line = DefaultLogger::format_plain(&entry);
    assert!(line.ends_with("[WARN ] [hds::Octree] healed"));
}

// ============================================================================
// ENGINE COMPONENT LOGS
// ============================================================================

#[test]
#[serial]
fn test_integration_octree_build_logs_phases() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Octree::build(&triangle_mesh()).unwrap();

    {
        let captured = entries.lock().unwrap();
        let phases: Vec<&LogEntry> = captured
            .iter()
            .filter(|e| e.source == "hds::Octree" && e.severity == LogSeverity::Info)
            .collect();
        assert_eq!(phases.len(), 4);
        assert!(phases[0].message.starts_with("Constructed vertex octree"));
        assert!(phases[3].message.starts_with("Computed normal cones"));
        assert!(captured.iter().all(|e| e.severity < LogSeverity::Warn));
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_rejected_mesh_logs_error() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let result = Mesh::new(vec![Vec3::ZERO, Vec3::X], None, vec![[0, 1, 5]]);
    assert!(matches!(result, Err(Error::InvalidMesh(_))));

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].severity, LogSeverity::Error);
        assert_eq!(captured[0].source, "hds::Mesh");
        assert!(captured[0].message.contains("out of range"));
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_simplifier_reports_ready() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Simplifier::new(triangle_mesh(), LodConfig::default()).unwrap();

    {
        let captured = entries.lock().unwrap();
        let ready = captured
            .iter()
            .find(|e| e.source == "hds::Simplifier")
            .expect("simplifier should log once ready");
        assert!(ready.message.contains("3 vertices, 1 triangles"));
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_boundary_drops_active_entry_with_warning() {
    let mesh = Mesh::new(vec![Vec3::ZERO, Vec3::ONE], None, Vec::new()).unwrap();
    let mut tree = Octree::build(&mesh).unwrap();
    let view = ViewParams::look_at(Vec3::new(0.5, 0.5, 5.0), Vec3::splat(0.5), Vec3::Y, 60.0, 1.0, 0.1, 100.0)
        .unwrap();

    // Two engines on one tree: the second expands the root the first still lists
    let mut stale = BoundaryEngine::new();
    stale.update(&mut tree, &view, Thresholds::COARSEST);
    let mut fresh = BoundaryEngine::new();
    fresh.update(&mut tree, &view, Thresholds::FULL_DETAIL);
    assert_eq!(fresh.len(), 2);

    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    stale.update(&mut tree, &view, Thresholds::FULL_DETAIL);
    assert!(!stale.boundary().contains(&tree.root()));

    {
        let captured = entries.lock().unwrap();
        let warning = captured
            .iter()
            .find(|e| e.severity == LogSeverity::Warn && e.source == "hds::BoundaryEngine")
            .expect("dropping an active entry should warn");
        assert!(warning.message.contains("active node"));
    }

    Engine::reset_logger();
}
