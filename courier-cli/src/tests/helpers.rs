//! Test helpers for writing request files and stubbing the engine.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use courier_core::RoutingEngine;
use tempfile::TempDir;

use crate::route::{RouteConfig, RouteEngineBuilder};

/// Builds an engine without the constrained router so results are stable.
pub(super) struct GreedyOnlyBuilder;

impl RouteEngineBuilder for GreedyOnlyBuilder {
    fn build(&self, _config: &RouteConfig) -> RoutingEngine {
        RoutingEngine::greedy_only()
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test file");
}

/// A temporary workspace and the path of `request.json` inside it.
pub(super) fn request_workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root.join("request.json"))
}

pub(super) const TWO_STOP_REQUEST: &str = r#"{
  "depot": {"lat": 51.5072, "lng": -0.1276},
  "stops": [
    {"id": "A", "lat": 51.51, "lng": -0.12, "demand": 3},
    {"id": "B", "lat": 51.52, "lng": -0.13, "demand": 4, "tw_start": "09:00", "tw_end": "17:00"}
  ],
  "vehicle_count": 1,
  "vehicle_capacity": 10
}"#;
