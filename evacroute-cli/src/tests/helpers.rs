//! Test helpers for writing request fixtures into temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Temporary directory exposed as a UTF-8 root path.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture");
}

/// Two zones of mixed severity, 100 seats, safe zone further along the
/// equator.
pub(super) fn two_zone_request() -> Value {
    json!({
        "zones": [
            { "lat": 0.0, "lng": 0.0, "population": 10, "severity": 6 },
            { "lat": 0.0, "lng": 1.0, "population": 5, "severity": 2 }
        ],
        "vehicle_capacity": 100,
        "safe_zone": { "lat": 0.0, "lng": 2.0 }
    })
}

pub(super) fn write_request(path: &Utf8Path, request: &Value) {
    let payload = serde_json::to_vec_pretty(request).expect("serialise request");
    write_utf8(path, &payload);
}
