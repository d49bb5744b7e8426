//! Fixtures for writing request and preference files.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// A temporary directory holding request fixtures.
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

    pub(super) fn write_json(&self, name: &str, value: &Value) -> Utf8PathBuf {
        let path = self.path(name);
        let payload = serde_json::to_vec_pretty(value).expect("serialise fixture");
        write_utf8(&path, &payload);
        path
    }
}

/// A request for an on-site traveller two hours before departure.
pub(super) fn on_site_request() -> Value {
    json!({
        "context": {
            "selected_vibe": "quick",
            "venue_name": "Changi T3",
            "current_stage": "transit",
            "departure_time": "2026-10-19T20:00:00+08:00",
        },
        "candidates": [
            {
                "id": 1,
                "name": "Gate Espresso",
                "category": "cafe",
                "tags": ["quick", "coffee"],
                "quick_service": true,
                "rating": 4.1,
            },
            {
                "id": 2,
                "name": "Harbour Bistro",
                "category": "restaurant",
                "tags": ["full-service"],
                "rating": 4.9,
            },
            {
                "id": 3,
                "name": "Orchid Garden",
                "category": "attraction",
                "tags": ["explore"],
                "rating": 4.6,
            },
        ],
        "options": {
            "user_location": { "lat": 1.3644, "lng": 103.9915 },
            "reference_location": { "lat": 1.3644, "lng": 103.9915 },
        },
        "now": "2026-10-19T10:00:00Z",
    })
}
