//! Record/replay of world surface queries, for offline demos and tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::data::model::Material;
use crate::data::{SurfaceSample, WorldSampler};

/// One recorded surface query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceRecord {
    pub x: i32,
    pub z: i32,
    pub height: Option<i32>,
    pub material: Material,
}

/// Wraps a live sampler and records every query for later serialization to a
/// fixture file.
pub struct WorldRecorder<W> {
    inner: W,
    records: Mutex<Vec<SurfaceRecord>>,
}

impl<W: WorldSampler> WorldRecorder<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<SurfaceRecord> {
        self.records.lock().expect("recorder mutex poisoned").clone()
    }

    /// Serialize the recorded queries to `path` as JSON.
    pub fn flush(&self, path: &Path) {
        let records = self.records();
        let json =
            serde_json::to_string_pretty(&records).expect("failed to serialize world records");
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        std::fs::write(path, json)
            .unwrap_or_else(|e| panic!("failed to write fixture to {}: {e}", path.display()));
        eprintln!(
            "holotopo: recorded {} surface queries to {}",
            records.len(),
            path.display()
        );
    }
}

impl<W: WorldSampler> WorldSampler for WorldRecorder<W> {
    fn surface_at(&self, x: i32, z: i32) -> SurfaceSample {
        let sample = self.inner.surface_at(x, z);
        self.records
            .lock()
            .expect("recorder mutex poisoned")
            .push(SurfaceRecord {
                x,
                z,
                height: sample.height,
                material: sample.material,
            });
        sample
    }
}

/// Replays a recorded region from a fixture. Columns outside the recording
/// resolve as unknown height, the same degradation an ungenerated region
/// produces on a live world.
pub struct FixtureWorld {
    columns: HashMap<(i32, i32), SurfaceSample>,
}

impl FixtureWorld {
    /// Load a fixture written by [`WorldRecorder::flush`].
    pub fn load(path: &Path) -> Self {
        let json = std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        let records: Vec<SurfaceRecord> = serde_json::from_str(&json)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()));
        Self::from_records(records)
    }

    pub fn from_records(records: impl IntoIterator<Item = SurfaceRecord>) -> Self {
        let columns = records
            .into_iter()
            .map(|r| {
                (
                    (r.x, r.z),
                    SurfaceSample {
                        height: r.height,
                        material: r.material,
                    },
                )
            })
            .collect();
        Self { columns }
    }
}

impl WorldSampler for FixtureWorld {
    fn surface_at(&self, x: i32, z: i32) -> SurfaceSample {
        self.columns
            .get(&(x, z))
            .copied()
            .unwrap_or(SurfaceSample {
                height: None,
                material: Material::Stone,
            })
    }
}
