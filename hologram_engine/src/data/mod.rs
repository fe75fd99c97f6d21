mod channel;
mod fixture;
mod model;
pub mod procedural;
mod scanner;

use std::sync::Arc;

use bevy::prelude::Resource;

pub use channel::{ScanChannel, ScanRequest, ScanResult};
pub use fixture::{FixtureWorld, SurfaceRecord, WorldRecorder};
pub use model::{DisplayVolume, Material, ObserverId, Sample, ScanBounds, ScanSnapshot};
pub use scanner::scan;

/// One column's surface report: the highest solid height, or `None` when the
/// world cannot resolve the column (ungenerated or unloaded region), plus the
/// material occupying that voxel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceSample {
    pub height: Option<i32>,
    pub material: Material,
}

/// Read-only view of a voxel world's surface. Implementations must be safe to
/// query from scan worker threads while the foreground keeps running.
pub trait WorldSampler: Send + Sync + 'static {
    fn surface_at(&self, x: i32, z: i32) -> SurfaceSample;
}

/// Bevy resource holding the world the engine scans.
#[derive(Resource, Clone)]
pub struct WorldResource(pub Arc<dyn WorldSampler>);
