//! Minimal prelude for SDK consumers.

pub use crate::config::HologramConfig;
pub use crate::data::{Material, ObserverId, SurfaceSample, WorldResource, WorldSampler};
pub use crate::render::{ColorMode, EmitError, PointSink, SinkResource};
pub use crate::scene::{SessionInfo, SessionRegistry, StartRequest};
pub use crate::sdk::{hologram_plugin, HologramBuilder};
