//! Output side of the engine: color mapping, projection, and the sink
//! abstraction points are emitted through.

mod color;
mod gizmo;
mod project;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use crate::data::ObserverId;

pub use color::{height_color, material_color, ColorMode};
pub use gizmo::{gizmo_sink_plugin, GizmoSink};
pub use project::{normalize, project};

/// Why a single point emission failed. Failures are counted per session,
/// never propagated into the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmitError {
    /// The sink cannot render this effect for the observer.
    Unsupported,
    /// The observer's connection dropped mid-pass.
    Unreachable,
}

/// One emitted point, as handed to a sink.
#[derive(Clone, Copy, Debug)]
pub struct Emission {
    pub observer: ObserverId,
    pub point: Vec3,
    pub color: Color,
    pub size: f32,
}

/// Abstract emission capability: one colored point, visible to one observer.
///
/// The engine calls `emit` once per sample per refresh, all from the
/// foreground schedule, and checks `is_reachable` before each pass; a `false`
/// answer ends that observer's session.
pub trait PointSink: Send + Sync + 'static {
    fn emit(
        &self,
        observer: ObserverId,
        point: Vec3,
        color: Color,
        size: f32,
    ) -> Result<(), EmitError>;

    fn is_reachable(&self, _observer: ObserverId) -> bool {
        true
    }
}

/// Bevy resource holding the sink the engine emits through.
#[derive(Resource)]
pub struct SinkResource(pub Box<dyn PointSink>);

impl SinkResource {
    pub fn new(sink: impl PointSink) -> Self {
        Self(Box::new(sink))
    }
}

/// Buffering sink for tests and headless embedding: stores every emission and
/// lets callers flip reachability to simulate an observer dropping.
#[derive(Clone, Default)]
pub struct CollectingSink {
    emissions: Arc<Mutex<Vec<Emission>>>,
    unreachable: Arc<AtomicBool>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emissions(&self) -> Vec<Emission> {
        self.emissions.lock().expect("sink mutex poisoned").clone()
    }

    /// Drain the buffer, returning everything emitted since the last take.
    pub fn take(&self) -> Vec<Emission> {
        std::mem::take(&mut *self.emissions.lock().expect("sink mutex poisoned"))
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.unreachable.store(!reachable, Ordering::SeqCst);
    }
}

impl PointSink for CollectingSink {
    fn emit(
        &self,
        observer: ObserverId,
        point: Vec3,
        color: Color,
        size: f32,
    ) -> Result<(), EmitError> {
        self.emissions
            .lock()
            .expect("sink mutex poisoned")
            .push(Emission {
                observer,
                point,
                color,
                size,
            });
        Ok(())
    }

    fn is_reachable(&self, _observer: ObserverId) -> bool {
        !self.unreachable.load(Ordering::SeqCst)
    }
}
