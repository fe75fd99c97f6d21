//! Gizmo-based demo sink: retains each observer's latest point batch and
//! draws it every frame.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use bevy::math::Isometry3d;
use bevy::prelude::*;

use crate::data::ObserverId;
use crate::render::{Emission, EmitError, PointSink};
use crate::scene::{render_holograms, SessionRegistry};

/// Dust-style particle size to gizmo sphere radius.
const POINT_RADIUS_SCALE: f32 = 0.08;

/// Sink that buffers emissions for the draw system. Cloned handles share the
/// same buffers, so the boxed sink the engine emits through and the resource
/// the draw system reads stay in sync.
#[derive(Resource, Clone, Default)]
pub struct GizmoSink {
    pending: Arc<Mutex<HashMap<ObserverId, Vec<Emission>>>>,
    retained: Arc<Mutex<HashMap<ObserverId, Vec<Emission>>>>,
}

impl PointSink for GizmoSink {
    fn emit(
        &self,
        observer: ObserverId,
        point: Vec3,
        color: Color,
        size: f32,
    ) -> Result<(), EmitError> {
        self.pending
            .lock()
            .expect("gizmo sink mutex poisoned")
            .entry(observer)
            .or_default()
            .push(Emission {
                observer,
                point,
                color,
                size,
            });
        Ok(())
    }
}

/// Promote freshly emitted batches to the retained set, drop batches for
/// observers whose sessions ended, and draw what's left.
fn draw_points(sink: Res<GizmoSink>, registry: Res<SessionRegistry>, mut gizmos: Gizmos) {
    let mut retained = sink.retained.lock().expect("gizmo sink mutex poisoned");

    {
        let mut pending = sink.pending.lock().expect("gizmo sink mutex poisoned");
        for (observer, batch) in pending.drain() {
            retained.insert(observer, batch);
        }
    }

    retained.retain(|observer, _| registry.has_session(*observer));

    for batch in retained.values() {
        for emission in batch {
            gizmos.sphere(
                Isometry3d::from_translation(emission.point),
                emission.size * POINT_RADIUS_SCALE,
                emission.color,
            );
        }
    }
}

/// Wire the draw system. The [`GizmoSink`] resource (a clone of the handle
/// boxed into the engine's sink) must already be inserted.
pub fn gizmo_sink_plugin(app: &mut App) {
    app.add_systems(Update, draw_points.after(render_holograms));
}
