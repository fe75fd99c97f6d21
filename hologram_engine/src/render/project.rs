//! Projection of world-relative sample offsets into the display volume.

use bevy::math::{IVec3, Vec3};

use crate::data::{DisplayVolume, ScanBounds};

/// Normalize an offset against its scan bounds, per axis, into `[0, 1]`.
/// A degenerate axis (zero range) normalizes to the midpoint instead of
/// dividing by zero, so single-column or perfectly flat scans render centered.
pub fn normalize(offset: IVec3, bounds: &ScanBounds) -> Vec3 {
    let point = offset.as_vec3();
    Vec3::new(
        normalize_axis(point.x, bounds.min.x, bounds.max.x),
        normalize_axis(point.y, bounds.min.y, bounds.max.y),
        normalize_axis(point.z, bounds.min.z, bounds.max.z),
    )
}

fn normalize_axis(value: f32, min: f32, max: f32) -> f32 {
    let range = max - min;
    if range == 0.0 {
        0.5
    } else {
        (value - min) / range
    }
}

/// Map an offset into the display volume: x/z centered on the volume's axis,
/// y rising from its base. Pure; the caller adds the session's display anchor
/// to get the absolute emission point.
pub fn project(offset: IVec3, bounds: &ScanBounds, volume: &DisplayVolume) -> Vec3 {
    let n = normalize(offset, bounds);
    Vec3::new(
        (n.x - 0.5) * volume.width,
        n.y * volume.height,
        (n.z - 0.5) * volume.depth,
    )
}
