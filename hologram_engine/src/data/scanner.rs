//! Terrain scanner: one surface sample per column of a disc-shaped region.

use std::time::Instant;

use bevy::math::IVec3;

use crate::data::model::{Sample, ScanBounds, ScanSnapshot};
use crate::data::WorldSampler;

/// Scan every integer column `(x, z)` within `radius` of `center` (a disc;
/// ties at exactly `radius` are included) and return the samples with their
/// bounds, computed in the same pass.
///
/// Columns the world cannot resolve fall back to the center's own height, so
/// a single ungenerated chunk never aborts the scan; the substitutions are
/// counted in [`ScanSnapshot::unresolved`].
///
/// Runs on a background worker; it only reads the world and never touches
/// session state.
pub fn scan(world: &dyn WorldSampler, center: IVec3, radius: f32) -> ScanSnapshot {
    let reach = radius.ceil() as i32;
    let mut samples = Vec::new();
    let mut bounds = ScanBounds::default();
    let mut unresolved = 0u32;

    for x in -reach..=reach {
        for z in -reach..=reach {
            let distance = ((x * x + z * z) as f32).sqrt();
            if distance > radius {
                continue;
            }

            let surface = world.surface_at(center.x + x, center.z + z);
            let height = match surface.height {
                Some(height) => height,
                None => {
                    unresolved += 1;
                    center.y
                }
            };

            let offset = IVec3::new(x, height - center.y, z);
            bounds.update(offset);
            samples.push(Sample {
                offset,
                material: surface.material,
            });
        }
    }

    ScanSnapshot {
        samples,
        bounds,
        unresolved,
        captured_at: Instant::now(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::data::{Material, SurfaceSample};

    struct FlatWorld;

    impl WorldSampler for FlatWorld {
        fn surface_at(&self, _x: i32, _z: i32) -> SurfaceSample {
            SurfaceSample {
                height: Some(64),
                material: Material::GrassBlock,
            }
        }
    }

    /// Height climbs with x, so the bounds spread on the y axis too.
    struct RampWorld;

    impl WorldSampler for RampWorld {
        fn surface_at(&self, x: i32, _z: i32) -> SurfaceSample {
            SurfaceSample {
                height: Some(64 + x),
                material: Material::Stone,
            }
        }
    }

    /// Resolves nothing east of the origin.
    struct HalfGeneratedWorld;

    impl WorldSampler for HalfGeneratedWorld {
        fn surface_at(&self, x: i32, _z: i32) -> SurfaceSample {
            SurfaceSample {
                height: (x <= 0).then_some(70),
                material: Material::Stone,
            }
        }
    }

    #[test]
    fn radius_two_disc_has_exactly_thirteen_columns() {
        let snapshot = scan(&FlatWorld, IVec3::new(0, 64, 0), 2.0);

        let offsets: HashSet<(i32, i32)> = snapshot
            .samples
            .iter()
            .map(|s| (s.offset.x, s.offset.z))
            .collect();

        let expected: HashSet<(i32, i32)> = [
            (0, 0),
            (1, 0),
            (-1, 0),
            (0, 1),
            (0, -1),
            (1, 1),
            (1, -1),
            (-1, 1),
            (-1, -1),
            (2, 0),
            (-2, 0),
            (0, 2),
            (0, -2),
        ]
        .into_iter()
        .collect();

        assert_eq!(snapshot.samples.len(), 13);
        assert_eq!(offsets, expected);
    }

    #[test]
    fn no_sample_lies_outside_the_radius() {
        let radius = 7.3;
        let snapshot = scan(&FlatWorld, IVec3::new(10, 64, -4), radius);
        assert!(!snapshot.samples.is_empty());
        for sample in &snapshot.samples {
            let planar = ((sample.offset.x.pow(2) + sample.offset.z.pow(2)) as f32).sqrt();
            assert!(planar <= radius, "offset {:?} outside disc", sample.offset);
        }
    }

    #[test]
    fn boundary_ties_are_included() {
        // (3, 4) sits at distance exactly 5.
        let snapshot = scan(&FlatWorld, IVec3::new(0, 64, 0), 5.0);
        assert!(snapshot
            .samples
            .iter()
            .any(|s| s.offset.x == 3 && s.offset.z == 4));
    }

    #[test]
    fn radius_zero_still_samples_the_center() {
        let snapshot = scan(&FlatWorld, IVec3::new(5, 64, 5), 0.0);
        assert_eq!(snapshot.samples.len(), 1);
        assert_eq!(snapshot.samples[0].offset, IVec3::ZERO);
    }

    #[test]
    fn offsets_are_relative_to_the_center_height() {
        let snapshot = scan(&RampWorld, IVec3::new(0, 64, 0), 2.0);
        for sample in &snapshot.samples {
            assert_eq!(sample.offset.y, sample.offset.x);
        }
    }

    #[test]
    fn bounds_cover_all_samples_with_min_below_max() {
        let snapshot = scan(&RampWorld, IVec3::new(0, 64, 0), 3.0);
        assert!(snapshot.bounds.min.cmple(snapshot.bounds.max).all());
        for sample in &snapshot.samples {
            let p = sample.offset.as_vec3();
            assert!(snapshot.bounds.min.cmple(p).all());
            assert!(p.cmple(snapshot.bounds.max).all());
        }
        // RampWorld: y range mirrors the x range.
        assert_eq!(snapshot.bounds.min.y, -3.0);
        assert_eq!(snapshot.bounds.max.y, 3.0);
    }

    #[test]
    fn unknown_height_substitutes_the_center_height() {
        let snapshot = scan(&HalfGeneratedWorld, IVec3::new(0, 70, 0), 2.0);

        // Columns with x > 0: (1,0) (1,1) (1,-1) (2,0).
        assert_eq!(snapshot.unresolved, 4);
        for sample in &snapshot.samples {
            // Resolved columns sit at height 70 == center.y, unresolved ones
            // substitute it, so every offset collapses to dy == 0.
            assert_eq!(sample.offset.y, 0);
        }
    }
}
