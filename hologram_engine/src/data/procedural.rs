//! Deterministic procedural demo world: a hash-noise heightfield with
//! height-banded materials. Same seed, same terrain, no RNG state.

use crate::data::model::Material;
use crate::data::{SurfaceSample, WorldSampler};

pub struct ProceduralWorld {
    pub seed: u64,
    pub base_height: i32,
    pub amplitude: f32,
    pub sea_level: i32,
    /// Columns farther than this from the origin report an unknown height,
    /// mimicking the ungenerated fringe of a real world. `None` generates
    /// everywhere.
    pub generated_radius: Option<i32>,
}

impl Default for ProceduralWorld {
    fn default() -> Self {
        Self {
            seed: 0x7107_0b0_5eed,
            base_height: 64,
            amplitude: 24.0,
            sea_level: 60,
            generated_radius: None,
        }
    }
}

impl ProceduralWorld {
    fn lattice(&self, x: i32, z: i32, salt: u64) -> f32 {
        (hash2(self.seed ^ salt, x, z) & 0xFFFF) as f32 / 65535.0
    }

    /// Bilinear value noise over a lattice of `cell`-sized squares.
    fn value_noise(&self, x: i32, z: i32, cell: i32, salt: u64) -> f32 {
        let cx = x.div_euclid(cell);
        let cz = z.div_euclid(cell);
        let fx = fade(x.rem_euclid(cell) as f32 / cell as f32);
        let fz = fade(z.rem_euclid(cell) as f32 / cell as f32);

        let v00 = self.lattice(cx, cz, salt);
        let v10 = self.lattice(cx + 1, cz, salt);
        let v01 = self.lattice(cx, cz + 1, salt);
        let v11 = self.lattice(cx + 1, cz + 1, salt);

        let bottom = v00 + (v10 - v00) * fx;
        let top = v01 + (v11 - v01) * fx;
        bottom + (top - bottom) * fz
    }

    fn height_at(&self, x: i32, z: i32) -> i32 {
        let broad = self.value_noise(x, z, 48, 1);
        let detail = self.value_noise(x, z, 12, 2);
        let relief = (broad * 0.75 + detail * 0.25) * 2.0 - 1.0;
        self.base_height + (relief * self.amplitude).round() as i32
    }

    fn material_at(&self, x: i32, z: i32, height: i32) -> Material {
        if height < self.sea_level {
            return Material::Water;
        }
        if height <= self.sea_level + 1 {
            return Material::Sand;
        }

        let peak = self.base_height + (self.amplitude * 0.7) as i32;
        if height >= peak + 4 {
            return Material::Snow;
        }
        if height >= peak {
            return Material::Stone;
        }

        // Sparse surface features on the grassland.
        match hash2(self.seed ^ 0xfea7, x, z) % 97 {
            0 => Material::Poppy,
            1 => Material::Dandelion,
            2..=4 => Material::OakLeaves,
            5 => Material::CoalOre,
            6 => Material::Gravel,
            _ => Material::GrassBlock,
        }
    }
}

impl WorldSampler for ProceduralWorld {
    fn surface_at(&self, x: i32, z: i32) -> SurfaceSample {
        if let Some(radius) = self.generated_radius {
            if x * x + z * z > radius * radius {
                return SurfaceSample {
                    height: None,
                    material: Material::Stone,
                };
            }
        }

        let height = self.height_at(x, z);
        SurfaceSample {
            height: Some(height),
            material: self.material_at(x, z, height),
        }
    }
}

fn fade(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// splitmix64-style avalanche over the column coordinates.
fn hash2(seed: u64, x: i32, z: i32) -> u64 {
    let mut h = seed
        ^ (x as i64 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (z as i64 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    h ^= h >> 30;
    h = h.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h ^= h >> 27;
    h = h.wrapping_mul(0x94D0_49BB_1331_11EB);
    h ^ (h >> 31)
}
