//! Holotopo — holographic terrain map demo. Runs the hologram_engine app
//! against a procedural world, drawing points with the gizmo sink.

use bevy::prelude::*;
use hologram_engine::data::procedural::ProceduralWorld;
use hologram_engine::prelude::*;

fn main() {
    let _ = dotenvy::dotenv();

    HologramBuilder::new()
        .config(HologramConfig::from_env())
        .world(ProceduralWorld::default())
        .clear_color(Color::srgb(0.02, 0.03, 0.05))
        .build()
        .run();
}
