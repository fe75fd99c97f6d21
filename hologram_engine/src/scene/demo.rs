//! Demo scene: camera, light, and keyboard start/stop for a local observer.
//! This stands in for the host's command layer; real integrations drive
//! [`SessionRegistry`] from their own input path.

use bevy::prelude::*;

use crate::config::HologramConfig;
use crate::data::{ObserverId, ScanChannel, WorldResource};
use crate::scene::sessions::{SessionRegistry, StartRequest};

/// The single observer the demo controls act for.
pub const DEMO_OBSERVER: ObserverId = ObserverId(1);

const DISPLAY_ANCHOR: Vec3 = Vec3::new(0.0, 1.0, 0.0);

pub fn demo_plugin(app: &mut App) {
    app.add_systems(Startup, setup_scene)
        .add_systems(Update, demo_controls);
}

pub fn setup_scene(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 8.0, 16.0).looking_at(Vec3::new(0.0, 3.0, 0.0), Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight::default(),
        Transform::from_xyz(4., 8., 4.).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
    });
    eprintln!("holotopo: Space scans the area around the origin, X stops the hologram");
}

/// Space starts (or restarts) a hologram of the area around the world origin;
/// X stops it.
fn demo_controls(
    keys: Res<ButtonInput<KeyCode>>,
    mut registry: ResMut<SessionRegistry>,
    world: Res<WorldResource>,
    channel: Res<ScanChannel>,
    config: Res<HologramConfig>,
) {
    if keys.just_pressed(KeyCode::Space) {
        let center_y = world.0.surface_at(0, 0).height.unwrap_or(64);
        let request = StartRequest {
            observer: DEMO_OBSERVER,
            center: IVec3::new(0, center_y, 0),
            radius: config.default_radius,
            display_anchor: DISPLAY_ANCHOR,
        };
        registry.start(request, &world, &channel, &config);
        eprintln!("holotopo: scanning r={} around the origin", request.radius);
    }

    if keys.just_pressed(KeyCode::KeyX) {
        if registry.stop(DEMO_OBSERVER) {
            eprintln!("holotopo: hologram stopped");
        } else {
            eprintln!("holotopo: no active hologram");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_scene_spawns_camera_and_light() {
        let mut app = App::new();
        app.add_systems(Startup, setup_scene);

        app.update();

        let world = app.world_mut();
        let cameras = world.query::<&Camera3d>().iter(world).count();
        let lights = world.query::<&DirectionalLight>().iter(world).count();
        assert!(cameras >= 1);
        assert!(lights >= 1);
    }
}
