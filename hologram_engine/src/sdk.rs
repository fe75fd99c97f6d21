//! SDK entry points and builder for composing the hologram app.

use std::sync::Arc;

use bevy::prelude::*;

use crate::config::HologramConfig;
use crate::data::procedural::ProceduralWorld;
use crate::data::{ScanChannel, WorldResource, WorldSampler};
use crate::render::{gizmo_sink_plugin, GizmoSink, PointSink, SinkResource};
use crate::scene::{demo_plugin, publish_scans, render_holograms, rescan_sessions, SessionRegistry};
use crate::ui::hud_plugin;

/// Core engine wiring: the scan channel, the session registry, and the
/// foreground systems, in publish → rescan → render order.
///
/// Embedders must insert [`WorldResource`], [`SinkResource`], and
/// [`HologramConfig`] themselves; [`HologramBuilder`] does so for the demo.
pub fn hologram_plugin(app: &mut App) {
    app.init_resource::<SessionRegistry>()
        .insert_resource(ScanChannel::new())
        .add_systems(
            Update,
            (publish_scans, rescan_sessions, render_holograms).chain(),
        );
}

/// Builder for the windowed demo/host app.
pub struct HologramBuilder {
    world: Option<Arc<dyn WorldSampler>>,
    sink: Option<Box<dyn PointSink>>,
    config: HologramConfig,
    window_title: String,
    window_resolution: (f32, f32),
    clear_color: Color,
    enable_hud: bool,
    enable_demo_scene: bool,
}

impl Default for HologramBuilder {
    fn default() -> Self {
        Self {
            world: None,
            sink: None,
            config: HologramConfig::default(),
            window_title: "Holotopo".to_string(),
            window_resolution: (1280.0, 720.0),
            clear_color: Color::srgb(0.05, 0.05, 0.08),
            enable_hud: true,
            enable_demo_scene: true,
        }
    }
}

impl HologramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The world to scan. Defaults to a procedural demo world.
    pub fn world(mut self, world: impl WorldSampler) -> Self {
        self.world = Some(Arc::new(world));
        self
    }

    /// Emit through a custom sink instead of the default gizmo sink.
    pub fn sink(mut self, sink: impl PointSink) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn config(mut self, config: HologramConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config_from_env(mut self) -> Self {
        self.config = HologramConfig::from_env();
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn window_resolution(mut self, width: f32, height: f32) -> Self {
        self.window_resolution = (width, height);
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn disable_hud(mut self) -> Self {
        self.enable_hud = false;
        self
    }

    pub fn disable_demo_scene(mut self) -> Self {
        self.enable_demo_scene = false;
        self
    }

    /// Build the Bevy app with the selected world, sink, and plugins.
    pub fn build(self) -> App {
        let world = self
            .world
            .unwrap_or_else(|| Arc::new(ProceduralWorld::default()));

        let mut app = App::new();
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: self.window_title,
                resolution: self.window_resolution.into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(self.clear_color))
        .insert_resource(WorldResource(world))
        .insert_resource(self.config);

        match self.sink {
            Some(sink) => {
                app.insert_resource(SinkResource(sink));
            }
            None => {
                let sink = GizmoSink::default();
                app.insert_resource(sink.clone());
                app.insert_resource(SinkResource::new(sink));
                app.add_plugins(gizmo_sink_plugin);
            }
        }

        hologram_plugin(&mut app);

        if self.enable_demo_scene {
            app.add_plugins(demo_plugin);
        }
        if self.enable_hud {
            app.add_plugins(hud_plugin);
        }

        app
    }
}
