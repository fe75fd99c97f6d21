//! HUD overlay: active hologram sessions and engine diagnostics.

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use crate::scene::SessionRegistry;

pub fn hud_plugin(app: &mut App) {
    app.add_plugins(EguiPlugin)
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_systems(Update, hud_overlay_system);
}

fn hud_overlay_system(
    mut contexts: EguiContexts,
    registry: Res<SessionRegistry>,
    diagnostics: Res<DiagnosticsStore>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);

    egui::Window::new("Holotopo")
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 210))
                .inner_margin(egui::Margin::same(12))
                .corner_radius(egui::CornerRadius::same(6)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
            ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(200, 220, 240));

            if registry.is_empty() {
                ui.label("No active holograms — press Space");
            }

            for (observer, session) in registry.iter() {
                ui.label(
                    egui::RichText::new(format!("Observer {}", observer.0))
                        .size(16.0)
                        .color(egui::Color32::from_rgb(100, 220, 180)),
                );
                ui.label(format!(
                    "Radius {:.0}  Up {}",
                    session.radius,
                    format_uptime(session.created_at.elapsed().as_secs())
                ));
                match session.snapshot() {
                    Some(snapshot) => {
                        ui.label(format!(
                            "Samples {}  Unresolved {}",
                            snapshot.samples.len(),
                            snapshot.unresolved
                        ));
                    }
                    None => {
                        ui.label("Scanning...");
                    }
                }
                if session.emit_failures > 0 {
                    ui.label(format!("Emit failures {}", session.emit_failures));
                }
                ui.separator();
            }

            ui.label(format!("FPS  {fps:.0}"));
        });
}

fn format_uptime(secs: u64) -> String {
    let hours = secs / 3600;
    let mins = (secs / 60) % 60;
    let secs = secs % 60;
    format!("{hours:02}:{mins:02}:{secs:02}")
}
