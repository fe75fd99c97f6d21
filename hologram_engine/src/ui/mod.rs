pub(crate) mod hud;

pub use hud::hud_plugin;
