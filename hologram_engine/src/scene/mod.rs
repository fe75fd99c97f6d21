pub(crate) mod demo;
pub(crate) mod sessions;

pub use demo::{demo_plugin, setup_scene, DEMO_OBSERVER};
pub use sessions::{
    publish_scans, render_holograms, rescan_sessions, Session, SessionInfo, SessionRegistry,
    StartRequest,
};
