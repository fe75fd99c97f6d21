//! Per-observer session lifecycle and the foreground scheduling systems.
//!
//! A session moves through `Scanning` (snapshot absent, worker running) to
//! `Displaying` (snapshot present, refresh timer armed); it leaves the
//! registry on an explicit stop, on replacement by a newer start, or when the
//! sink reports its observer unreachable.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use bevy::math::{IVec3, Vec3};
use bevy::prelude::*;

use crate::config::HologramConfig;
use crate::data::{
    ObserverId, ScanChannel, ScanRequest, ScanResult, ScanSnapshot, WorldResource,
};
use crate::render::{self, ColorMode, SinkResource};

/// Everything tracked for one observer's active hologram.
pub struct Session {
    pub center: IVec3,
    pub radius: f32,
    pub created_at: Instant,
    pub display_anchor: Vec3,
    /// Emission failures accumulated over the session, for diagnostics only.
    pub emit_failures: u64,
    generation: u64,
    snapshot: Option<Arc<ScanSnapshot>>,
    refresh: Timer,
    rescan: Option<Timer>,
}

impl Session {
    /// The current published snapshot, if the session is displaying yet.
    pub fn snapshot(&self) -> Option<&Arc<ScanSnapshot>> {
        self.snapshot.as_ref()
    }
}

/// Arguments to [`SessionRegistry::start`].
#[derive(Clone, Copy, Debug)]
pub struct StartRequest {
    pub observer: ObserverId,
    pub center: IVec3,
    pub radius: f32,
    pub display_anchor: Vec3,
}

/// Session summary exposed to the command layer.
#[derive(Clone, Copy, Debug)]
pub struct SessionInfo {
    pub center: IVec3,
    pub radius: f32,
    pub created_at: Instant,
}

/// Observer → session map. Only systems holding `ResMut` touch it, so every
/// mutation happens under the scheduler's exclusive borrow; scan workers never
/// see it and hand their results over through the [`ScanChannel`] instead.
#[derive(Resource, Default)]
pub struct SessionRegistry {
    sessions: HashMap<ObserverId, Session>,
    next_generation: u64,
}

impl SessionRegistry {
    /// Start a hologram for an observer, replacing any prior session outright.
    /// Returns synchronously; the scan itself runs on a background worker and
    /// publishes through the channel. A replaced session's generation dies
    /// with it, so its in-flight scan (if any) is discarded on arrival and it
    /// emits nothing further.
    pub fn start(
        &mut self,
        request: StartRequest,
        world: &WorldResource,
        channel: &ScanChannel,
        config: &HologramConfig,
    ) {
        if self.sessions.remove(&request.observer).is_some() {
            eprintln!(
                "holotopo: replacing active session for observer {}",
                request.observer.0
            );
        }

        self.next_generation += 1;
        let generation = self.next_generation;
        let radius = config.clamp_radius(request.radius);

        self.sessions.insert(
            request.observer,
            Session {
                center: request.center,
                radius,
                created_at: Instant::now(),
                display_anchor: request.display_anchor,
                emit_failures: 0,
                generation,
                snapshot: None,
                refresh: Timer::new(config.refresh_interval, TimerMode::Repeating),
                rescan: config
                    .rescan_interval
                    .map(|interval| Timer::new(interval, TimerMode::Repeating)),
            },
        );

        channel.dispatch(
            ScanRequest {
                observer: request.observer,
                generation,
                center: request.center,
                radius,
            },
            Arc::clone(&world.0),
        );
    }

    /// Tear down the observer's session, if any. Returns whether one existed;
    /// stopping twice is a safe no-op. Removal is synchronous, so no emission
    /// for this observer can follow.
    pub fn stop(&mut self, observer: ObserverId) -> bool {
        self.sessions.remove(&observer).is_some()
    }

    pub fn has_session(&self, observer: ObserverId) -> bool {
        self.sessions.contains_key(&observer)
    }

    pub fn session_info(&self, observer: ObserverId) -> Option<SessionInfo> {
        self.sessions.get(&observer).map(|session| SessionInfo {
            center: session.center,
            radius: session.radius,
            created_at: session.created_at,
        })
    }

    pub fn session(&self, observer: ObserverId) -> Option<&Session> {
        self.sessions.get(&observer)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ObserverId, &Session)> {
        self.sessions.iter()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Install a finished scan — but only if the session that requested it is
    /// still the registered one. Results from replaced or stopped sessions
    /// are discarded here; background cancellation is best-effort by design.
    pub fn publish(&mut self, result: ScanResult) {
        match self.sessions.get_mut(&result.observer) {
            Some(session) if session.generation == result.generation => {
                session.snapshot = Some(result.snapshot);
            }
            _ => {
                eprintln!(
                    "holotopo: discarding stale scan for observer {}",
                    result.observer.0
                );
            }
        }
    }
}

const MAX_PUBLISHES_PER_FRAME: usize = 4;

/// Foreground half of the scan handoff: drain finished scans into their
/// sessions, a bounded number per frame.
pub fn publish_scans(channel: Res<ScanChannel>, mut registry: ResMut<SessionRegistry>) {
    let mut published = 0;
    while published < MAX_PUBLISHES_PER_FRAME {
        match channel.try_recv() {
            Some(result) => {
                registry.publish(result);
                published += 1;
            }
            None => break,
        }
    }
}

/// Emission pass: for every displaying session whose refresh timer fired,
/// project and color each sample and hand it to the sink. Observers the sink
/// can no longer reach have their sessions torn down here; per-sample
/// emission failures are counted and skipped, never fatal.
pub fn render_holograms(
    time: Res<Time>,
    mut registry: ResMut<SessionRegistry>,
    sink: Res<SinkResource>,
    config: Res<HologramConfig>,
) {
    let mut gone: Vec<ObserverId> = Vec::new();

    for (&observer, session) in registry.sessions.iter_mut() {
        session.refresh.tick(time.delta());
        if !session.refresh.just_finished() {
            continue;
        }
        let Some(snapshot) = session.snapshot.clone() else {
            continue;
        };
        if !sink.0.is_reachable(observer) {
            gone.push(observer);
            continue;
        }

        let mut failures = 0u64;
        for sample in &snapshot.samples {
            let point = session.display_anchor
                + render::project(sample.offset, &snapshot.bounds, &config.display_volume);
            let color = match config.color_mode {
                ColorMode::Material => render::material_color(sample.material),
                ColorMode::Height => {
                    render::height_color(render::normalize(sample.offset, &snapshot.bounds).y)
                }
            };
            if sink
                .0
                .emit(observer, point, color, config.particle_size)
                .is_err()
            {
                failures += 1;
            }
        }
        session.emit_failures += failures;
    }

    for observer in gone {
        registry.sessions.remove(&observer);
        eprintln!("holotopo: observer {} gone, session ended", observer.0);
    }
}

/// Optional periodic re-scan: when configured, dispatch a fresh scan per
/// session on its rescan timer. The new snapshot replaces the old one on
/// arrival under the same generation, keeping the display current with world
/// edits.
pub fn rescan_sessions(
    time: Res<Time>,
    mut registry: ResMut<SessionRegistry>,
    world: Res<WorldResource>,
    channel: Res<ScanChannel>,
) {
    for (&observer, session) in registry.sessions.iter_mut() {
        let Some(rescan) = session.rescan.as_mut() else {
            continue;
        };
        rescan.tick(time.delta());
        if !rescan.just_finished() {
            continue;
        }
        channel.dispatch(
            ScanRequest {
                observer,
                generation: session.generation,
                center: session.center,
                radius: session.radius,
            },
            Arc::clone(&world.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::data::{Material, SurfaceSample, WorldSampler};

    struct FlatWorld;

    impl WorldSampler for FlatWorld {
        fn surface_at(&self, _x: i32, _z: i32) -> SurfaceSample {
            SurfaceSample {
                height: Some(64),
                material: Material::GrassBlock,
            }
        }
    }

    fn fixture() -> (SessionRegistry, WorldResource, ScanChannel, HologramConfig) {
        (
            SessionRegistry::default(),
            WorldResource(Arc::new(FlatWorld)),
            ScanChannel::new(),
            HologramConfig::default(),
        )
    }

    fn request(observer: u64, radius: f32) -> StartRequest {
        StartRequest {
            observer: ObserverId(observer),
            center: IVec3::new(0, 64, 0),
            radius,
            display_anchor: Vec3::new(10.0, 5.0, 10.0),
        }
    }

    #[test]
    fn start_registers_and_scan_publishes() {
        let (mut registry, world, channel, config) = fixture();

        registry.start(request(1, 2.0), &world, &channel, &config);
        assert!(registry.has_session(ObserverId(1)));
        assert!(registry.session(ObserverId(1)).unwrap().snapshot().is_none());

        let result = channel
            .recv_timeout(Duration::from_secs(5))
            .expect("scan result");
        registry.publish(result);

        let session = registry.session(ObserverId(1)).unwrap();
        assert_eq!(session.snapshot().unwrap().samples.len(), 13);
    }

    #[test]
    fn stop_reports_existence_exactly_once() {
        let (mut registry, world, channel, config) = fixture();

        assert!(!registry.stop(ObserverId(1)));
        registry.start(request(1, 2.0), &world, &channel, &config);
        assert!(registry.stop(ObserverId(1)));
        assert!(!registry.stop(ObserverId(1)));
        assert!(!registry.has_session(ObserverId(1)));
    }

    #[test]
    fn replacement_discards_the_stale_scan() {
        let (mut registry, world, channel, config) = fixture();

        registry.start(request(1, 2.0), &world, &channel, &config);
        let stale = channel
            .recv_timeout(Duration::from_secs(5))
            .expect("first scan result");

        // Replace before the first result is published.
        registry.start(request(1, 0.0), &world, &channel, &config);
        registry.publish(stale);
        assert!(
            registry.session(ObserverId(1)).unwrap().snapshot().is_none(),
            "stale snapshot must not land on the replacement session"
        );

        let fresh = channel
            .recv_timeout(Duration::from_secs(5))
            .expect("second scan result");
        registry.publish(fresh);
        assert_eq!(
            registry
                .session(ObserverId(1))
                .unwrap()
                .snapshot()
                .unwrap()
                .samples
                .len(),
            1
        );
    }

    #[test]
    fn publish_after_stop_is_discarded() {
        let (mut registry, world, channel, config) = fixture();

        registry.start(request(1, 1.0), &world, &channel, &config);
        let result = channel
            .recv_timeout(Duration::from_secs(5))
            .expect("scan result");
        registry.stop(ObserverId(1));

        registry.publish(result);
        assert!(!registry.has_session(ObserverId(1)));
    }

    #[test]
    fn repeat_publishes_under_one_generation_replace_the_snapshot() {
        // The rescan path: same session, same generation, newer snapshot.
        let (mut registry, world, channel, config) = fixture();

        registry.start(request(1, 1.0), &world, &channel, &config);
        let first = channel
            .recv_timeout(Duration::from_secs(5))
            .expect("scan result");
        let generation = first.generation;
        registry.publish(first);

        channel.dispatch(
            ScanRequest {
                observer: ObserverId(1),
                generation,
                center: IVec3::new(0, 64, 0),
                radius: 2.0,
            },
            Arc::clone(&world.0),
        );
        let second = channel
            .recv_timeout(Duration::from_secs(5))
            .expect("rescan result");
        registry.publish(second);

        assert_eq!(
            registry
                .session(ObserverId(1))
                .unwrap()
                .snapshot()
                .unwrap()
                .samples
                .len(),
            13
        );
    }

    #[test]
    fn start_clamps_the_radius_to_the_configured_maximum() {
        let (mut registry, world, channel, config) = fixture();

        registry.start(request(1, 1e6), &world, &channel, &config);
        let info = registry.session_info(ObserverId(1)).unwrap();
        assert_eq!(info.radius, config.max_radius);
        assert_eq!(info.center, IVec3::new(0, 64, 0));
    }

    #[test]
    fn sessions_are_tracked_per_observer() {
        let (mut registry, world, channel, config) = fixture();

        registry.start(request(1, 2.0), &world, &channel, &config);
        registry.start(request(2, 3.0), &world, &channel, &config);
        assert_eq!(registry.len(), 2);

        assert!(registry.stop(ObserverId(1)));
        assert!(registry.has_session(ObserverId(2)));
        assert!(registry.session_info(ObserverId(1)).is_none());
    }
}
