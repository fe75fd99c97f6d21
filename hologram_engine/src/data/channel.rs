use std::sync::Arc;
use std::thread;
use std::time::Duration;

use bevy::math::IVec3;
use crossbeam_channel::{Receiver, Sender};

use crate::data::model::{ObserverId, ScanSnapshot};
use crate::data::{scanner, WorldSampler};

const CHANNEL_CAPACITY: usize = 64;

/// One one-shot scan order, carrying the generation of the session that asked
/// for it so a result arriving after replacement can be told apart.
#[derive(Clone, Copy, Debug)]
pub struct ScanRequest {
    pub observer: ObserverId,
    pub generation: u64,
    pub center: IVec3,
    pub radius: f32,
}

/// A completed scan on its way back to the foreground.
#[derive(Clone)]
pub struct ScanResult {
    pub observer: ObserverId,
    pub generation: u64,
    pub snapshot: Arc<ScanSnapshot>,
}

/// Bevy resource holding both ends of the scan handoff channel.
/// Worker threads send results; the publish system drains them each frame.
#[derive(bevy::prelude::Resource)]
pub struct ScanChannel {
    tx: Sender<ScanResult>,
    rx: Receiver<ScanResult>,
}

impl Default for ScanChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanChannel {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::bounded(CHANNEL_CAPACITY);
        Self { tx, rx }
    }

    /// Run `request` on a dedicated worker thread and deliver the snapshot
    /// through the channel. The worker only reads the world; publication (and
    /// the staleness check) happens on the foreground side.
    pub fn dispatch(&self, request: ScanRequest, world: Arc<dyn WorldSampler>) {
        let tx = self.tx.clone();
        thread::spawn(move || {
            let snapshot = scanner::scan(world.as_ref(), request.center, request.radius);
            eprintln!(
                "holotopo: scan for observer {} complete ({} samples, {} unresolved)",
                request.observer.0,
                snapshot.samples.len(),
                snapshot.unresolved
            );
            let result = ScanResult {
                observer: request.observer,
                generation: request.generation,
                snapshot: Arc::new(snapshot),
            };
            if tx.send(result).is_err() {
                eprintln!("holotopo: scan channel closed, dropping result");
            }
        });
    }

    /// Non-blocking receive, for the per-frame drain.
    pub fn try_recv(&self) -> Option<ScanResult> {
        self.rx.try_recv().ok()
    }

    /// Blocking receive with a deadline, for headless callers and tests.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ScanResult> {
        self.rx.recv_timeout(timeout).ok()
    }
}
