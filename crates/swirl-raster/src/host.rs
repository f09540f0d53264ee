use crossbeam_channel::Sender;
use swirl_core::{TrailConfig, TrailSimulator};
use swirl_platform::{PointerSource, VisibilitySource};
use tracing::info;

use crate::canvas::RasterCanvas;
use crate::events::{
    pointer_channel, visibility_channel, ChannelPointerSource, ChannelVisibilitySource,
};
use crate::scheduler::ManualScheduler;

/// Senders the host environment uses to feed the effect.
pub struct HostChannels {
    pub pointer: Sender<(f32, f32)>,
    pub visibility: Sender<bool>,
}

/// Thin glue binding the simulator to the raster collaborators. One
/// instance owns all of them; everything runs on the caller's thread,
/// one pumped event at a time.
pub struct Host {
    canvas: RasterCanvas,
    scheduler: ManualScheduler,
    pointer: ChannelPointerSource,
    visibility: ChannelVisibilitySource,
    simulator: TrailSimulator,
}

impl Host {
    /// The simulator comes up already running, so the first `pump` after
    /// construction renders a frame.
    pub fn new(config: TrailConfig, width: u32, height: u32) -> (Self, HostChannels) {
        let canvas = RasterCanvas::new(width, height);
        let mut scheduler = ManualScheduler::new();
        let (pointer_sender, pointer) = pointer_channel();
        let (visibility_sender, visibility) = visibility_channel();
        let simulator = TrailSimulator::new(config, &mut scheduler);
        info!(width, height, "host ready");
        (
            Self {
                canvas,
                scheduler,
                pointer,
                visibility,
                simulator,
            },
            HostChannels {
                pointer: pointer_sender,
                visibility: visibility_sender,
            },
        )
    }

    /// Deterministic variant for tests and replays.
    pub fn with_seed(config: TrailConfig, seed: u64, width: u32, height: u32) -> (Self, HostChannels) {
        let canvas = RasterCanvas::new(width, height);
        let mut scheduler = ManualScheduler::new();
        let (pointer_sender, pointer) = pointer_channel();
        let (visibility_sender, visibility) = visibility_channel();
        let simulator = TrailSimulator::with_seed(config, seed, &mut scheduler);
        (
            Self {
                canvas,
                scheduler,
                pointer,
                visibility,
                simulator,
            },
            HostChannels {
                pointer: pointer_sender,
                visibility: visibility_sender,
            },
        )
    }

    /// Run one display refresh: drain queued input events in delivery
    /// order, then fire whichever frame callback is due. Every handler runs
    /// to completion before the next event is looked at.
    pub fn pump(&mut self) {
        while let Some((x, y)) = self.pointer.next_move() {
            self.simulator.on_pointer_move(x, y);
        }
        while let Some(hidden) = self.visibility.next_change() {
            self.simulator.on_visibility_change(hidden, &mut self.scheduler);
        }
        for handle in self.scheduler.tick() {
            // Only the callback that is still registered to the simulator
            // runs; a handle cancelled by a pause above never gets here.
            if self.simulator.pending_frame() == Some(handle) {
                self.simulator.step(&mut self.canvas, &mut self.scheduler);
            }
        }
    }

    /// Viewport tracking on behalf of the surface owner.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.resize(width, height);
    }

    pub fn canvas(&self) -> &RasterCanvas {
        &self.canvas
    }

    pub fn simulator(&self) -> &TrailSimulator {
        &self.simulator
    }
}
