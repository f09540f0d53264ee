use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use swirl_platform::{DrawSurface, FrameHandle, FrameScheduler};
use tracing::{debug, trace};

use crate::{Particle, TrailConfig};

/// Owns every live trail particle plus the pointer and frame bookkeeping.
///
/// Single-threaded by construction: the host pumps events one at a time and
/// each handler runs to completion, so the collection is never shared and
/// never needs a lock. Pointer events append at the tail; the step pass
/// walks in that same insertion order, so rendering is deterministic for a
/// fixed input sequence and seed.
pub struct TrailSimulator {
    config: TrailConfig,
    /// Insertion order = spawn order; the front is always the oldest survivor.
    particles: VecDeque<Particle>,
    last_pointer: Vec2,
    /// Outstanding frame registration; `Some` exactly while running.
    pending_frame: Option<FrameHandle>,
    rng: Pcg64,
}

impl TrailSimulator {
    /// Build a simulator that is already running: the first frame is
    /// requested before this returns.
    pub fn new(config: TrailConfig, scheduler: &mut dyn FrameScheduler) -> Self {
        Self::with_rng(config, Pcg64::from_entropy(), scheduler)
    }

    /// Deterministic variant for tests and replays.
    pub fn with_seed(config: TrailConfig, seed: u64, scheduler: &mut dyn FrameScheduler) -> Self {
        Self::with_rng(config, Pcg64::seed_from_u64(seed), scheduler)
    }

    fn with_rng(config: TrailConfig, rng: Pcg64, scheduler: &mut dyn FrameScheduler) -> Self {
        debug!(
            preset = %config.name,
            max_particles = config.max_particles,
            "trail simulator starting"
        );
        Self {
            config,
            particles: VecDeque::new(),
            last_pointer: Vec2::ZERO,
            pending_frame: Some(scheduler.request_frame()),
            rng,
        }
    }

    /// Feed one pointer position event. Spawns a run of particles along the
    /// travelled segment when the pointer moved far enough; sub-threshold
    /// motion only records the new position, which also keeps zero-length
    /// displacements away from `atan2`.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        let next = Vec2::new(x, y);
        let delta = next - self.last_pointer;
        let distance = delta.length();
        if distance <= self.config.segment_length {
            self.last_pointer = next;
            return;
        }

        let angle = delta.y.atan2(delta.x);
        let steps = (distance / self.config.segment_length).ceil() as u32;
        for i in 0..steps {
            let ratio = i as f32 / steps as f32;
            let pos = self.last_pointer + delta * ratio;
            self.particles
                .push_back(Particle::spawn(pos, delta, angle, &self.config, &mut self.rng));
            // Evict as we go so even a pathological stroke never holds more
            // than the ceiling.
            self.trim_to_capacity();
        }
        trace!(spawned = steps, live = self.particles.len(), "pointer stroke");

        self.last_pointer = next;
    }

    /// One frame: wipe the surface, advance and stamp every particle in
    /// insertion order, drop the expired, bound the population, then keep
    /// the loop alive by requesting the next refresh (unless paused).
    pub fn step(&mut self, surface: &mut dyn DrawSurface, scheduler: &mut dyn FrameScheduler) {
        surface.clear();

        // Stable single pass: culling mid-iteration skips nothing and
        // touches nothing twice.
        let config = &self.config;
        self.particles.retain_mut(|particle| {
            particle.update(config.swirl_damping);
            particle.draw(surface, config);
            !particle.expired()
        });

        self.trim_to_capacity();

        if self.pending_frame.is_some() {
            self.pending_frame = Some(scheduler.request_frame());
        }
    }

    /// Resume the frame loop. No-op while already running.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.pending_frame.is_none() {
            self.pending_frame = Some(scheduler.request_frame());
            debug!(live = self.particles.len(), "trail resumed");
        }
    }

    /// Pause the frame loop, deregistering the outstanding callback so the
    /// next refresh fires nothing. Particle state is kept as-is and ages on
    /// from here once resumed.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let Some(handle) = self.pending_frame.take() {
            scheduler.cancel_frame(handle);
            debug!(live = self.particles.len(), "trail paused");
        }
    }

    /// Host-visibility transitions map directly onto pause/resume.
    pub fn on_visibility_change(&mut self, hidden: bool, scheduler: &mut dyn FrameScheduler) {
        if hidden {
            self.stop(scheduler);
        } else {
            self.start(scheduler);
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Handle of the outstanding frame request, if running. Hosts use this
    /// to route a fired callback back to `step`.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    /// Oldest-inserted particles go first once the ceiling is hit. Age
    /// expiry is a separate mechanism; the two are deliberately not
    /// reconciled.
    fn trim_to_capacity(&mut self) {
        while self.particles.len() > self.config.max_particles {
            self.particles.pop_front();
        }
    }
}
