//! Swirl core engine: platform-agnostic logic for the pointer trail effect.
//!
//! Everything stateful lives on a [`TrailSimulator`] instance; the host
//! injects the collaborators from `swirl-platform` and forwards events to
//! it. No ambient globals, no threads.

mod config;
mod particle;
mod simulator;

pub use config::{ConfigError, TrailConfig};
pub use particle::Particle;
pub use simulator::TrailSimulator;
