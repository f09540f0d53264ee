//! Reference host collaborators for the swirl trail: a software RGBA
//! canvas, a hand-cranked frame scheduler, channel-backed event sources,
//! and a [`Host`] that pumps them into the simulator.

mod canvas;
mod events;
mod host;
mod scheduler;

pub use canvas::RasterCanvas;
pub use events::{
    pointer_channel, visibility_channel, ChannelPointerSource, ChannelVisibilitySource,
};
pub use host::{Host, HostChannels};
pub use scheduler::ManualScheduler;
