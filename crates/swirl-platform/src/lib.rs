//! Platform abstraction traits so `swirl-core` stays host-agnostic.
//!
//! The trail effect needs four things from its host: a 2D surface sized to
//! the viewport, a way to get called back once per display refresh, pointer
//! position events, and hidden/shown notifications. Each is a trait here;
//! `swirl-raster` carries the reference implementations.

use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Straight-alpha color, all channels normalized to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Channel bytes in RGBA order, clamped to the displayable range.
    pub fn to_bytes(self) -> [u8; 4] {
        let quantize = |channel: f32| (channel.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }
}

/// Identifies one scheduled frame callback, for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameHandle(pub u64);

/// Full-window 2D raster the effect draws into. The owner keeps it sized to
/// the viewport; the core only ever clears it and stamps dots.
pub trait DrawSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Discard the entire previous frame.
    fn clear(&mut self);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba);
}

/// One-shot display-refresh callbacks, in the requestAnimationFrame mold.
pub trait FrameScheduler {
    /// Register interest in the next refresh.
    fn request_frame(&mut self) -> FrameHandle;
    /// Deregister a pending callback. Must actually prevent it from firing,
    /// not merely flag it as unwanted.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Pointer position events in strict delivery order.
pub trait PointerSource {
    /// Next queued position, or `None` once drained.
    fn next_move(&mut self) -> Option<(f32, f32)>;
}

/// Hidden/shown transitions for the hosting surface (`true` = hidden).
pub trait VisibilitySource {
    fn next_change(&mut self) -> Option<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_to_bytes_quantizes_and_clamps() {
        let bytes = Rgba::new(1.0, 0.0, 0.5, 2.0).to_bytes();
        assert_eq!(bytes, [255, 0, 128, 255]);

        let bytes = Rgba::new(-0.5, 0.25, 1.5, 0.0).to_bytes();
        assert_eq!(bytes, [0, 64, 255, 0]);
    }
}
