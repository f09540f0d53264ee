//! Channel-backed event sources. The host environment (a window procedure,
//! a test, the demo script) holds the senders; the pump side drains the
//! receivers on the one logical thread the simulator runs on.

use crossbeam_channel::{unbounded, Receiver, Sender};
use swirl_platform::{PointerSource, VisibilitySource};

/// Pointer positions queued by the host environment, delivered in order.
pub struct ChannelPointerSource {
    receiver: Receiver<(f32, f32)>,
}

pub fn pointer_channel() -> (Sender<(f32, f32)>, ChannelPointerSource) {
    let (sender, receiver) = unbounded();
    (sender, ChannelPointerSource { receiver })
}

impl PointerSource for ChannelPointerSource {
    fn next_move(&mut self) -> Option<(f32, f32)> {
        self.receiver.try_recv().ok()
    }
}

/// Hidden/shown transitions queued by the host environment.
pub struct ChannelVisibilitySource {
    receiver: Receiver<bool>,
}

pub fn visibility_channel() -> (Sender<bool>, ChannelVisibilitySource) {
    let (sender, receiver) = unbounded();
    (sender, ChannelVisibilitySource { receiver })
}

impl VisibilitySource for ChannelVisibilitySource {
    fn next_change(&mut self) -> Option<bool> {
        self.receiver.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_events_drain_in_delivery_order() {
        let (sender, mut source) = pointer_channel();
        sender.send((1.0, 2.0)).unwrap();
        sender.send((3.0, 4.0)).unwrap();
        assert_eq!(source.next_move(), Some((1.0, 2.0)));
        assert_eq!(source.next_move(), Some((3.0, 4.0)));
        assert_eq!(source.next_move(), None);
    }

    #[test]
    fn visibility_transitions_drain_in_delivery_order() {
        let (sender, mut source) = visibility_channel();
        sender.send(true).unwrap();
        sender.send(false).unwrap();
        assert_eq!(source.next_change(), Some(true));
        assert_eq!(source.next_change(), Some(false));
        assert_eq!(source.next_change(), None);
    }
}
