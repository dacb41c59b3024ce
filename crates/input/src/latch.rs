/// Physical state of an edge-triggered key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LatchState {
    #[default]
    Released,
    Pressed,
}

/// Per-key press/release latch.
///
/// A press fires exactly once on the `Released -> Pressed` transition.
/// Repeated key-down reports while the key is held (OS auto-repeat, or the
/// key still being down on a later frame) are absorbed until a release.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyLatch {
    state: LatchState,
    pending: bool,
}

impl KeyLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LatchState {
        self.state
    }

    /// Feed a key transition. Returns `true` if this was a fresh press.
    pub fn set(&mut self, down: bool) -> bool {
        match (self.state, down) {
            (LatchState::Released, true) => {
                self.state = LatchState::Pressed;
                self.pending = true;
                true
            }
            (LatchState::Pressed, false) => {
                self.state = LatchState::Released;
                false
            }
            _ => false,
        }
    }

    /// Consume a press recorded since the last call.
    ///
    /// A press and release that both happen between two frames still yields
    /// one press here, so short taps are never lost to frame pacing.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_fires_once() {
        let mut l = KeyLatch::new();
        assert!(l.set(true));
        assert!(!l.set(true));
        assert!(!l.set(true));
        assert_eq!(l.state(), LatchState::Pressed);
    }

    #[test]
    fn release_rearms() {
        let mut l = KeyLatch::new();
        l.set(true);
        l.set(false);
        assert_eq!(l.state(), LatchState::Released);
        assert!(l.set(true));
    }

    #[test]
    fn take_drains_pending_press() {
        let mut l = KeyLatch::new();
        l.set(true);
        assert!(l.take());
        assert!(!l.take());
    }

    #[test]
    fn tap_between_frames_is_kept() {
        let mut l = KeyLatch::new();
        l.set(true);
        l.set(false);
        assert!(l.take());
        assert!(!l.take());
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut l = KeyLatch::new();
        assert!(!l.set(false));
        assert!(!l.take());
    }
}
