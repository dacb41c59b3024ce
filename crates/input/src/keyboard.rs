use towerworks_common::scene::CAMERA_STEP;

use crate::action::Action;
use crate::latch::KeyLatch;

/// Keys the scene reacts to, independent of the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    W,
    S,
    A,
    D,
}

/// Keyboard state accumulated from key events between processed frames.
///
/// Escape, W and S are edge-triggered: one action per physical press.
/// A and D are level-triggered: one rotation step per processed frame while held.
#[derive(Debug, Default)]
pub struct Keyboard {
    quit: KeyLatch,
    add: KeyLatch,
    remove: KeyLatch,
    rotate_left: bool,
    rotate_right: bool,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition reported by the window.
    pub fn key_event(&mut self, key: Key, down: bool) {
        match key {
            Key::Escape => {
                self.quit.set(down);
            }
            Key::W => {
                if self.add.set(down) {
                    tracing::trace!("add-layer key pressed");
                }
            }
            Key::S => {
                if self.remove.set(down) {
                    tracing::trace!("remove-layer key pressed");
                }
            }
            Key::A => self.rotate_left = down,
            Key::D => self.rotate_right = down,
        }
    }

    /// Drop every held key, e.g. when the window loses focus and release
    /// events will not arrive.
    pub fn release_all(&mut self) {
        for key in [Key::Escape, Key::W, Key::S, Key::A, Key::D] {
            self.key_event(key, false);
        }
    }

    /// Actions for one processed frame. Consumes pending presses.
    pub fn frame_actions(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.quit.take() {
            actions.push(Action::Quit);
        }
        if self.add.take() {
            actions.push(Action::AddLayer);
        }
        if self.remove.take() {
            actions.push(Action::RemoveLayer);
        }
        if self.rotate_left {
            actions.push(Action::RotateCamera(CAMERA_STEP));
        }
        if self.rotate_right {
            actions.push(Action::RotateCamera(-CAMERA_STEP));
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_keyboard_produces_nothing() {
        let mut kb = Keyboard::new();
        assert!(kb.frame_actions().is_empty());
    }

    #[test]
    fn held_edit_key_fires_once_across_frames() {
        let mut kb = Keyboard::new();
        kb.key_event(Key::W, true);
        let mut adds = 0;
        for _ in 0..30 {
            // OS auto-repeat keeps reporting the key as down.
            kb.key_event(Key::W, true);
            adds += kb
                .frame_actions()
                .iter()
                .filter(|a| **a == Action::AddLayer)
                .count();
        }
        assert_eq!(adds, 1);

        kb.key_event(Key::W, false);
        kb.key_event(Key::W, true);
        assert_eq!(kb.frame_actions(), vec![Action::AddLayer]);
    }

    #[test]
    fn held_rotate_key_fires_every_frame() {
        let mut kb = Keyboard::new();
        kb.key_event(Key::A, true);
        for _ in 0..5 {
            assert_eq!(kb.frame_actions(), vec![Action::RotateCamera(CAMERA_STEP)]);
        }
        kb.key_event(Key::A, false);
        assert!(kb.frame_actions().is_empty());
    }

    #[test]
    fn opposite_rotations_both_apply() {
        let mut kb = Keyboard::new();
        kb.key_event(Key::A, true);
        kb.key_event(Key::D, true);
        assert_eq!(
            kb.frame_actions(),
            vec![
                Action::RotateCamera(CAMERA_STEP),
                Action::RotateCamera(-CAMERA_STEP)
            ]
        );
    }

    #[test]
    fn escape_requests_quit() {
        let mut kb = Keyboard::new();
        kb.key_event(Key::Escape, true);
        assert_eq!(kb.frame_actions(), vec![Action::Quit]);
    }

    #[test]
    fn remove_tap_between_frames_counts() {
        let mut kb = Keyboard::new();
        kb.key_event(Key::S, true);
        kb.key_event(Key::S, false);
        assert_eq!(kb.frame_actions(), vec![Action::RemoveLayer]);
        assert!(kb.frame_actions().is_empty());
    }

    #[test]
    fn release_all_stops_rotation() {
        let mut kb = Keyboard::new();
        kb.key_event(Key::D, true);
        kb.key_event(Key::W, true);
        kb.release_all();
        // The press recorded before focus loss is still delivered once.
        assert_eq!(kb.frame_actions(), vec![Action::AddLayer]);
        assert!(kb.frame_actions().is_empty());
    }
}
