use std::time::Instant;

use towerworks_common::scene::TARGET_FPS;
use towerworks_input::{Action, Keyboard};
use towerworks_kernel::{FrameThrottle, LayerSampler, RandomSampler, Tower};
use towerworks_render::{FrameScene, OrbitCamera, Projection};

/// Render loop lifecycle. `Closing` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Closing,
}

/// What the window should do after a wake-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Arrived before the next frame slot; nothing changed.
    Skipped,
    /// A frame was processed and should be presented.
    Draw,
    /// The loop moved to `Closing`.
    Close,
}

/// Everything the per-frame update mutates and the draw step reads.
pub struct SceneState<S = RandomSampler> {
    pub tower: Tower,
    pub camera: OrbitCamera,
    pub projection: Projection,
    pub keyboard: Keyboard,
    sampler: S,
    throttle: FrameThrottle,
    loop_state: LoopState,
}

impl SceneState<RandomSampler> {
    /// Seed the generator from OS entropy and build the starting tower.
    pub fn new() -> Self {
        Self::with_sampler(RandomSampler::from_entropy())
    }
}

impl Default for SceneState<RandomSampler> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: LayerSampler> SceneState<S> {
    pub fn with_sampler(mut sampler: S) -> Self {
        let tower = Tower::initialize(&mut sampler);
        tracing::info!(
            layers = tower.len(),
            height = tower.total_height(),
            "tower seeded"
        );
        Self {
            tower,
            camera: OrbitCamera::default(),
            projection: Projection::default(),
            keyboard: Keyboard::new(),
            sampler,
            throttle: FrameThrottle::with_fps(TARGET_FPS),
            loop_state: LoopState::Running,
        }
    }

    /// Window close request; same transition as the quit key.
    pub fn request_close(&mut self) {
        if self.loop_state == LoopState::Running {
            tracing::info!("close requested");
        }
        self.loop_state = LoopState::Closing;
    }

    pub fn throttle(&self) -> &FrameThrottle {
        &self.throttle
    }

    /// Run a frame if one is due at `now`. Early wake-ups leave the tower,
    /// the camera and pending key presses untouched.
    pub fn advance(&mut self, now: Instant) -> FrameOutcome {
        if !self.throttle.poll(now) {
            return FrameOutcome::Skipped;
        }
        match self.step() {
            LoopState::Running => FrameOutcome::Draw,
            LoopState::Closing => FrameOutcome::Close,
        }
    }

    /// Process one frame's worth of input. Does nothing once closing.
    pub fn step(&mut self) -> LoopState {
        if self.loop_state == LoopState::Closing {
            return self.loop_state;
        }
        for action in self.keyboard.frame_actions() {
            self.apply(action);
        }
        self.loop_state
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.request_close(),
            Action::AddLayer => match self.tower.add_layer(&mut self.sampler) {
                Some(layer) => tracing::info!(
                    layers = self.tower.len(),
                    size = layer.scale.y,
                    "layer added"
                ),
                None => tracing::debug!("tower at maximum height, add ignored"),
            },
            Action::RemoveLayer => match self.tower.remove_layer() {
                Some(_) => tracing::info!(layers = self.tower.len(), "layer removed"),
                None => tracing::debug!("tower at minimum height, remove ignored"),
            },
            Action::RotateCamera(delta) => self.camera.rotate(delta),
        }
    }

    /// Draw list for the current tower and camera.
    pub fn scene(&self) -> FrameScene {
        FrameScene::compose(&self.tower, &self.camera, &self.projection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::time::Duration;
    use towerworks_common::scene::{MAX_LAYERS, MIN_LAYERS};
    use towerworks_input::Key;
    use towerworks_kernel::FixedSampler;

    fn state() -> SceneState<FixedSampler> {
        SceneState::with_sampler(FixedSampler::new(Vec::new()).with_fallback_size(1.0))
    }

    #[test]
    fn starts_running_with_seed_tower() {
        let mut s = state();
        assert_eq!(s.tower.len(), MIN_LAYERS);
        assert_relative_eq!(s.tower.total_height(), 4.0);
        assert_eq!(s.step(), LoopState::Running);
    }

    #[test]
    fn holding_add_key_adds_one_layer() {
        let mut s = state();
        s.keyboard.key_event(Key::W, true);
        for _ in 0..20 {
            s.keyboard.key_event(Key::W, true);
            s.step();
        }
        assert_eq!(s.tower.len(), MIN_LAYERS + 1);

        s.keyboard.key_event(Key::W, false);
        s.step();
        assert_eq!(s.tower.len(), MIN_LAYERS + 1);
    }

    #[test]
    fn repeated_presses_stop_at_cap() {
        let mut s = state();
        for _ in 0..(MAX_LAYERS + 5) {
            s.keyboard.key_event(Key::W, true);
            s.step();
            s.keyboard.key_event(Key::W, false);
            s.step();
        }
        assert_eq!(s.tower.len(), MAX_LAYERS);
        assert_relative_eq!(s.tower.total_height(), MAX_LAYERS as f32);
    }

    #[test]
    fn remove_presses_stop_at_floor() {
        let mut s = state();
        s.apply(Action::AddLayer);
        s.apply(Action::AddLayer);
        for _ in 0..4 {
            s.keyboard.key_event(Key::S, true);
            s.keyboard.key_event(Key::S, false);
            s.step();
        }
        assert_eq!(s.tower.len(), MIN_LAYERS);
    }

    #[test]
    fn held_rotate_orbits_half_way() {
        let mut s = state();
        s.keyboard.key_event(Key::A, true);
        for _ in 0..157 {
            s.step();
        }
        let p = s.camera.position();
        assert_relative_eq!(p.x, s.camera.target.x - s.camera.radius, epsilon = 1e-2);

        s.keyboard.key_event(Key::A, false);
        s.keyboard.key_event(Key::D, true);
        for _ in 0..157 {
            s.step();
        }
        assert_relative_eq!(s.camera.angle, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn quit_is_terminal() {
        let mut s = state();
        s.keyboard.key_event(Key::Escape, true);
        assert_eq!(s.step(), LoopState::Closing);

        s.keyboard.key_event(Key::W, true);
        assert_eq!(s.step(), LoopState::Closing);
        assert_eq!(s.tower.len(), MIN_LAYERS);
    }

    #[test]
    fn window_close_transitions_to_closing() {
        let mut s = state();
        s.request_close();
        assert_eq!(s.step(), LoopState::Closing);
    }

    #[test]
    fn scene_tracks_edits() {
        let mut s = state();
        assert_eq!(s.scene().layer_draws().count(), MIN_LAYERS);
        s.apply(Action::AddLayer);
        assert_eq!(s.scene().layer_draws().count(), MIN_LAYERS + 1);
    }

    #[test]
    fn early_wake_up_changes_nothing() {
        let mut s = state();
        let start = Instant::now();
        s.keyboard.key_event(Key::W, true);
        s.keyboard.key_event(Key::A, true);
        assert_eq!(s.advance(start), FrameOutcome::Draw);
        assert_eq!(s.tower.len(), MIN_LAYERS + 1);
        let angle = s.camera.angle;

        assert_eq!(
            s.advance(start + Duration::from_millis(1)),
            FrameOutcome::Skipped
        );
        assert_eq!(s.tower.len(), MIN_LAYERS + 1);
        assert_eq!(s.camera.angle, angle);
    }

    #[test]
    fn press_during_skipped_wake_up_waits_for_next_slot() {
        let mut s = state();
        let start = Instant::now();
        assert_eq!(s.advance(start), FrameOutcome::Draw);

        s.keyboard.key_event(Key::W, true);
        s.keyboard.key_event(Key::W, false);
        assert_eq!(
            s.advance(start + Duration::from_millis(1)),
            FrameOutcome::Skipped
        );
        assert_eq!(s.tower.len(), MIN_LAYERS);

        let next = start + s.throttle().interval();
        assert_eq!(s.advance(next), FrameOutcome::Draw);
        assert_eq!(s.tower.len(), MIN_LAYERS + 1);
    }

    #[test]
    fn quit_reports_close() {
        let mut s = state();
        s.keyboard.key_event(Key::Escape, true);
        assert_eq!(s.advance(Instant::now()), FrameOutcome::Close);
    }
}
