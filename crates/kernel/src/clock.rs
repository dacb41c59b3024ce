use std::time::{Duration, Instant};

/// Fixed-rate frame gate driven by a monotonic clock.
///
/// A frame is processed only when at least one interval has passed since
/// the last processed frame. Callers that arrive early get `false` and can
/// sleep until [`FrameThrottle::next_deadline`] instead of spinning.
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl FrameThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Throttle targeting `fps` processed frames per second.
    pub fn with_fps(fps: f64) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / fps))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a frame would be processed at `now`. Does not consume the slot.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    /// Claim the frame slot at `now`. Returns `true` if the frame should run.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.last = Some(now);
        true
    }

    /// Earliest instant at which the next frame becomes due.
    /// `None` before the first frame, which is due immediately.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.last.map(|last| last + self.interval)
    }
}
