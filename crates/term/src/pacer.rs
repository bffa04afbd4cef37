/// Releases queued step events one at a time so a cascade is visible.
///
/// The first step after an idle period is released immediately; later ones
/// wait at least `interval_ms` after the previous release.
#[derive(Debug, Clone)]
pub struct StepPacer {
    interval_ms: u64,
    last_release_ms: Option<u64>,
}

impl StepPacer {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_release_ms: None,
        }
    }

    /// Decide whether the next step may be shown at `now_ms`.
    pub fn ready(&mut self, now_ms: u64) -> bool {
        match self.last_release_ms {
            Some(last) if now_ms.saturating_sub(last) < self.interval_ms => false,
            _ => {
                self.last_release_ms = Some(now_ms);
                true
            }
        }
    }

    /// Milliseconds until the next step may be released (input poll timeout).
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        match self.last_release_ms {
            Some(last) => self.interval_ms.saturating_sub(now_ms.saturating_sub(last)),
            None => 0,
        }
    }

    /// Forget the last release; call when the step queue runs dry.
    pub fn idle(&mut self) {
        self.last_release_ms = None;
    }
}
