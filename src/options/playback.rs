use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::algorithms::Algorithm;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Playback", inline)]
#[serde(default)]
/// Algorithm choice, data size and animation speed.
pub struct PlaybackOptions {
    /// Algorithm animated by the next run.
    #[schemars(title = "Algorithm")]
    pub algorithm: Algorithm,
    /// Number of values in a generated sequence.
    #[schemars(title = "Size", range(min = 10, max = 150))]
    pub size: usize,
    /// Smallest accepted size.
    #[schemars(skip)]
    pub min_size: usize,
    /// Largest accepted size.
    #[schemars(skip)]
    pub max_size: usize,
    /// Delay between animation steps in milliseconds.
    #[schemars(title = "Delay (ms)", range(min = 1, max = 500), extend("step" = 10))]
    pub delay_ms: u64,
    /// Smallest accepted delay.
    #[schemars(skip)]
    pub min_delay_ms: u64,
    /// Largest accepted delay.
    #[schemars(skip)]
    pub max_delay_ms: u64,
    /// Upper bound on how long a paused run sleeps before re-checking its
    /// pause/cancel flags.
    #[schemars(skip)]
    pub pause_poll_ms: u64,
    /// Fixed seed for reproducible sequences.
    #[schemars(skip)]
    pub seed: Option<u64>,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Bubble,
            size: 60,
            min_size: 10,
            max_size: 150,
            delay_ms: 50,
            min_delay_ms: 1,
            max_delay_ms: 500,
            pause_poll_ms: 100,
            seed: None,
        }
    }
}

impl PlaybackOptions {
    /// Clamp a requested size to the configured bounds.
    pub fn clamp_size(&self, size: usize) -> usize {
        size.clamp(self.min_size, self.max_size.max(self.min_size))
    }

    /// Clamp a requested delay to the configured bounds.
    pub fn clamp_delay(&self, delay: Duration) -> Duration {
        let ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(
            ms.clamp(self.min_delay_ms, self.max_delay_ms.max(self.min_delay_ms)),
        )
    }

    /// Configured delay, clamped.
    pub fn delay(&self) -> Duration {
        self.clamp_delay(Duration::from_millis(self.delay_ms))
    }

    /// Pause re-check interval; never zero.
    pub fn pause_poll(&self) -> Duration {
        Duration::from_millis(self.pause_poll_ms.max(1))
    }
}
