use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Gravity timing.
///
/// The interval between gravity ticks shrinks by `step_millis` per level above
/// 1 and never drops below `floor_millis`:
/// `max(floor, initial - step × (level - 1))`.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use tetrevo_engine::TickConfig;
///
/// let config = TickConfig::default();
/// assert_eq!(config.interval(1), Duration::from_millis(1000));
/// assert_eq!(config.interval(3), Duration::from_millis(900));
/// assert_eq!(config.interval(30), Duration::from_millis(100));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    pub initial_millis: u64,
    pub step_millis: u64,
    pub floor_millis: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            initial_millis: 1000,
            step_millis: 50,
            floor_millis: 100,
        }
    }
}

impl TickConfig {
    /// Returns the gravity interval at `level` (levels start at 1).
    #[must_use]
    pub fn interval(&self, level: usize) -> Duration {
        let steps = u64::try_from(level.saturating_sub(1)).unwrap_or(u64::MAX);
        let millis = self
            .initial_millis
            .saturating_sub(self.step_millis.saturating_mul(steps))
            .max(self.floor_millis);
        Duration::from_millis(millis)
    }
}
