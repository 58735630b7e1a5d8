use std::time::{Duration, Instant};

/// Default input poll interval in milliseconds
pub const DEFAULT_POLL_MS: u64 = 250;

/// Get the input poll duration
pub fn poll_duration() -> Duration {
    Duration::from_millis(DEFAULT_POLL_MS)
}

/// Fires once per interval; the caller supplies the current instant
#[derive(Debug, Clone)]
pub struct MissWatcher {
    interval: Duration,
    last_check: Instant,
}

impl MissWatcher {
    pub fn new(interval: Duration, started: Instant) -> Self {
        Self {
            interval,
            last_check: started,
        }
    }

    pub fn from_secs(secs: u64, started: Instant) -> Self {
        Self::new(Duration::from_secs(secs.max(1)), started)
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_check) >= self.interval
    }

    /// Returns true (and restarts the interval) when a check is due
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.last_check = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_duration() {
        assert_eq!(poll_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_miss_watcher_fires_once_per_interval() {
        let start = Instant::now();
        let mut watcher = MissWatcher::from_secs(60, start);

        assert!(!watcher.poll(start + Duration::from_secs(59)));
        assert!(watcher.poll(start + Duration::from_secs(60)));
        assert!(!watcher.poll(start + Duration::from_secs(61)));
        assert!(!watcher.is_due(start + Duration::from_secs(119)));
        assert!(watcher.poll(start + Duration::from_secs(120)));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let start = Instant::now();
        let mut watcher = MissWatcher::from_secs(0, start);
        assert!(!watcher.poll(start));
        assert!(watcher.poll(start + Duration::from_secs(1)));
    }
}
