use std::time::Duration;

/// Bounded backoff for polling batch results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollPolicy {
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub factor: f64,
    pub max_attempts: u32,
}

impl PollPolicy {
    /// Wait after the `attempt`-th poll (1-based) came back unfinished.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(32) as i32;
        let scaled = self.initial_interval.as_nanos() as f64 * self.factor.max(1.0).powi(exponent);
        if scaled >= self.max_interval.as_nanos() as f64 {
            return self.max_interval;
        }
        Duration::from_nanos(scaled.round() as u64)
    }
}
