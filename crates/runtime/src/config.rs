/// Tunables for a scoring session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Capacity of each event bus topic.
    pub event_buffer_size: usize,
    /// Recompute the totals from the full log every this many accepted
    /// actions. `0` checks after every action.
    pub verify_interval: u32,
}

impl SessionConfig {
    pub const DEFAULT_EVENT_BUFFER: usize = 100;
    pub const DEFAULT_VERIFY_INTERVAL: u32 = 6;

    pub(crate) fn verify_due(&self, mutations: u64) -> bool {
        self.verify_interval == 0 || mutations % u64::from(self.verify_interval) == 0
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER,
            verify_interval: Self::DEFAULT_VERIFY_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_verifies_every_action() {
        let config = SessionConfig {
            verify_interval: 0,
            ..SessionConfig::default()
        };
        assert!((1..10).all(|n| config.verify_due(n)));
    }

    #[test]
    fn interval_verifies_on_multiples() {
        let config = SessionConfig::default();
        assert!(!config.verify_due(5));
        assert!(config.verify_due(6));
        assert!(config.verify_due(12));
    }
}
