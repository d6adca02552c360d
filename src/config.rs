use std::time::Duration;

/// Timing for one simulated discovery pass, with tunable knobs.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Delay between consecutive tag reveals.
    pub tick_interval: Duration,

    /// How long a pass keeps the radio "open" before completing on its own.
    pub scan_window: Duration,

    /// Randomize reveal order. Disable for deterministic tests.
    pub shuffle: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(300),
            scan_window: Duration::from_secs(4),
            shuffle: true,
        }
    }
}

impl DiscoveryConfig {
    /// Fast, ordered discovery for tests.
    pub fn immediate() -> Self {
        Self {
            tick_interval: Duration::from_millis(1),
            scan_window: Duration::from_millis(100),
            shuffle: false,
        }
    }
}

/// Artificial latency the mock store applies per operation class, matching
/// the delays a real backend round-trip would introduce.
#[derive(Debug, Clone)]
pub struct LatencyConfig {
    pub login: Duration,
    pub listing: Duration,
    pub detail: Duration,
    pub resolve: Duration,
    pub lookup: Duration,
    pub submit: Duration,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            login: Duration::from_millis(1000),
            listing: Duration::from_millis(300),
            detail: Duration::from_millis(500),
            resolve: Duration::from_millis(200),
            lookup: Duration::from_millis(700),
            submit: Duration::from_millis(1200),
        }
    }
}

impl LatencyConfig {
    /// No artificial delay. Used by tests.
    pub fn zero() -> Self {
        Self {
            login: Duration::ZERO,
            listing: Duration::ZERO,
            detail: Duration::ZERO,
            resolve: Duration::ZERO,
            lookup: Duration::ZERO,
            submit: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub discovery: DiscoveryConfig,
    pub latency: LatencyConfig,
}
