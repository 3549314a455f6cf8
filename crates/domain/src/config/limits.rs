use serde::{Deserialize, Serialize};

use crate::platform::{FixedPlatform, HostPlatform, Platform};

/// Runtime side of limit selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Configured agent count. `0` means no explicit limit, which always
    /// resolves to the default profile.
    #[serde(default)]
    pub max_agents: i64,
    /// Replace the measured system memory (MiB) in the RAM check.
    #[serde(default)]
    pub ram_mb_override: Option<u64>,
}

impl LimitsConfig {
    /// The platform the selector should consult.
    pub fn platform(&self) -> Box<dyn Platform> {
        match self.ram_mb_override {
            Some(ram_mb) => Box::new(FixedPlatform::new(ram_mb)),
            None => Box::new(HostPlatform),
        }
    }
}
