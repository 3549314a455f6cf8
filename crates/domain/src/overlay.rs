//! Partial profiles as written in limit spec files.
//!
//! Every field is optional. A spec only states the values it wants to
//! change; everything else keeps the built-in default. An explicit `0` is
//! an override like any other value, distinct from an omitted field.
//!
//! ```yaml
//! num_agents:
//!   min: 0
//!   max: 5000
//! recommended_min_ram: 1024
//! server_limits:
//!   policy_throttle: 50ms
//!   checkin_limit:
//!     interval: 5ms
//!     burst: 500
//! cache_limits:
//!   num_counters: 20000
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::limits::{AgentRange, CacheLimits, EnvironmentProfile, RateLimit, ServerLimits};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileOverlay {
    #[serde(default, rename = "num_agents")]
    pub agents: Option<AgentRangeOverlay>,
    #[serde(default, rename = "recommended_min_ram")]
    pub recommended_ram_mb: Option<i64>,
    #[serde(default, rename = "server_limits")]
    pub server: Option<ServerLimitsOverlay>,
    #[serde(default, rename = "cache_limits")]
    pub cache: Option<CacheLimitsOverlay>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentRangeOverlay {
    #[serde(default)]
    pub min: Option<i64>,
    #[serde(default)]
    pub max: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerLimitsOverlay {
    #[serde(default, deserialize_with = "crate::duration::deserialize_opt")]
    pub policy_throttle: Option<Duration>,
    #[serde(default)]
    pub max_connections: Option<i64>,
    #[serde(default, rename = "checkin_limit")]
    pub checkin: Option<RateLimitOverlay>,
    #[serde(default, rename = "artifact_limit")]
    pub artifact: Option<RateLimitOverlay>,
    #[serde(default, rename = "enroll_limit")]
    pub enroll: Option<RateLimitOverlay>,
    #[serde(default, rename = "ack_limit")]
    pub ack: Option<RateLimitOverlay>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateLimitOverlay {
    #[serde(default, deserialize_with = "crate::duration::deserialize_opt")]
    pub interval: Option<Duration>,
    #[serde(default)]
    pub burst: Option<i64>,
    #[serde(default)]
    pub max: Option<i64>,
    #[serde(default, rename = "max_body_byte_size")]
    pub max_body_bytes: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheLimitsOverlay {
    #[serde(default)]
    pub num_counters: Option<i64>,
    #[serde(default, rename = "max_cost")]
    pub max_cost_bytes: Option<i64>,
}

fn set<T: Copy>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}

impl ProfileOverlay {
    /// Parse one YAML document. A blank document is an empty overlay.
    pub fn from_yaml(name: &str, text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| Error::Spec {
            name: name.to_string(),
            message: e.to_string(),
        })
    }

    pub fn apply_to(&self, profile: &mut EnvironmentProfile) {
        if let Some(agents) = &self.agents {
            agents.apply_to(&mut profile.agent_range);
        }
        set(&mut profile.recommended_ram_mb, self.recommended_ram_mb);
        if let Some(server) = &self.server {
            server.apply_to(&mut profile.server);
        }
        if let Some(cache) = &self.cache {
            cache.apply_to(&mut profile.cache);
        }
    }
}

impl AgentRangeOverlay {
    pub fn apply_to(&self, range: &mut AgentRange) {
        set(&mut range.min, self.min);
        set(&mut range.max, self.max);
    }
}

impl ServerLimitsOverlay {
    pub fn apply_to(&self, server: &mut ServerLimits) {
        set(&mut server.policy_throttle, self.policy_throttle);
        set(&mut server.max_connections, self.max_connections);
        for (overlay, limit) in [
            (&self.checkin, &mut server.checkin),
            (&self.artifact, &mut server.artifact),
            (&self.enroll, &mut server.enroll),
            (&self.ack, &mut server.ack),
        ] {
            if let Some(overlay) = overlay {
                overlay.apply_to(limit);
            }
        }
    }
}

impl RateLimitOverlay {
    pub fn apply_to(&self, limit: &mut RateLimit) {
        set(&mut limit.interval, self.interval);
        set(&mut limit.burst, self.burst);
        set(&mut limit.max, self.max);
        set(&mut limit.max_body_bytes, self.max_body_bytes);
    }
}

impl CacheLimitsOverlay {
    pub fn apply_to(&self, cache: &mut CacheLimits) {
        set(&mut cache.num_counters, self.num_counters);
        set(&mut cache.max_cost_bytes, self.max_cost_bytes);
    }
}
