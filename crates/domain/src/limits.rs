use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::platform::WordSize;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Built-in defaults
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub const DEFAULT_CACHE_NUM_COUNTERS: i64 = 500_000; // 10x expected count
pub const DEFAULT_CACHE_MAX_COST: i64 = 50 * 1024 * 1024; // 50MiB

pub const DEFAULT_MAX_CONNECTIONS: i64 = 0; // no limit
pub const DEFAULT_POLICY_THROTTLE: Duration = Duration::from_millis(5);

pub const DEFAULT_CHECKIN_INTERVAL: Duration = Duration::from_millis(1);
pub const DEFAULT_CHECKIN_BURST: i64 = 1000;
pub const DEFAULT_CHECKIN_MAX: i64 = 0;
pub const DEFAULT_CHECKIN_MAX_BODY: i64 = 1024 * 1024;

pub const DEFAULT_ARTIFACT_INTERVAL: Duration = Duration::from_millis(5);
pub const DEFAULT_ARTIFACT_BURST: i64 = 25;
pub const DEFAULT_ARTIFACT_MAX: i64 = 50;
pub const DEFAULT_ARTIFACT_MAX_BODY: i64 = 0;

pub const DEFAULT_ENROLL_INTERVAL: Duration = Duration::from_millis(10);
pub const DEFAULT_ENROLL_BURST: i64 = 100;
pub const DEFAULT_ENROLL_MAX: i64 = 50;
pub const DEFAULT_ENROLL_MAX_BODY: i64 = 1024 * 512;

pub const DEFAULT_ACK_INTERVAL: Duration = Duration::from_millis(10);
pub const DEFAULT_ACK_BURST: i64 = 100;
pub const DEFAULT_ACK_MAX: i64 = 50;
pub const DEFAULT_ACK_MAX_BODY: i64 = 1024 * 1024 * 2;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Model
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Agent-count bracket: `min` is exclusive, `max` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRange {
    pub min: i64,
    pub max: i64,
}

impl AgentRange {
    /// `min < agents <= max`.
    pub fn contains(&self, agents: i64) -> bool {
        self.min < agents && agents <= self.max
    }

    /// True when some agent count falls in both brackets.
    pub fn overlaps(&self, other: &AgentRange) -> bool {
        self.min < other.max && other.min < self.max
    }
}

/// Token-bucket admission policy for one class of request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    #[serde(with = "crate::duration")]
    pub interval: Duration,
    pub burst: i64,
    /// 0 = unlimited.
    pub max: i64,
    /// 0 = unlimited.
    pub max_body_bytes: i64,
}

/// Per-endpoint rate limits plus connection-level controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerLimits {
    #[serde(with = "crate::duration")]
    pub policy_throttle: Duration,
    /// 0 = unlimited.
    pub max_connections: i64,
    pub checkin: RateLimit,
    pub artifact: RateLimit,
    pub enroll: RateLimit,
    pub ack: RateLimit,
}

impl Default for ServerLimits {
    fn default() -> Self {
        Self {
            policy_throttle: DEFAULT_POLICY_THROTTLE,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            checkin: RateLimit {
                interval: DEFAULT_CHECKIN_INTERVAL,
                burst: DEFAULT_CHECKIN_BURST,
                max: DEFAULT_CHECKIN_MAX,
                max_body_bytes: DEFAULT_CHECKIN_MAX_BODY,
            },
            artifact: RateLimit {
                interval: DEFAULT_ARTIFACT_INTERVAL,
                burst: DEFAULT_ARTIFACT_BURST,
                max: DEFAULT_ARTIFACT_MAX,
                max_body_bytes: DEFAULT_ARTIFACT_MAX_BODY,
            },
            enroll: RateLimit {
                interval: DEFAULT_ENROLL_INTERVAL,
                burst: DEFAULT_ENROLL_BURST,
                max: DEFAULT_ENROLL_MAX,
                max_body_bytes: DEFAULT_ENROLL_MAX_BODY,
            },
            ack: RateLimit {
                interval: DEFAULT_ACK_INTERVAL,
                burst: DEFAULT_ACK_BURST,
                max: DEFAULT_ACK_MAX,
                max_body_bytes: DEFAULT_ACK_MAX_BODY,
            },
        }
    }
}

/// Sizing hints for an approximate-LFU cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheLimits {
    pub num_counters: i64,
    pub max_cost_bytes: i64,
}

impl Default for CacheLimits {
    fn default() -> Self {
        Self {
            num_counters: DEFAULT_CACHE_NUM_COUNTERS,
            max_cost_bytes: DEFAULT_CACHE_MAX_COST,
        }
    }
}

/// One tier of operating limits for a given deployment scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentProfile {
    pub agent_range: AgentRange,
    pub recommended_ram_mb: i64,
    pub server: ServerLimits,
    pub cache: CacheLimits,
}

/// The fallback profile used when no catalog tier matches.
///
/// `agent_range.max` is the largest signed integer for `word_size`, so on a
/// 32-bit target the fallback tops out at `i32::MAX` agents.
pub fn build_default_profile(word_size: WordSize) -> EnvironmentProfile {
    EnvironmentProfile {
        agent_range: AgentRange {
            min: 0,
            max: word_size.max_int(),
        },
        recommended_ram_mb: 0,
        server: ServerLimits::default(),
        cache: CacheLimits::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_exclusive_below_inclusive_above() {
        let r = AgentRange { min: 10, max: 100 };
        assert!(!r.contains(10));
        assert!(r.contains(11));
        assert!(r.contains(100));
        assert!(!r.contains(101));
    }

    #[test]
    fn adjacent_ranges_do_not_overlap() {
        let a = AgentRange { min: 0, max: 10 };
        let b = AgentRange { min: 10, max: 100 };
        let c = AgentRange { min: 50, max: 200 };
        assert!(!a.overlaps(&b));
        assert!(b.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn default_profile_uses_throttle_and_connection_defaults() {
        let p = build_default_profile(WordSize::Bits64);
        assert_eq!(p.server.policy_throttle, Duration::from_millis(5));
        assert_eq!(p.server.max_connections, 0);
        assert_eq!(p.recommended_ram_mb, 0);
        assert_eq!(p.cache.num_counters, 500_000);
        assert_eq!(p.cache.max_cost_bytes, 50 * 1024 * 1024);
    }

    #[test]
    fn default_rate_limits() {
        let s = ServerLimits::default();
        assert_eq!(s.checkin.interval, Duration::from_millis(1));
        assert_eq!(s.checkin.burst, 1000);
        assert_eq!(s.checkin.max_body_bytes, 1024 * 1024);
        assert_eq!(s.artifact.max, 50);
        assert_eq!(s.artifact.max_body_bytes, 0);
        assert_eq!(s.enroll.max_body_bytes, 512 * 1024);
        assert_eq!(s.ack.max_body_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn default_profile_upper_bound_follows_word_size() {
        assert_eq!(
            build_default_profile(WordSize::Bits32).agent_range.max,
            i64::from(i32::MAX)
        );
        assert_eq!(build_default_profile(WordSize::Bits64).agent_range.max, i64::MAX);
    }

    #[test]
    fn profile_serializes_durations_as_strings() {
        let p = build_default_profile(WordSize::Bits64);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["server"]["policy_throttle"], "5ms");
        assert_eq!(json["server"]["ack"]["interval"], "10ms");
    }
}
