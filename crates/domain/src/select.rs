use serde::Serialize;

use crate::limits::{build_default_profile, EnvironmentProfile};
use crate::platform::Platform;

/// Result of picking limits for an agent count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Owned copy; adjust freely without touching the catalog.
    pub profile: EnvironmentProfile,
    /// Index of the matching tier, `None` when the default profile was used.
    pub matched: Option<usize>,
    /// Set when the host has less memory than the matched tier recommends.
    pub ram_shortfall: Option<RamShortfall>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RamShortfall {
    pub detected_mb: u64,
    pub recommended_mb: i64,
}

impl Selection {
    pub fn is_default(&self) -> bool {
        self.matched.is_none()
    }
}

/// Pick the first tier whose bracket holds `agents` (`min < agents <= max`).
///
/// Never fails: without a match the default profile for the platform's word
/// size is returned. `agents == 0` means no agent limit was configured, and
/// since no bracket can contain 0 with a non-negative `min`, it falls back to
/// the default.
pub fn select(profiles: &[EnvironmentProfile], agents: i64, platform: &dyn Platform) -> Selection {
    for (i, profile) in profiles.iter().enumerate() {
        if !profile.agent_range.contains(agents) {
            continue;
        }

        let min = profile.agent_range.min;
        let max = profile.agent_range.max;
        tracing::info!(
            min,
            max,
            agents,
            "using system limits for {min} to {max} agents for a configured value of {agents} agents"
        );

        let ram_mb = platform.total_ram_mb();
        let recommended = profile.recommended_ram_mb;
        let ram_shortfall = if i64::try_from(ram_mb).unwrap_or(i64::MAX) < recommended {
            tracing::warn!(
                detected_mb = ram_mb,
                recommended_mb = recommended,
                "detected {ram_mb} MB of system RAM, which is lower than the recommended amount ({recommended} MB) for the configured agent limit"
            );
            Some(RamShortfall {
                detected_mb: ram_mb,
                recommended_mb: recommended,
            })
        } else {
            None
        };

        return Selection {
            profile: profile.clone(),
            matched: Some(i),
            ram_shortfall,
        };
    }

    tracing::info!(agents, "no applicable limit for {agents} agents, using default");
    Selection {
        profile: build_default_profile(platform.word_size()),
        matched: None,
        ram_shortfall: None,
    }
}
