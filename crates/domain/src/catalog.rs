//! The ordered set of limit tiers, built once from raw spec documents.

use crate::config::{ConfigError, ConfigSeverity};
use crate::error::Result;
use crate::limits::{build_default_profile, EnvironmentProfile, RateLimit};
use crate::overlay::ProfileOverlay;
use crate::platform::{Platform, WordSize};
use crate::select::{select, Selection};

/// Immutable, ordered list of limit tiers.
///
/// Construction is all-or-nothing: if any document fails to parse, no
/// catalog is produced. Tiers are tried in the order they were supplied.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    profiles: Vec<EnvironmentProfile>,
    sources: Vec<String>,
}

impl Catalog {
    /// Build a catalog from `(name, yaml)` pairs.
    ///
    /// Each document is overlaid onto the default profile for `word_size`,
    /// so a document only needs the fields it wants to change.
    pub fn from_specs<I, N, T>(specs: I, word_size: WordSize) -> Result<Self>
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: AsRef<str>,
    {
        let mut catalog = Catalog::default();
        for (name, text) in specs {
            let name = name.into();
            let overlay = ProfileOverlay::from_yaml(&name, text.as_ref())?;
            let mut profile = build_default_profile(word_size);
            overlay.apply_to(&mut profile);

            tracing::debug!(
                spec = %name,
                min = profile.agent_range.min,
                max = profile.agent_range.max,
                "loaded limit tier"
            );
            catalog.profiles.push(profile);
            catalog.sources.push(name);
        }
        Ok(catalog)
    }

    pub fn profiles(&self) -> &[EnvironmentProfile] {
        &self.profiles
    }

    /// Spec names, parallel to [`Catalog::profiles`].
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Limits for `agents`, falling back to the default profile.
    pub fn select(&self, agents: i64, platform: &dyn Platform) -> Selection {
        select(&self.profiles, agents, platform)
    }

    /// Name of the spec a selection came from, if it matched a tier.
    pub fn source_of(&self, selection: &Selection) -> Option<&str> {
        selection
            .matched
            .and_then(|i| self.sources.get(i))
            .map(String::as_str)
    }

    /// Check the tiers for authoring mistakes.
    ///
    /// Inverted brackets and negative limits are errors. Overlapping brackets
    /// are warnings since the first tier still wins deterministically.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut issues = Vec::new();

        for (i, (profile, name)) in self.profiles.iter().zip(&self.sources).enumerate() {
            let range = profile.agent_range;
            if range.min >= range.max {
                issues.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: format!("{name}: num_agents"),
                    message: format!("min ({}) must be less than max ({})", range.min, range.max),
                });
            }
            if range.min < 0 {
                issues.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: format!("{name}: num_agents.min"),
                    message: "must not be negative".into(),
                });
            }

            let mut non_negative = |field: &str, value: i64| {
                if value < 0 {
                    issues.push(ConfigError {
                        severity: ConfigSeverity::Error,
                        field: format!("{name}: {field}"),
                        message: format!("must not be negative (got {value})"),
                    });
                }
            };
            non_negative("recommended_min_ram", profile.recommended_ram_mb);
            non_negative("server_limits.max_connections", profile.server.max_connections);
            non_negative("cache_limits.num_counters", profile.cache.num_counters);
            non_negative("cache_limits.max_cost", profile.cache.max_cost_bytes);
            let limits: [(&str, &RateLimit); 4] = [
                ("checkin_limit", &profile.server.checkin),
                ("artifact_limit", &profile.server.artifact),
                ("enroll_limit", &profile.server.enroll),
                ("ack_limit", &profile.server.ack),
            ];
            for (key, limit) in limits {
                non_negative(&format!("server_limits.{key}.burst"), limit.burst);
                non_negative(&format!("server_limits.{key}.max"), limit.max);
                non_negative(
                    &format!("server_limits.{key}.max_body_byte_size"),
                    limit.max_body_bytes,
                );
            }

            for (other, other_name) in self.profiles[..i].iter().zip(&self.sources) {
                if range.overlaps(&other.agent_range) {
                    issues.push(ConfigError {
                        severity: ConfigSeverity::Warning,
                        field: format!("{name}: num_agents"),
                        message: format!(
                            "overlaps {other_name} ({} to {}); {other_name} wins for shared counts",
                            other.agent_range.min, other.agent_range.max
                        ),
                    });
                }
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn preserves_input_order() {
        let catalog = Catalog::from_specs(
            [
                ("b.yml", "num_agents: { min: 100, max: 200 }"),
                ("a.yml", "num_agents: { min: 0, max: 100 }"),
            ],
            WordSize::Bits64,
        )
        .unwrap();
        assert_eq!(catalog.sources(), ["b.yml", "a.yml"]);
        assert_eq!(catalog.profiles()[0].agent_range.min, 100);
    }

    #[test]
    fn one_bad_document_aborts_everything() {
        let result = Catalog::from_specs(
            [
                ("ok-1.yml", "num_agents: { min: 0, max: 10 }"),
                ("broken.yml", "num_agents: [not, a, map]"),
                ("ok-2.yml", "num_agents: { min: 10, max: 100 }"),
            ],
            WordSize::Bits64,
        );
        match result {
            Err(Error::Spec { name, .. }) => assert_eq!(name, "broken.yml"),
            other => panic!("expected spec error, got {other:?}"),
        }
    }

    #[test]
    fn omitted_max_inherits_word_size_bound() {
        let catalog =
            Catalog::from_specs([("open.yml", "num_agents: { min: 40000 }")], WordSize::Bits32)
                .unwrap();
        assert_eq!(catalog.profiles()[0].agent_range.max, i64::from(i32::MAX));
    }

    #[test]
    fn validate_flags_inverted_and_negative() {
        let catalog = Catalog::from_specs(
            [(
                "bad.yml",
                "num_agents: { min: 10, max: 10 }\ncache_limits: { max_cost: -1 }",
            )],
            WordSize::Bits64,
        )
        .unwrap();
        let issues = catalog.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.severity == ConfigSeverity::Error));
        assert!(issues.iter().any(|i| i.field == "bad.yml: cache_limits.max_cost"));
    }

    #[test]
    fn validate_warns_on_overlap() {
        let catalog = Catalog::from_specs(
            [
                ("a.yml", "num_agents: { min: 0, max: 100 }"),
                ("b.yml", "num_agents: { min: 50, max: 200 }"),
                ("c.yml", "num_agents: { min: 200, max: 300 }"),
            ],
            WordSize::Bits64,
        )
        .unwrap();
        let issues = catalog.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, ConfigSeverity::Warning);
        assert!(issues[0].field.starts_with("b.yml"));
    }
}
