//! Tiered operating limits sized by agent count.
//!
//! A [`Catalog`] is built once from YAML limit specs and then only read.
//! [`Catalog::select`] returns the tier whose agent bracket holds the
//! configured count, or the built-in default profile when none does.

pub mod catalog;
pub mod config;
pub mod duration;
pub mod error;
pub mod limits;
pub mod overlay;
pub mod platform;
pub mod select;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use limits::{
    build_default_profile, AgentRange, CacheLimits, EnvironmentProfile, RateLimit, ServerLimits,
};
pub use platform::{FixedPlatform, HostPlatform, Platform, WordSize};
pub use select::{select, RamShortfall, Selection};
