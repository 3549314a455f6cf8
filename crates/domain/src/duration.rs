//! Go-style duration strings (`"5ms"`, `"1m30s"`, `"250us"`).
//!
//! Limit specs express intervals in the notation Go's `time.ParseDuration`
//! accepts. Bare YAML numbers are read as seconds.

use std::fmt;
use std::time::Duration;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::{Error, Result};

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const NANOS_PER_MIN: u128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MIN;

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(NANOS_PER_MIN),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Parse a duration string such as `"1h2m3.5s"`.
///
/// A leading `+` is accepted; negative durations are rejected since no
/// limit can be negative. `"0"` is the only unit-less value allowed.
pub fn parse(input: &str) -> Result<Duration> {
    let s = input.trim();
    let s = s.strip_prefix('+').unwrap_or(s);

    if s.is_empty() {
        return Err(Error::Duration("duration cannot be empty".into()));
    }
    if s.starts_with('-') {
        return Err(Error::Duration(format!("negative duration '{input}'")));
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total: u128 = 0;
    let mut rest = s;

    while !rest.is_empty() {
        let whole_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let whole_str = &rest[..whole_len];
        rest = &rest[whole_len..];

        let mut frac_str = "";
        if let Some(after_dot) = rest.strip_prefix('.') {
            let frac_len = after_dot
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after_dot.len());
            frac_str = &after_dot[..frac_len];
            rest = &after_dot[frac_len..];
        }

        if whole_str.is_empty() && frac_str.is_empty() {
            return Err(Error::Duration(format!("invalid duration '{input}'")));
        }

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit = &rest[..unit_len];
        rest = &rest[unit_len..];

        if unit.is_empty() {
            return Err(Error::Duration(format!("missing unit in duration '{input}'")));
        }
        let scale = unit_nanos(unit).ok_or_else(|| {
            Error::Duration(format!("unknown unit '{unit}' in duration '{input}'"))
        })?;

        let whole: u128 = if whole_str.is_empty() {
            0
        } else {
            whole_str
                .parse()
                .map_err(|_| Error::Duration(format!("invalid duration '{input}'")))?
        };

        // Extra fraction digits beyond nanosecond precision are dropped.
        let mut frac_nanos: u128 = 0;
        let mut divisor: u128 = 1;
        for digit in frac_str.bytes().take(18) {
            frac_nanos = frac_nanos * 10 + u128::from(digit - b'0');
            divisor *= 10;
        }

        total = whole
            .checked_mul(scale)
            .and_then(|n| n.checked_add(frac_nanos * scale / divisor))
            .and_then(|n| total.checked_add(n))
            .ok_or_else(|| Error::Duration(format!("duration '{input}' overflows")))?;
    }

    nanos_to_duration(total)
        .ok_or_else(|| Error::Duration(format!("duration '{input}' overflows")))
}

/// Convert a YAML number of seconds into a duration.
pub fn from_secs_f64(secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs)
        .map_err(|e| Error::Duration(format!("invalid duration {secs}s: {e}")))
}

fn nanos_to_duration(nanos: u128) -> Option<Duration> {
    let secs = u64::try_from(nanos / NANOS_PER_SEC).ok()?;
    Some(Duration::new(secs, (nanos % NANOS_PER_SEC) as u32))
}

/// Render a duration in the same notation [`parse`] accepts.
pub fn format(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".into();
    }
    if nanos < NANOS_PER_MICRO {
        return format!("{nanos}ns");
    }
    if nanos < NANOS_PER_MILLI {
        return format!("{}us", decimal(nanos, NANOS_PER_MICRO));
    }
    if nanos < NANOS_PER_SEC {
        return format!("{}ms", decimal(nanos, NANOS_PER_MILLI));
    }

    let mut out = String::new();
    let hours = nanos / NANOS_PER_HOUR;
    let minutes = (nanos % NANOS_PER_HOUR) / NANOS_PER_MIN;
    let sec_nanos = nanos % NANOS_PER_MIN;
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&format!("{}s", decimal(sec_nanos, NANOS_PER_SEC)));
    out
}

fn decimal(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let width = unit.ilog10() as usize;
    let digits = format!("{frac:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

// ── serde glue ──────────────────────────────────────────────────────

/// A duration deserialized from either a string or a number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoDuration(pub Duration);

impl<'de> Deserialize<'de> for GoDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(GoDurationVisitor)
    }
}

struct GoDurationVisitor;

impl Visitor<'_> for GoDurationVisitor {
    type Value = GoDuration;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a duration string like \"5ms\" or a number of seconds")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<GoDuration, E> {
        parse(v).map(GoDuration).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<GoDuration, E> {
        Ok(GoDuration(Duration::from_secs(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<GoDuration, E> {
        let secs = u64::try_from(v).map_err(|_| E::custom(format!("negative duration {v}s")))?;
        Ok(GoDuration(Duration::from_secs(secs)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<GoDuration, E> {
        from_secs_f64(v).map(GoDuration).map_err(E::custom)
    }
}

/// `#[serde(with = "crate::duration")]` for plain `Duration` fields.
pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(*d))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Duration, D::Error> {
    GoDuration::deserialize(deserializer).map(|d| d.0)
}

/// `deserialize_with` helper for optional overlay fields.
pub fn deserialize_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<Duration>, D::Error> {
    Option::<GoDuration>::deserialize(deserializer).map(|o| o.map(|d| d.0))
}
