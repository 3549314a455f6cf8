//! Host environment queries the selector depends on.

use sysinfo::System;

/// Native signed-integer width of the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordSize {
    Bits32,
    Bits64,
}

impl WordSize {
    /// Word size of the platform this binary was compiled for.
    pub fn host() -> Self {
        if cfg!(target_pointer_width = "64") {
            WordSize::Bits64
        } else {
            WordSize::Bits32
        }
    }

    /// Largest signed integer for this word size.
    pub fn max_int(self) -> i64 {
        match self {
            WordSize::Bits32 => i64::from(i32::MAX),
            WordSize::Bits64 => i64::MAX,
        }
    }
}

pub trait Platform {
    /// Total system memory in MiB.
    fn total_ram_mb(&self) -> u64;

    fn word_size(&self) -> WordSize {
        WordSize::host()
    }
}

/// The machine the process is running on.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlatform;

impl Platform for HostPlatform {
    fn total_ram_mb(&self) -> u64 {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.total_memory() / 1024 / 1024
    }
}

/// A platform with fixed answers, for RAM overrides and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedPlatform {
    pub ram_mb: u64,
    pub word_size: WordSize,
}

impl FixedPlatform {
    pub fn new(ram_mb: u64) -> Self {
        Self {
            ram_mb,
            word_size: WordSize::host(),
        }
    }
}

impl Platform for FixedPlatform {
    fn total_ram_mb(&self) -> u64 {
        self.ram_mb
    }

    fn word_size(&self) -> WordSize {
        self.word_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_int_per_word_size() {
        assert_eq!(WordSize::Bits32.max_int(), 2_147_483_647);
        assert_eq!(WordSize::Bits64.max_int(), 9_223_372_036_854_775_807);
    }

    #[test]
    fn host_word_size_matches_pointer_width() {
        let expected = if usize::BITS == 64 {
            WordSize::Bits64
        } else {
            WordSize::Bits32
        };
        assert_eq!(WordSize::host(), expected);
    }

    #[test]
    fn fixed_platform_reports_what_it_was_given() {
        let p = FixedPlatform {
            ram_mb: 512,
            word_size: WordSize::Bits32,
        };
        assert_eq!(p.total_ram_mb(), 512);
        assert_eq!(p.word_size(), WordSize::Bits32);
    }
}
