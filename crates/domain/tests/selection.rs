use std::io;
use std::sync::Arc;

use parking_lot::Mutex;
use tl_domain::{build_default_profile, Catalog, Error, FixedPlatform, WordSize};

// ── Log capture ─────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

fn with_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, logs.text())
}

// ── Fixtures ────────────────────────────────────────────────────────

fn two_tier_catalog() -> Catalog {
    Catalog::from_specs(
        [
            (
                "small.yml",
                "num_agents: { min: 0, max: 10 }\nrecommended_min_ram: 1024\ncache_limits: { num_counters: 100 }",
            ),
            (
                "medium.yml",
                "num_agents: { min: 10, max: 100 }\nrecommended_min_ram: 2048\ncache_limits: { num_counters: 1000 }",
            ),
        ],
        WordSize::Bits64,
    )
    .unwrap()
}

fn plenty_of_ram() -> FixedPlatform {
    FixedPlatform {
        ram_mb: 64 * 1024,
        word_size: WordSize::Bits64,
    }
}

// ── Bracket semantics ───────────────────────────────────────────────

#[test]
fn inside_first_bracket_selects_first_tier() {
    let catalog = two_tier_catalog();
    let s = catalog.select(5, &plenty_of_ram());
    assert_eq!(s.matched, Some(0));
    assert_eq!(s.profile, catalog.profiles()[0]);
    assert_eq!(catalog.source_of(&s), Some("small.yml"));
}

#[test]
fn shared_boundary_belongs_to_lower_tier_max() {
    let catalog = two_tier_catalog();
    let s = catalog.select(10, &plenty_of_ram());
    assert_eq!(s.matched, Some(0));
    assert_eq!(s.profile.cache.num_counters, 100);
}

#[test]
fn every_tier_max_selects_that_tier() {
    let catalog = two_tier_catalog();
    for (i, profile) in catalog.profiles().iter().enumerate() {
        let s = catalog.select(profile.agent_range.max, &plenty_of_ram());
        assert_eq!(s.matched, Some(i));
    }
}

#[test]
fn tier_min_does_not_select_that_tier() {
    let catalog = Catalog::from_specs(
        [("only.yml", "num_agents: { min: 10, max: 100 }")],
        WordSize::Bits64,
    )
    .unwrap();
    let s = catalog.select(10, &plenty_of_ram());
    assert!(s.is_default());
    assert_ne!(s.profile, catalog.profiles()[0]);
}

#[test]
fn zero_agents_falls_back_to_default() {
    let catalog = two_tier_catalog();
    let s = catalog.select(0, &plenty_of_ram());
    assert!(s.is_default());
    assert_eq!(s.profile, build_default_profile(WordSize::Bits64));
}

#[test]
fn above_every_bracket_falls_back_to_default() {
    let catalog = two_tier_catalog();
    let s = catalog.select(200, &plenty_of_ram());
    assert!(s.is_default());
    assert_eq!(s.profile, build_default_profile(WordSize::Bits64));
    assert_eq!(catalog.source_of(&s), None);
}

#[test]
fn empty_catalog_always_returns_default() {
    let catalog = Catalog::default();
    for agents in [0, 1, 10_000, i64::MAX] {
        let s = catalog.select(agents, &plenty_of_ram());
        assert_eq!(s.profile, build_default_profile(WordSize::Bits64));
    }
}

#[test]
fn default_upper_bound_follows_platform_word_size() {
    let catalog = Catalog::default();
    let narrow = FixedPlatform {
        ram_mb: 1024,
        word_size: WordSize::Bits32,
    };
    assert_eq!(catalog.select(1, &narrow).profile.agent_range.max, 2_147_483_647);
    assert_eq!(
        catalog.select(1, &plenty_of_ram()).profile.agent_range.max,
        i64::MAX
    );
}

#[test]
fn selection_is_a_copy() {
    let catalog = two_tier_catalog();
    let mut s = catalog.select(5, &plenty_of_ram());
    s.profile.server.max_connections = 42;
    assert_eq!(catalog.profiles()[0].server.max_connections, 0);
}

// ── Construction ────────────────────────────────────────────────────

#[test]
fn malformed_entry_aborts_construction() {
    let result = Catalog::from_specs(
        [
            ("a.yml", "num_agents: { min: 0, max: 10 }"),
            ("b.yml", "num_agents: { min: 10, max: 100 }"),
            ("c.yml", "server_limits: { checkin_limit: { interval: fast } }"),
            ("d.yml", "num_agents: { min: 100, max: 1000 }"),
        ],
        WordSize::Bits64,
    );
    assert!(matches!(result, Err(Error::Spec { ref name, .. }) if name == "c.yml"));
}

// ── Diagnostics ─────────────────────────────────────────────────────

#[test]
fn ram_warning_fires_when_host_is_short() {
    let catalog = Catalog::from_specs(
        [("big.yml", "num_agents: { min: 0, max: 10 }\nrecommended_min_ram: 1024")],
        WordSize::Bits64,
    )
    .unwrap();
    let platform = FixedPlatform {
        ram_mb: 512,
        word_size: WordSize::Bits64,
    };

    let (short, logs) = with_logs(|| catalog.select(5, &platform));
    assert!(logs.contains("WARN"), "logs: {logs}");
    assert!(logs.contains("512 MB"), "logs: {logs}");
    let shortfall = short.ram_shortfall.expect("shortfall recorded");
    assert_eq!(shortfall.detected_mb, 512);
    assert_eq!(shortfall.recommended_mb, 1024);

    let roomy = FixedPlatform {
        ram_mb: 1024,
        word_size: WordSize::Bits64,
    };
    let (enough, logs) = with_logs(|| catalog.select(5, &roomy));
    assert!(!logs.contains("WARN"), "logs: {logs}");
    assert!(enough.ram_shortfall.is_none());

    assert_eq!(short.profile, enough.profile);
}

#[test]
fn match_and_fallback_are_logged() {
    let catalog = two_tier_catalog();

    let (_, logs) = with_logs(|| catalog.select(50, &plenty_of_ram()));
    assert!(logs.contains("using system limits for 10 to 100 agents"), "logs: {logs}");

    let (_, logs) = with_logs(|| catalog.select(500, &plenty_of_ram()));
    assert!(logs.contains("no applicable limit for 500 agents"), "logs: {logs}");
}

#[test]
fn catalog_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Catalog>();

    let catalog = Arc::new(two_tier_catalog());
    let handles: Vec<_> = (1..=4)
        .map(|n| {
            let catalog = Arc::clone(&catalog);
            std::thread::spawn(move || catalog.select(n * 20, &plenty_of_ram()).matched)
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![Some(1), Some(1), Some(1), Some(1)]);
}
