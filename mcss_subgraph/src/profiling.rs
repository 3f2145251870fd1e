//! Optional call timing, enabled with the `profiling` feature.
//!
//! Without the feature every item here compiles to nothing.

#[cfg(feature = "profiling")]
mod enabled {
    use std::sync::OnceLock;
    use std::time::{Duration, Instant};

    use dashmap::DashMap;
    use tracing::info;

    type Count = u64;
    type TotalNanos = u128;

    static STATS: OnceLock<DashMap<&'static str, (Count, TotalNanos)>> = OnceLock::new();

    #[inline]
    fn stats() -> &'static DashMap<&'static str, (Count, TotalNanos)> {
        STATS.get_or_init(DashMap::new)
    }

    /// Adds its lifetime to `label` when dropped.
    pub struct Timer {
        label: &'static str,
        start: Instant,
    }

    impl Timer {
        #[inline]
        pub fn new(label: &'static str) -> Self {
            Timer {
                label,
                start: Instant::now(),
            }
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            record(self.label, self.start.elapsed());
        }
    }

    pub fn record(label: &'static str, dur: Duration) {
        let mut entry = stats().entry(label).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += dur.as_nanos();
    }

    /// `(label, calls, total nanoseconds)`, slowest first.
    pub fn snapshot() -> Vec<(&'static str, Count, TotalNanos)> {
        let mut rows: Vec<_> = stats()
            .iter()
            .map(|kv| (*kv.key(), kv.value().0, kv.value().1))
            .collect();
        rows.sort_by(|a, b| b.2.cmp(&a.2));
        rows
    }

    pub fn report() {
        for (label, count, total_ns) in snapshot() {
            let avg_ns = if count == 0 {
                0.0
            } else {
                (total_ns as f64) / (count as f64)
            };
            info!(
                label,
                calls = count,
                total_ms = (total_ns as f64) / 1_000_000.0,
                avg_ns,
                "profile"
            );
        }
    }
}

#[cfg(not(feature = "profiling"))]
mod disabled {
    use std::time::Duration;

    #[derive(Clone, Copy)]
    pub struct Timer;

    impl Timer {
        #[inline]
        pub fn new(_: &'static str) -> Self {
            Timer
        }
    }

    pub fn record(_: &'static str, _: Duration) {}

    pub fn snapshot() -> Vec<(&'static str, u64, u128)> {
        Vec::new()
    }

    pub fn report() {}
}

#[cfg(feature = "profiling")]
pub use enabled::*;

#[cfg(not(feature = "profiling"))]
pub use disabled::*;

#[cfg(all(test, feature = "profiling"))]
mod tests {
    use super::*;

    #[test]
    fn timer_counts_calls() {
        {
            let _a = Timer::new("profiling::tests");
            let _b = Timer::new("profiling::tests");
        }
        let row = snapshot()
            .into_iter()
            .find(|(label, _, _)| *label == "profiling::tests")
            .unwrap();
        assert_eq!(row.1, 2);
    }
}
