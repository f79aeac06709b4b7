// ── Deterministic pseudo-latency ──
//
// A 31-multiplier string hash of a seed string, mapped into
// [base, base + jitter). Repeated calls with the same seed always wait
// the same amount, so loading/error states can be exercised
// reproducibly. An empty seed waits exactly `base`.

use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct LatencyProfile {
    pub base: Duration,
    pub jitter: Duration,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(250),
            jitter: Duration::from_millis(250),
        }
    }
}

impl LatencyProfile {
    /// No delay at all — for tests that only care about semantics.
    pub fn zero() -> Self {
        Self {
            base: Duration::ZERO,
            jitter: Duration::ZERO,
        }
    }

    /// The exact delay this profile produces for `seed`.
    pub fn delay_for(&self, seed: &str) -> Duration {
        if seed.is_empty() {
            return self.base;
        }
        let normalized = f64::from(hash_seed(seed) % 1000) / 1000.0;
        self.base + self.jitter.mul_f64(normalized)
    }

    /// Sleep for the deterministic delay.
    pub async fn simulate(&self, seed: &str) {
        let delay = self.delay_for(seed);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

fn hash_seed(seed: &str) -> u32 {
    seed.bytes()
        .fold(0u32, |hash, byte| hash.wrapping_mul(31).wrapping_add(u32::from(byte)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_delay() {
        let profile = LatencyProfile::default();
        let a = profile.delay_for("clients.list");
        let b = profile.delay_for("clients.list");
        let c = profile.delay_for("clients.list");
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn delay_stays_within_bounds() {
        let profile = LatencyProfile::default();
        let long_seed = "x".repeat(100);
        for seed in ["a", "networks.get:net-1", long_seed.as_str()] {
            let d = profile.delay_for(seed);
            assert!(d >= profile.base);
            assert!(d < profile.base + profile.jitter);
        }
    }

    #[test]
    fn empty_seed_is_exactly_base() {
        let profile = LatencyProfile::default();
        assert_eq!(profile.delay_for(""), profile.base);
    }

    #[test]
    fn different_seeds_generally_differ() {
        let profile = LatencyProfile::default();
        assert_ne!(
            profile.delay_for("networks.list"),
            profile.delay_for("clients.list")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn simulate_sleeps_the_computed_delay() {
        let profile = LatencyProfile::default();
        let expected = profile.delay_for("alerts.list");

        let started = tokio::time::Instant::now();
        profile.simulate("alerts.list").await;
        assert_eq!(started.elapsed(), expected);
    }
}
