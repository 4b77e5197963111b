//! Politeness policy: inter-request pacing and filler interaction
//!
//! Purely advisory. The policy shapes traffic to look less like a bot and
//! to go easy on the target site; it never influences which records come
//! out. Tests substitute the zero-delay implementation.

use crate::config::PolitenessConfig;
use rand::Rng;
use std::time::Duration;

/// Decides the pauses between consecutive fetches
pub trait PolitenessPolicy {
    /// Delay applied between two tasks
    fn pause(&self) -> impl std::future::Future<Output = ()> + Send;

    /// Bounded-count filler bursts after a page load, standing in for the
    /// scroll/pointer pacing of an interactive visitor
    fn filler(&self) -> impl std::future::Future<Output = ()> + Send;
}

/// Samples delays uniformly within the configured bounds
pub struct RandomizedPolicy {
    min_delay: Duration,
    max_delay: Duration,
    max_bursts: u32,
}

impl RandomizedPolicy {
    pub fn from_config(config: &PolitenessConfig) -> Self {
        Self {
            min_delay: Duration::from_millis(config.min_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            max_bursts: config.filler_bursts.max(2),
        }
    }
}

impl PolitenessPolicy for RandomizedPolicy {
    async fn pause(&self) {
        let delay = {
            let mut rng = rand::rng();
            rng.random_range(self.min_delay.as_millis() as u64..=self.max_delay.as_millis() as u64)
        };
        tracing::debug!(delay_ms = delay, "politeness pause");
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    async fn filler(&self) {
        // Sample every burst up front; the RNG handle must not live
        // across an await point.
        let bursts: Vec<u64> = {
            let mut rng = rand::rng();
            let count = rng.random_range(2..=self.max_bursts);
            (0..count).map(|_| rng.random_range(200..=900)).collect()
        };

        for burst_ms in bursts {
            tokio::time::sleep(Duration::from_millis(burst_ms)).await;
        }
    }
}

/// Zero-delay stub for tests; swapping it in must not change which
/// records a run produces
pub struct NoDelayPolicy;

impl PolitenessPolicy for NoDelayPolicy {
    async fn pause(&self) {}

    async fn filler(&self) {}
}
