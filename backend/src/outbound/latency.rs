//! Artificial network delay for the Mock API.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use crate::domain::ports::{ApiOperation, NetworkLatency};

/// Sleeps for a uniformly drawn delay within `[min, max]` before each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokioNetworkLatency {
    min: Duration,
    max: Duration,
}

impl TokioNetworkLatency {
    /// Build from bounds given in either order.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use migii::outbound::latency::TokioNetworkLatency;
    ///
    /// let latency = TokioNetworkLatency::new(Duration::from_millis(900), Duration::from_millis(300));
    /// assert_eq!(latency.bounds(), (Duration::from_millis(300), Duration::from_millis(900)));
    /// ```
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
    }

    pub fn bounds(&self) -> (Duration, Duration) {
        (self.min, self.max)
    }

    fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

#[async_trait]
impl NetworkLatency for TokioNetworkLatency {
    async fn pause(&self, operation: ApiOperation) {
        let delay = self.sample();
        debug!(%operation, delay_ms = delay.as_millis(), "simulating network latency");
        tokio::time::sleep(delay).await;
    }
}
