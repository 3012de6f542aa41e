use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::{HarnessError, PublishError};
use crate::publisher::{MessageId, Publisher};
use crate::report::LatencyLog;

const PRIMING_PAYLOAD: &[u8] = b"first";
const MAX_RESERVED: u32 = 1024;

/// Wall-clock time one publish took, from issue to confirmed outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LatencySample(Duration);

impl LatencySample {
    pub fn new(elapsed: Duration) -> Self {
        Self(elapsed)
    }

    pub fn duration(&self) -> Duration {
        self.0
    }

    /// Whole milliseconds, rounded down.
    pub fn millis(&self) -> u128 {
        self.0.as_millis()
    }
}

/// Latencies of the numbered publishes, in the order they were issued.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatencySeries {
    samples: Vec<LatencySample>,
}

impl LatencySeries {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, sample: LatencySample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LatencySample> {
        self.samples.iter()
    }

    pub fn samples(&self) -> &[LatencySample] {
        &self.samples
    }
}

impl FromIterator<LatencySample> for LatencySeries {
    fn from_iter<T: IntoIterator<Item = LatencySample>>(iter: T) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

/// Runs a priming publish and `count` timed publishes, one at a time.
///
/// The harness holds no per-run state, so one instance is shared by every
/// request; concurrent runs each drive their own sequential loop.
pub struct LatencyHarness {
    publisher: Arc<dyn Publisher>,
    log: Arc<dyn LatencyLog>,
    timeout: Option<Duration>,
}

impl LatencyHarness {
    pub fn new(publisher: Arc<dyn Publisher>, log: Arc<dyn LatencyLog>) -> Self {
        Self {
            publisher,
            log,
            timeout: None,
        }
    }

    /// Treat a publish that has not completed after `timeout` as failed.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn run(&self, count: u32) -> Result<LatencySeries, HarnessError> {
        let priming = self
            .timed_publish(PRIMING_PAYLOAD.to_vec())
            .await
            .map_err(HarnessError::Priming)?;
        tracing::debug!(latency_ms = %priming.millis(), "priming publish completed");
        self.log.log_text(&priming.millis().to_string());

        // count comes from the request, so cap the up-front reservation
        let mut series = LatencySeries::with_capacity(count.min(MAX_RESERVED) as usize);
        for index in 0..count {
            let payload = index.to_string().into_bytes();
            let sample = self
                .timed_publish(payload)
                .await
                .map_err(|source| HarnessError::Publish {
                    index,
                    count,
                    source,
                })?;
            series.push(sample);
        }
        Ok(series)
    }

    async fn timed_publish(&self, payload: Vec<u8>) -> Result<LatencySample, PublishError> {
        let start = Instant::now();
        let message_id = with_timeout(self.timeout, self.publisher.publish(payload)).await?;
        let elapsed = start.elapsed();
        if message_id.is_empty() {
            return Err(PublishError::MissingMessageId);
        }
        Ok(LatencySample::new(elapsed))
    }
}

async fn with_timeout<F>(limit: Option<Duration>, publish: F) -> Result<MessageId, PublishError>
where
    F: Future<Output = Result<MessageId, PublishError>>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, publish)
            .await
            .map_err(|_| PublishError::Timeout(limit))?,
        None => publish.await,
    }
}
