#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use pubsub_latency::{LatencyLog, MessageId, PublishError, Publisher};

/// In-memory publisher that records payloads and can fail a chosen call.
#[derive(Default)]
pub struct ScriptedPublisher {
    payloads: Mutex<Vec<String>>,
    fail_on_call: Option<usize>,
    delay: Option<Duration>,
    delay_on_call: Option<usize>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the `call`-th publish (0 is the priming publish).
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::default()
        }
    }

    pub fn delayed(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Delays only the `call`-th publish.
    pub fn delayed_on(call: usize, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            delay_on_call: Some(call),
            ..Self::default()
        }
    }

    pub fn payloads(&self) -> Vec<String> {
        self.payloads.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Publisher for ScriptedPublisher {
    async fn publish(&self, payload: Vec<u8>) -> Result<MessageId, PublishError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let call = {
            let mut payloads = self.payloads.lock().unwrap();
            payloads.push(String::from_utf8(payload).unwrap());
            payloads.len() - 1
        };
        let delay = self
            .delay
            .filter(|_| self.delay_on_call.is_none_or(|target| target == call));
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        } else {
            tokio::task::yield_now().await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.fail_on_call == Some(call) {
            return Err(PublishError::transport("scripted", "unavailable"));
        }
        Ok(format!("id-{call}"))
    }
}

#[derive(Default)]
pub struct RecordingLog {
    lines: Mutex<Vec<String>>,
}

impl RecordingLog {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl LatencyLog for RecordingLog {
    fn log_text(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}
