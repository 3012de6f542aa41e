//! Publish latency probe for Cloud Pub/Sub.
//!
//! A request triggers one priming publish followed by `n` timed publishes
//! against a single topic. The priming latency and the comma-joined series of
//! per-message latencies are written as two log lines.

pub mod config;
pub mod error;
pub mod harness;
pub mod publisher;
pub mod report;
pub mod request;
pub mod server;
pub mod telemetry;
pub mod variant;

pub use config::Config;
pub use error::{ConfigError, HarnessError, PublishError, RequestError};
pub use harness::{LatencyHarness, LatencySample, LatencySeries};
pub use publisher::{MessageId, Publisher};
pub use report::{render, LatencyLog, TracingLog};
pub use variant::{Binding, Hosting, Variant};
