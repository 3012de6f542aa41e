use std::time::Duration;

use thiserror::Error;

/// Failure of a single publish operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PublishError {
    /// The transport rejected the publish or the call itself failed.
    #[error("{binding} publish failed: {message}")]
    Transport {
        binding: &'static str,
        message: String,
    },
    /// The transport reported success but handed back no message id.
    #[error("publish returned an empty message id")]
    MissingMessageId,
    #[error("publish did not complete within {0:?}")]
    Timeout(Duration),
}

impl PublishError {
    pub fn transport(binding: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            binding,
            message: message.into(),
        }
    }
}

/// A harness run that could not produce a complete latency series.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HarnessError {
    #[error("priming publish failed: {0}")]
    Priming(#[source] PublishError),
    #[error("publish {index} of {count} failed: {source}")]
    Publish {
        index: u32,
        count: u32,
        #[source]
        source: PublishError,
    },
}

impl HarnessError {
    pub fn cause(&self) -> &PublishError {
        match self {
            HarnessError::Priming(source) => source,
            HarnessError::Publish { source, .. } => source,
        }
    }
}

/// Rejection of the inbound trigger before any publish is attempted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid environment: {0}")]
    Env(#[from] envy::Error),
    #[error("GOOGLE_APPLICATION_CREDENTIALS is required for the {0} binding")]
    MissingCredentials(&'static str),
    #[error("LOG_FORMAT must be `text` or `json`, got `{0}`")]
    LogFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harness_error_exposes_underlying_publish_failure() {
        let err = HarnessError::Publish {
            index: 3,
            count: 10,
            source: PublishError::transport("gapic", "unavailable"),
        };
        assert_eq!(err.cause(), &PublishError::transport("gapic", "unavailable"));
        assert_eq!(
            err.to_string(),
            "publish 3 of 10 failed: gapic publish failed: unavailable"
        );

        let priming = HarnessError::Priming(PublishError::MissingMessageId);
        assert_eq!(priming.cause(), &PublishError::MissingMessageId);
    }
}
