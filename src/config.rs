use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::variant::{Binding, Hosting, Variant};

/// Process configuration, read once from the environment at startup.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default)]
    pub hosting: Hosting,
    #[serde(default)]
    pub binding: Binding,
    pub google_cloud_project: Option<String>,
    pub topic: Option<String>,
    pub port: Option<u16>,
    pub default_count: Option<u32>,
    pub publish_timeout_ms: Option<u64>,
    #[serde(default)]
    pub ensure_topic: bool,
    pub google_application_credentials: Option<String>,
    pub log_name: Option<String>,
    pub log_format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

const DEFAULT_PORT: u16 = 8080;

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        envy::from_env::<Config>()?.validated()
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)?.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.binding == Binding::Apiary && self.google_application_credentials.is_none() {
            return Err(ConfigError::MissingCredentials(Binding::Apiary.as_str()));
        }
        self.log_format()?;
        Ok(self)
    }

    pub fn variant(&self) -> Variant {
        Variant::new(self.hosting, self.binding)
    }

    pub fn topic(&self) -> &str {
        self.topic.as_deref().unwrap_or(self.binding.default_topic())
    }

    /// `projects/{project}/topics/{topic}` when the project is known.
    pub fn topic_path(&self) -> String {
        match &self.google_cloud_project {
            Some(project) => format!("projects/{}/topics/{}", project, self.topic()),
            None => self.topic().to_string(),
        }
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn default_count(&self) -> u32 {
        self.default_count.unwrap_or(self.variant().default_count())
    }

    pub fn publish_timeout(&self) -> Option<Duration> {
        self.publish_timeout_ms.map(Duration::from_millis)
    }

    pub fn log_name(&self) -> String {
        self.log_name.clone().unwrap_or_else(|| self.variant().name())
    }

    pub fn log_format(&self) -> Result<LogFormat, ConfigError> {
        match self.log_format.as_deref() {
            None | Some("text") => Ok(LogFormat::Text),
            Some("json") => Ok(LogFormat::Json),
            Some(other) => Err(ConfigError::LogFormat(other.to_string())),
        }
    }
}
