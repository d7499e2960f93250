use std::time::Duration;

use serde::Deserialize;

use crate::model::job::{ITERATION_RANGE, TOPIC_RANGE};
use crate::services::tracker::{TrackerOptions, POLL_INTERVAL};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token issued by the identity provider
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub vim_mode: bool,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default)]
    pub max_poll_attempts: Option<u32>,
    #[serde(default = "default_num_topics")]
    pub default_num_topics: u32,
    #[serde(default = "default_iterations")]
    pub default_iterations: u32,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_poll_interval_ms() -> u64 {
    POLL_INTERVAL.as_millis() as u64
}

fn default_num_topics() -> u32 {
    5
}

fn default_iterations() -> u32 {
    200
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: None,
            vim_mode: false,
            poll_interval_ms: default_poll_interval_ms(),
            max_poll_attempts: None,
            default_num_topics: default_num_topics(),
            default_iterations: default_iterations(),
        }
    }
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file is a valid config
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn tracker_options(&self) -> TrackerOptions {
        TrackerOptions {
            poll_interval: Duration::from_millis(self.poll_interval_ms.max(1)),
            max_poll_attempts: self.max_poll_attempts,
        }
    }

    /// Form defaults, pulled into the accepted ranges
    pub fn form_defaults(&self) -> (u32, u32) {
        (
            self.default_num_topics
                .clamp(*TOPIC_RANGE.start(), *TOPIC_RANGE.end()),
            self.default_iterations
                .clamp(*ITERATION_RANGE.start(), *ITERATION_RANGE.end()),
        )
    }
}
