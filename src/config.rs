//! Connection settings for the managed store.

use aws_config::{BehaviorVersion, Region, retry::RetryConfig};
use aws_sdk_dynamodb::Client;
use std::time;

/// Region the catalog lives in when none is configured (Osaka).
pub const DEFAULT_REGION: &str = "ap-northeast-3";

/// How long to wait for a newly created table to become active.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct WaitConfig {
    /// Delay between status checks.
    pub poll_interval: time::Duration,
    /// Overall time allowed before giving up.
    pub timeout: time::Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            poll_interval: time::Duration::from_secs(2),
            timeout: time::Duration::from_secs(300),
        }
    }
}

/// Settings used to build the DynamoDB client.
///
/// Credentials come from the default provider chain (environment, profile,
/// instance metadata).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct StoreConfig {
    /// AWS region.
    pub region: String,
    /// Custom endpoint URL, e.g. DynamoDB Local.
    pub endpoint_url: Option<String>,
    /// Attempts per request made by the SDK's standard retry mode.
    pub max_attempts: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
            max_attempts: 3,
        }
    }
}

impl StoreConfig {
    /// A display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("local DynamoDB ({url})"),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }

    /// Build a client for this configuration.
    pub async fn connect(&self) -> Client {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .retry_config(RetryConfig::standard().with_max_attempts(self.max_attempts.max(1)));
        if let Some(endpoint_url) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        let sdk_config = loader.load().await;
        Client::new(&sdk_config)
    }
}
