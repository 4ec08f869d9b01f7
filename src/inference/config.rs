//! Configuration for type inference

use serde::{Deserialize, Serialize};

/// What to do with a raw type tag that has no known mapping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownTagPolicy {
    /// Fail with [`InferenceError::UnsupportedType`](super::InferenceError)
    #[default]
    Strict,
    /// Fall back to a string column
    Permissive,
}

/// Configuration for type inference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InferenceConfig {
    /// Policy for raw tags outside the known set
    pub unknown_tag_policy: UnknownTagPolicy,
}

impl InferenceConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> InferenceConfigBuilder {
        InferenceConfigBuilder::default()
    }
}

/// Builder for InferenceConfig
#[derive(Debug, Default)]
pub struct InferenceConfigBuilder {
    config: InferenceConfig,
}

impl InferenceConfigBuilder {
    /// Set the policy for unknown raw tags
    pub fn unknown_tag_policy(mut self, policy: UnknownTagPolicy) -> Self {
        self.config.unknown_tag_policy = policy;
        self
    }

    /// Build the configuration
    pub fn build(self) -> InferenceConfig {
        self.config
    }
}
