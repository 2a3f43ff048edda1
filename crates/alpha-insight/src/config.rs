//! Configuration for stock analysis requests

use crate::error::{AnalysisError, Result};
use crate::prompts::{DEFAULT_RECENCY, Language};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Low by default: grounded, repeatable analysis over creative prose
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

/// Configuration for stock analysis requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Ground the answer in live Google Search results
    pub web_search: bool,

    /// Language the recommendation is written in
    pub language: Language,

    /// Lookback the model should focus on ("week", "month", ...)
    pub recency: String,

    /// Reject payloads that omit required fields instead of rendering blanks
    pub strict_schema: bool,

    /// Request timeout; none by default, a hung call waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            web_search: true,
            language: Language::default(),
            recency: DEFAULT_RECENCY.to_string(),
            strict_schema: false,
            request_timeout: None,
        }
    }
}

impl InsightConfig {
    /// Create a new configuration builder
    pub fn builder() -> InsightConfigBuilder {
        InsightConfigBuilder::default()
    }

    /// Load overrides from the environment on top of the defaults
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env()?.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(AnalysisError::Config("model must not be empty".to_string()));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AnalysisError::Config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }

        if self.recency.trim().is_empty() {
            return Err(AnalysisError::Config(
                "recency window must not be empty".to_string(),
            ));
        }

        if self.request_timeout == Some(Duration::ZERO) {
            return Err(AnalysisError::Config(
                "request timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for InsightConfig
#[derive(Debug, Default)]
pub struct InsightConfigBuilder {
    model: Option<String>,
    temperature: Option<f32>,
    web_search: Option<bool>,
    language: Option<Language>,
    recency: Option<String>,
    strict_schema: Option<bool>,
    request_timeout: Option<Duration>,
}

impl InsightConfigBuilder {
    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Enable or disable search grounding
    pub fn web_search(mut self, enabled: bool) -> Self {
        self.web_search = Some(enabled);
        self
    }

    /// Set the output language
    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Set the recency window
    pub fn recency(mut self, recency: impl Into<String>) -> Self {
        self.recency = Some(recency.into());
        self
    }

    /// Require every schema field to be present
    pub fn strict_schema(mut self, strict: bool) -> Self {
        self.strict_schema = Some(strict);
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Apply `INSIGHT_*` environment overrides
    ///
    /// Values already set on the builder win over the environment.
    pub fn with_env(mut self) -> Result<Self> {
        if self.model.is_none() {
            self.model = insight_utils::env_var("INSIGHT_MODEL");
        }
        if self.temperature.is_none() {
            self.temperature = insight_utils::env_parse("INSIGHT_TEMPERATURE")?;
        }
        if self.language.is_none() {
            self.language = insight_utils::env_parse("INSIGHT_LANGUAGE")?;
        }
        if self.recency.is_none() {
            self.recency = insight_utils::env_var("INSIGHT_RECENCY");
        }
        if self.strict_schema.is_none() {
            self.strict_schema = insight_utils::env_parse("INSIGHT_STRICT_SCHEMA")?;
        }
        if self.request_timeout.is_none() {
            self.request_timeout = insight_utils::env_parse::<u64>("INSIGHT_TIMEOUT_SECS")?
                .map(Duration::from_secs);
        }
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<InsightConfig> {
        let defaults = InsightConfig::default();

        let config = InsightConfig {
            model: self.model.unwrap_or(defaults.model),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            web_search: self.web_search.unwrap_or(defaults.web_search),
            language: self.language.unwrap_or(defaults.language),
            recency: self.recency.unwrap_or(defaults.recency),
            strict_schema: self.strict_schema.unwrap_or(defaults.strict_schema),
            request_timeout: self.request_timeout.or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}
