//! Error types for stock analysis operations

use insight_llm::LLMError;
use thiserror::Error;

/// Shown when an error carries no message of its own
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to analyze stock. Please try again.";

/// Stock analysis specific errors
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Blank or whitespace-only query
    #[error("Please enter a stock symbol or company name")]
    EmptyQuery,

    /// The model returned no text at all
    #[error("No response from AI")]
    NoResponse,

    /// Text came back but without a ```json fence
    #[error("Failed to parse AI response format.")]
    Format {
        /// Full reply, kept for diagnosis
        raw: String,
    },

    /// The fence was found but its body is not valid JSON
    #[error("{0}")]
    MalformedJson(#[from] serde_json::Error),

    /// Valid JSON that cannot be read as an analysis, e.g. a bare string
    #[error("Unexpected AI response shape: {0}")]
    Shape(serde_json::Error),

    /// Strict mode: required fields absent from the payload
    #[error("AI response is missing required fields: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    /// Transport, HTTP status or provider failure
    #[error(transparent)]
    Provider(#[from] LLMError),

    /// The user prompt template failed to render
    #[error("Prompt error: {0}")]
    Prompt(#[from] minijinja::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalysisError {
    /// The single message kept in UI state
    ///
    /// Uses the error's own message, or the generic fallback when it is blank.
    pub fn user_message(&self) -> String {
        message_or_fallback(self.to_string())
    }
}

fn message_or_fallback(message: String) -> String {
    if message.trim().is_empty() {
        GENERIC_FAILURE_MESSAGE.to_string()
    } else {
        message
    }
}

impl From<insight_utils::ConfigError> for AnalysisError {
    fn from(err: insight_utils::ConfigError) -> Self {
        AnalysisError::Config(err.to_string())
    }
}

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
