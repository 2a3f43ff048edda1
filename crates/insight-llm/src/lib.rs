//! Generative-AI provider layer for AlphaInsight
//!
//! This crate provides a provider-agnostic view of a single search-grounded
//! completion call. It includes:
//!
//! - Message types for the conversation turn sent to the model
//! - Completion request/response types
//! - Grounding metadata returned when the model used live search
//! - Provider trait for model implementations
//! - The Gemini REST provider (behind the `gemini` feature)

pub mod completion;
pub mod error;
pub mod grounding;
pub mod messages;
pub mod provider;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, FinishReason, TokenUsage};
pub use error::{LLMError, Result};
pub use grounding::{GroundingChunk, GroundingMetadata, WebSource};
pub use messages::{Message, Role};
pub use provider::LLMProvider;

// Provider implementations (feature-gated)
#[cfg(feature = "gemini")]
pub mod providers;
