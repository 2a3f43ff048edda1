//! AI-assisted stock analysis
//!
//! This crate turns a ticker or company name into a structured analysis by
//! asking a search-grounded Gemini model for a fenced JSON reply. It includes:
//!
//! - The analysis data model (`AnalysisResult`, `Recommendation`, `ChartPoint`, `Source`)
//! - Prompt construction (fixed system instruction plus a templated user turn)
//! - The response interpreter (fence extraction, JSON parsing, grounding sources)
//! - `StockAnalyzer`, which issues exactly one request per query
//! - The `Idle -> Loading -> Success | Error` state machine and its session driver
//! - Terminal and JSON report formatters, with markdown rendered for the terminal
//!
//! # Example
//!
//! ```rust,ignore
//! use alpha_insight::{AnalysisSession, InsightConfig, StockAnalyzer};
//! use insight_llm::providers::GeminiConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let analyzer = StockAnalyzer::gemini(GeminiConfig::from_env(), InsightConfig::from_env()?)?;
//!     let mut session = AnalysisSession::new(analyzer);
//!
//!     let state = session.submit("TSLA").await?;
//!     if let Some(result) = state.data() {
//!         println!("{}", result.summary());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod interpreter;
pub mod markdown;
pub mod model;
pub mod prompts;
pub mod report;
pub mod service;
pub mod state;

// Re-export main types for convenience
pub use config::InsightConfig;
pub use error::{AnalysisError, Result};
pub use model::{Action, AnalysisQuery, AnalysisResult, ChartPoint, Recommendation, Source};
pub use prompts::Language;
pub use report::{JsonFormatter, ReportFormatter, TerminalFormatter};
pub use service::StockAnalyzer;
pub use state::{AnalysisSession, AnalysisState, SubmitRejected};
