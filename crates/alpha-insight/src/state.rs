//! Analysis state machine
//!
//! `Idle -> Loading -> Success | Error`, and back to `Loading` on the next
//! submission. There is no transition back to `Idle`.

use crate::error::AnalysisError;
use crate::model::{AnalysisQuery, AnalysisResult};
use crate::service::StockAnalyzer;
use thiserror::Error;
use tracing::warn;

/// What the user currently sees
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AnalysisState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// One request in flight
    Loading { query: AnalysisQuery },
    /// Last request succeeded
    Success(Box<AnalysisResult>),
    /// Last request failed; only the message is kept
    Error { message: String },
}

/// Why a submission was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("an analysis is already in progress")]
    Busy,
    #[error("input is empty")]
    EmptyInput,
}

impl AnalysisState {
    pub fn is_loading(&self) -> bool {
        matches!(self, AnalysisState::Loading { .. })
    }

    pub fn data(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisState::Success(result) => Some(result.as_ref()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AnalysisState::Error { message } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Whether the submit control would be enabled for this input
    pub fn can_submit(&self, input: &str) -> bool {
        !self.is_loading() && !input.trim().is_empty()
    }

    /// Move to `Loading` for a new submission
    ///
    /// Rejected submissions leave the state untouched.
    pub fn begin(&mut self, input: &str) -> Result<AnalysisQuery, SubmitRejected> {
        if self.is_loading() {
            return Err(SubmitRejected::Busy);
        }
        let query = AnalysisQuery::new(input).map_err(|_| SubmitRejected::EmptyInput)?;
        *self = AnalysisState::Loading {
            query: query.clone(),
        };
        Ok(query)
    }

    /// Settle the in-flight request
    ///
    /// Ignored unless the state is `Loading`.
    pub fn resolve(&mut self, outcome: Result<AnalysisResult, AnalysisError>) {
        if !self.is_loading() {
            warn!("Ignoring analysis outcome outside of the loading state");
            return;
        }
        *self = match outcome {
            Ok(result) => AnalysisState::Success(Box::new(result)),
            Err(e) => AnalysisState::Error {
                message: e.user_message(),
            },
        };
    }
}

/// Drives one analyzer through the state machine
///
/// `submit` borrows the session mutably for the whole request, so a second
/// submission cannot start until the first has settled.
pub struct AnalysisSession {
    analyzer: StockAnalyzer,
    state: AnalysisState,
}

impl AnalysisSession {
    pub fn new(analyzer: StockAnalyzer) -> Self {
        Self {
            analyzer,
            state: AnalysisState::Idle,
        }
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn analyzer(&self) -> &StockAnalyzer {
        &self.analyzer
    }

    pub fn can_submit(&self, input: &str) -> bool {
        self.state.can_submit(input)
    }

    /// Submit input and wait for the outcome
    ///
    /// Blank input is rejected without touching the state or the provider.
    pub async fn submit(&mut self, input: &str) -> Result<&AnalysisState, SubmitRejected> {
        let query = self.state.begin(input)?;
        let outcome = self.analyzer.analyze_query(&query).await;
        self.state.resolve(outcome);
        Ok(&self.state)
    }
}
