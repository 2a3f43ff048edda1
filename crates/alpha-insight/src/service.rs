//! Stock analysis service
//!
//! `StockAnalyzer` formats one request per query, sends it through the
//! injected provider, and hands the reply to the interpreter. There is no
//! retry: every failure is terminal for the query.

use crate::config::InsightConfig;
use crate::error::Result;
use crate::interpreter;
use crate::model::{AnalysisQuery, AnalysisResult};
use crate::prompts::{SYSTEM_INSTRUCTION, render_user_prompt};
use insight_llm::providers::{GeminiConfig, GeminiProvider};
use insight_llm::{CompletionRequest, LLMProvider, Message};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Issues analysis requests against an LLM provider
pub struct StockAnalyzer {
    provider: Arc<dyn LLMProvider>,
    config: InsightConfig,
}

impl StockAnalyzer {
    /// Create an analyzer around an existing provider
    pub fn new(provider: Arc<dyn LLMProvider>, config: InsightConfig) -> Self {
        Self { provider, config }
    }

    /// Create an analyzer backed by Gemini
    ///
    /// The request timeout from `config`, if any, is applied to the HTTP client.
    pub fn gemini(gemini: GeminiConfig, config: InsightConfig) -> Result<Self> {
        let gemini = match config.request_timeout {
            Some(timeout) => gemini.with_timeout(timeout),
            None => gemini,
        };
        let provider = GeminiProvider::with_config(gemini)?;
        Ok(Self::new(Arc::new(provider), config))
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Build the outbound request for a query
    pub fn build_request(&self, query: &AnalysisQuery) -> Result<CompletionRequest> {
        let prompt = render_user_prompt(
            query.as_str(),
            &self.config.recency,
            self.config.language,
        )?;

        Ok(CompletionRequest::builder(&self.config.model)
            .system(SYSTEM_INSTRUCTION)
            .add_message(Message::user(prompt))
            .temperature(self.config.temperature)
            .web_search(self.config.web_search)
            .build())
    }

    /// Analyze a stock from raw user input
    ///
    /// Blank input fails with `EmptyQuery` before any request is made.
    pub async fn analyze(&self, input: &str) -> Result<AnalysisResult> {
        let query = AnalysisQuery::new(input)?;
        self.analyze_query(&query).await
    }

    /// Analyze an already validated query
    #[instrument(skip(self, query), fields(query = %query, provider = self.provider.name()))]
    pub async fn analyze_query(&self, query: &AnalysisQuery) -> Result<AnalysisResult> {
        let outcome = self.run(query).await;
        match &outcome {
            Ok(result) => info!(
                sources = result.sources.len(),
                "Analysis complete: {}",
                result.summary()
            ),
            Err(e) => error!("Analysis failed: {e}"),
        }
        outcome
    }

    async fn run(&self, query: &AnalysisQuery) -> Result<AnalysisResult> {
        let request = self.build_request(query)?;
        let response = self.provider.complete(request).await?;
        interpreter::interpret(&response, self.config.strict_schema)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::prompts::Language;
    use async_trait::async_trait;
    use insight_llm::{CompletionResponse, GroundingChunk, GroundingMetadata, LLMError, WebSource};
    use mockall::mock;

    mock! {
        pub Provider {}

        #[async_trait]
        impl LLMProvider for Provider {
            async fn complete(&self, request: CompletionRequest) -> insight_llm::Result<CompletionResponse>;
            fn name(&self) -> &str;
        }
    }

    pub(crate) const TSLA_REPLY: &str = "```json\n{\"symbol\":\"TSLA\",\"companyName\":\"Tesla Inc.\",\"currentPrice\":\"$250.00\",\"markdownAnalysis\":\"## Outlook\\n...\", \"recommendation\":{\"action\":\"BUY\",\"confidence\":72,\"entryPriceRange\":\"$245-$248\",\"exitPriceRange\":\"$270-$275\",\"timeHorizon\":\"4 weeks\"},\"trendData\":[{\"date\":\"05-01\",\"price\":248,\"sentiment\":55}]}\n```";

    pub(crate) fn text_response(text: &str) -> CompletionResponse {
        CompletionResponse {
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    pub(crate) fn mock_provider(calls: usize, reply: CompletionResponse) -> MockProvider {
        let mut provider = MockProvider::new();
        provider.expect_name().return_const("mock".to_string());
        provider
            .expect_complete()
            .times(calls)
            .returning(move |_| Ok(reply.clone()));
        provider
    }

    pub(crate) fn analyzer_with(provider: MockProvider) -> StockAnalyzer {
        StockAnalyzer::new(Arc::new(provider), InsightConfig::default())
    }

    #[test]
    fn test_build_request() {
        let analyzer = analyzer_with(MockProvider::new());
        let query = AnalysisQuery::new("TSLA").unwrap();
        let request = analyzer.build_request(&query).unwrap();

        assert_eq!(request.model, "gemini-2.5-flash");
        assert_eq!(request.system.as_deref(), Some(SYSTEM_INSTRUCTION));
        assert_eq!(request.temperature, Some(0.4));
        assert!(request.web_search);
        assert_eq!(request.messages.len(), 1);
        assert!(request.messages[0].text.contains("Analyze the stock: TSLA."));
        assert!(request.messages[0].text.contains("in Chinese language"));
    }

    #[test]
    fn test_build_request_follows_config() {
        let config = InsightConfig::builder()
            .model("gemini-2.5-pro")
            .language(Language::English)
            .recency("month")
            .web_search(false)
            .build()
            .unwrap();
        let analyzer = StockAnalyzer::new(Arc::new(MockProvider::new()), config);
        let request = analyzer
            .build_request(&AnalysisQuery::new("Apple").unwrap())
            .unwrap();

        assert_eq!(request.model, "gemini-2.5-pro");
        assert!(!request.web_search);
        assert!(request.messages[0].text.contains("last month"));
        assert!(request.messages[0].text.contains("in English language"));
    }

    #[tokio::test]
    async fn test_one_request_per_query() {
        let provider = mock_provider(1, text_response(TSLA_REPLY));
        let analyzer = analyzer_with(provider);

        let result = analyzer.analyze("  TSLA  ").await.unwrap();
        assert_eq!(result.symbol, "TSLA");
        assert!(result.sources.is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_sends_nothing() {
        let provider = mock_provider(0, text_response(TSLA_REPLY));
        let analyzer = analyzer_with(provider);

        let err = analyzer.analyze("   ").await.unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyQuery));
    }

    #[tokio::test]
    async fn test_request_carries_trimmed_query() {
        let mut provider = MockProvider::new();
        provider.expect_name().return_const("mock".to_string());
        provider
            .expect_complete()
            .withf(|request| {
                request.messages[0].text.starts_with("Analyze the stock: Tesla Inc.")
            })
            .times(1)
            .returning(|_| Ok(text_response(TSLA_REPLY)));

        let analyzer = analyzer_with(provider);
        assert!(analyzer.analyze(" Tesla Inc. ").await.is_ok());
    }

    #[tokio::test]
    async fn test_grounding_sources_are_attached() {
        let reply = CompletionResponse {
            text: Some(TSLA_REPLY.to_string()),
            grounding: Some(GroundingMetadata {
                grounding_chunks: vec![
                    GroundingChunk {
                        web: Some(WebSource {
                            uri: Some("https://news.example/tsla".to_string()),
                            title: Some("Tesla rallies".to_string()),
                        }),
                    },
                    GroundingChunk { web: None },
                ],
                web_search_queries: vec!["TSLA news".to_string()],
            }),
            ..Default::default()
        };

        let analyzer = analyzer_with(mock_provider(1, reply));
        let result = analyzer.analyze("TSLA").await.unwrap();
        assert_eq!(result.sources.len(), 1);
        assert_eq!(result.sources[0].title, "Tesla rallies");
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let mut provider = MockProvider::new();
        provider.expect_name().return_const("mock".to_string());
        provider
            .expect_complete()
            .times(1)
            .returning(|_| Err(LLMError::RequestFailed("connection reset".to_string())));

        let analyzer = analyzer_with(provider);
        let err = analyzer.analyze("TSLA").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Provider(_)));
        assert_eq!(err.user_message(), "API request failed: connection reset");
    }

    #[tokio::test]
    async fn test_empty_reply_is_no_response() {
        let analyzer = analyzer_with(mock_provider(1, CompletionResponse::default()));
        let err = analyzer.analyze("TSLA").await.unwrap_err();
        assert_eq!(err.user_message(), "No response from AI");
    }

    #[tokio::test]
    async fn test_strict_schema_from_config() {
        let config = InsightConfig::builder().strict_schema(true).build().unwrap();
        let provider = mock_provider(1, text_response("```json\n{\"symbol\":\"TSLA\"}\n```"));
        let analyzer = StockAnalyzer::new(Arc::new(provider), config);

        let err = analyzer.analyze("TSLA").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Schema { .. }));
    }

    #[test]
    fn test_gemini_constructor() {
        let config = InsightConfig::builder()
            .request_timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap();
        let analyzer = StockAnalyzer::gemini(GeminiConfig::new("key"), config).unwrap();
        assert_eq!(analyzer.config().request_timeout.map(|t| t.as_secs()), Some(30));
    }
}
