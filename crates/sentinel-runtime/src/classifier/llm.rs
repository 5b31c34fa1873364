//! LLM-backed classifier

use super::Classifier;
use crate::error::Result;
use crate::prompt::{analysis_schema, build_prompt, AnalysisContext};
use async_trait::async_trait;
use sentinel_core::{AnalysisResult, Transaction};
use sentinel_llm::{extract_json, LLMClient, LLMRequest};
use std::sync::Arc;
use tracing::debug;

/// Default Gemini model for analysis
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Low temperature for consistent, analytical results
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Classifier that asks a text-generation service for a structured risk assessment
pub struct LlmClassifier {
    client: Arc<dyn LLMClient>,
    model: String,
    temperature: f32,
    context: AnalysisContext,
}

impl LlmClassifier {
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            context: AnalysisContext::default(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_context(mut self, context: AnalysisContext) -> Self {
        self.context = context;
        self
    }

    fn request_for(&self, transaction: &Transaction) -> LLMRequest {
        LLMRequest::new(build_prompt(transaction, &self.context), self.model.clone())
            .with_temperature(self.temperature)
            .with_json_schema(analysis_schema())
    }
}

#[async_trait]
impl Classifier for LlmClassifier {
    async fn classify(&self, transaction: &Transaction) -> Result<AnalysisResult> {
        let response = self.client.call(self.request_for(transaction)).await?;
        debug!(
            id = %transaction.id,
            client = self.client.name(),
            tokens = response.tokens_used,
            "LLM analysis received"
        );

        let value = extract_json(&response.content)?;
        let result: AnalysisResult = serde_json::from_value(value)?;
        result.validate()?;

        Ok(result)
    }

    fn name(&self) -> &str {
        "llm"
    }
}
