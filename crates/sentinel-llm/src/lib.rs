//! Sentinel LLM Integration
//!
//! Thin async clients for generative-AI providers, used by the runtime to obtain a
//! structured JSON risk assessment for each transaction.
//!
//! Providers:
//! - [`GeminiProvider`]: Google Gemini `generateContent` with a response schema
//! - [`MockProvider`]: canned replies and failures for tests and demos

// Re-export core types
pub use client::{LLMClient, LLMRequest, LLMResponse};
pub use error::{LLMError, Result};
pub use json_extractor::extract_json;

// Re-export providers
pub use provider::{GeminiProvider, MockProvider};

pub mod client;
pub mod error;
pub mod json_extractor;
pub mod provider;
