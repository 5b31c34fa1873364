//! LLM provider implementations

mod gemini;
mod mock;

pub use gemini::{GeminiProvider, GEMINI_BASE_URL};
pub use mock::MockProvider;
