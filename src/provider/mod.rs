use anyhow::Result;
use async_trait::async_trait;

pub mod openai;

/// One chat-style exchange: the system instruction plus a single rendered
/// user message, with fixed sampling parameters.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub instruction: String,
    pub user_message: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[async_trait]
pub trait Provider: Send + Sync {
    /// Returns the raw assistant text; recovery parsing happens downstream.
    async fn complete(&self, req: &ChatRequest, debug: bool) -> Result<String>;
}

pub type DynProvider = Box<dyn Provider + Send + Sync>;

/// Returns `None` when no API credential is configured; callers short-circuit
/// to the canned offline payload instead of calling out.
pub fn make_provider(model: String, timeout_secs: u64) -> Option<DynProvider> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => {
            Some(Box::new(openai::OpenAIProvider::new(key, model, timeout_secs)))
        }
        _ => None,
    }
}
