use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{GenerateOptions, Generation};

/// Errors raised by a text-generation backend
///
/// Every variant carries a message that can be shown to the user as-is.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("{message}")]
    ApiError { status: u16, message: String },

    #[error("Missing Gemini API key. Set GEMINI_API_KEY and restart.")]
    MissingApiKey,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Text-generation collaborator: prompt in, free-form text out
pub trait TextGenerator: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> impl Future<Output = Result<Generation, GenerationError>> + Send;
}

impl<T: TextGenerator> TextGenerator for Arc<T> {
    fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> impl Future<Output = Result<Generation, GenerationError>> + Send {
        (**self).generate(prompt, options)
    }
}
