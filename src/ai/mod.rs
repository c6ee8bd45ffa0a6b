//! Generative-text provider access: HTTP client, model degradation chain,
//! and lenient JSON extraction from free-text replies.

pub mod extract;
pub mod fallback;
pub mod gemini;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Cannot reach provider at {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Provider returned status {status}: {body}")]
    ProviderStatus { status: u16, body: String },

    #[error("Failed to parse provider response: {0}")]
    ResponseParsing(String),

    #[error("Provider reply contained no candidates")]
    EmptyReply,

    #[error("All provider models failed; last error: {0}")]
    AllModelsFailed(String),
}

/// A black-box function from prompt text to free text.
///
/// `model` selects the provider identity; the degradation chain in
/// [`fallback`] walks an ordered list of them.
pub trait TextGenerate: Send + Sync {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError>;
}
