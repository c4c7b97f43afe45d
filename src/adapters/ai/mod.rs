//! AI provider adapters.
//!
//! Implementations of the AIProvider port:
//! - `OpenAIProvider`: chat-completions API over HTTPS
//! - `MockAIProvider`: configurable in-memory provider for tests and
//!   offline runs

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
