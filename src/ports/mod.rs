//! Ports - interfaces the conversation core consumes.
//!
//! Implementations live under `adapters/`; the core only sees these traits.

mod ai_provider;
mod profile_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use profile_store::{ProfileStore, ProfileStoreError};
