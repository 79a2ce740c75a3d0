//! Gemini client and wire types

mod client;
mod types;

pub use client::GeminiClient;
pub use types::{
    ApiError, ApiErrorResponse, Candidate, Content, FinishReason, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, Part, Role, UsageMetadata,
};
