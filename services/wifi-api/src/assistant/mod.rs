//! LLM-backed assistant: outbound API client and prompt assembly.

mod client;
mod prompt;

pub use client::{ClientError, GeminiClient};
pub use prompt::{build_prompt, needs, ContextBlocks, Level, PromptRequest};
