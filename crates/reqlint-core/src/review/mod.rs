//! Prompt construction and the evaluation call boundary.
//!
//! - `prompt`: system/user prompt rendering, response schema contract
//! - `client`: model call; never fails, always returns JSON-shaped text
//! - `json_span`: brace-balanced extraction of the first JSON object

pub mod client;
pub mod json_span;
pub mod prompt;

pub use client::EvaluationClient;
pub use prompt::{build_prompt, PromptPair};
