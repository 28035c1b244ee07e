//! LLM クライアント
//!
//! memo は単発の JSON 応答しか使わないため、非ストリーミングの generateContent のみを持つ。

pub mod gemini;

pub use gemini::{GeminiClient, DEFAULT_GEMINI_MODEL};
