//! 単発 LLM 完了の Outbound ポート
//!
//! 1 回のプロンプトで応答全文（判断の JSON）を取得する。

use common::error::Error;

/// 単発の LLM 完了
pub trait LlmCompletion: Send + Sync {
    fn complete(&self, prompt: &str) -> Result<String, Error>;
}
