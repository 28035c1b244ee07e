//! LlmCompletion の Gemini 実装
//!
//! API キーは呼び出し時に読む。commit 以外のサブコマンドは GEMINI_API_KEY 無しで動く。

use common::error::Error;
use common::llm::GeminiClient;

use crate::ports::outbound::LlmCompletion;

const SYSTEM_INSTRUCTION: &str =
    "You maintain a list of community events. Reply with a single JSON object only.";

/// Gemini の generateContent で判断 JSON を得る
pub struct GeminiCompletion {
    model: Option<String>,
}

impl GeminiCompletion {
    pub fn new(model: Option<String>) -> Self {
        Self { model }
    }
}

impl LlmCompletion for GeminiCompletion {
    fn complete(&self, prompt: &str) -> Result<String, Error> {
        let client = GeminiClient::from_env(self.model.clone())?;
        client.generate(prompt, Some(SYSTEM_INSTRUCTION))
    }
}
