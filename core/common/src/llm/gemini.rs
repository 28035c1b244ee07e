//! Gemini プロバイダの実装（generateContent / JSON 応答モード）

use crate::error::Error;
use serde_json::{json, Value};
use std::env;

/// モデル未指定時に使うモデル名
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini クライアント
pub struct GeminiClient {
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// API キーを環境変数 GEMINI_API_KEY から読んで作成
    ///
    /// # Arguments
    /// * `model` - モデル名（省略時: DEFAULT_GEMINI_MODEL）
    pub fn from_env(model: Option<String>) -> Result<Self, Error> {
        let model = model.unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::env("GEMINI_API_KEY environment variable is not set"))?;
        Ok(Self::new(model, api_key))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// リクエストペイロードを生成する（JSON 応答を要求）
    pub fn make_request_payload(&self, prompt: &str, system_instruction: Option<&str>) -> Value {
        let mut payload = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}]
            }],
            "generationConfig": {
                "responseMimeType": "application/json"
            }
        });
        if let Some(system) = system_instruction {
            payload["systemInstruction"] = json!({
                "parts": [{"text": system}]
            });
        }
        payload
    }

    /// プロンプトを送り、応答テキスト（JSON 文字列のはず）を返す
    pub fn generate(&self, prompt: &str, system_instruction: Option<&str>) -> Result<String, Error> {
        let payload = self.make_request_payload(prompt, system_instruction);
        let response_text = self.make_http_request(&payload.to_string())?;
        self.parse_response_text(&response_text)?
            .ok_or_else(|| Error::http("Gemini API returned no text"))
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            API_BASE, self.model, self.api_key
        );

        let client = reqwest::blocking::Client::new();
        let response = client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(request_json.to_string())
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            // エラーレスポンスを解析してメッセージを抽出
            let error_msg = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
                .unwrap_or_else(|| format!("HTTP {}: {}", status, response_text));
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        Ok(response_text)
    }

    /// レスポンスからテキストを抽出（複数 part は連結）
    pub fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

        if let Some(error) = v.get("error") {
            let error_msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        let text = v["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part["text"].as_str())
                    .collect::<String>()
            })
            .filter(|s| !s.is_empty());

        Ok(text)
    }
}
