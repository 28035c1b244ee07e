//! AI が返す作成・更新の判断
//!
//! 応答 JSON は信用しない入力として、ここで一度だけ検証して型付きの値にする。
//! 以降のコードは生の JSON を触らない。

use super::calendar::default_expires;
use super::memory::Memory;
use chrono::NaiveDate;
use common::error::Error;
use serde::Deserialize;

/// 新規作成か、既存メモリ（title 一致）の上書きか
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionAction {
    Create,
    Update { ref_title: String },
}

/// 検証済みの判断
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeDecision {
    pub action: DecisionAction,
    pub target: Option<NaiveDate>,
    pub expires: Option<NaiveDate>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub time: Option<String>,
    pub place: Option<String>,
    pub content: String,
    pub attachments: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawDecision {
    action: Option<String>,
    update_title: Option<String>,
    target: Option<String>,
    expires: Option<String>,
    title: Option<String>,
    slug: Option<String>,
    time: Option<String>,
    place: Option<String>,
    content: Option<String>,
    attachments: Option<Vec<String>>,
}

/// ```json ... ``` で囲まれていれば中身だけにする
fn strip_code_fence(text: &str) -> &str {
    let t = text.trim();
    let Some(rest) = t.strip_prefix("```") else {
        return t;
    };
    let rest = rest.split_once('\n').map(|(_, r)| r).unwrap_or("");
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// 空文字列は「無し」とみなす
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn parse_date(field: &str, value: Option<String>) -> Result<Option<NaiveDate>, Error> {
    match non_empty(value) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|e| Error::parse(format!("AI decision has invalid {} '{}': {}", field, s, e))),
    }
}

impl IntakeDecision {
    /// AI の応答テキストを検証して判断にする
    pub fn parse(text: &str) -> Result<Self, Error> {
        let raw: RawDecision = serde_json::from_str(strip_code_fence(text))
            .map_err(|e| Error::parse(format!("AI response is not a valid decision: {}", e)))?;

        let action = match raw.action.as_deref().map(str::trim) {
            Some("create") => DecisionAction::Create,
            // update_title が無い update は新規作成として扱う
            Some("update") => match non_empty(raw.update_title) {
                Some(ref_title) => DecisionAction::Update { ref_title },
                None => DecisionAction::Create,
            },
            Some(other) => {
                return Err(Error::parse(format!("AI decision has unknown action '{}'", other)))
            }
            None => return Err(Error::parse("AI decision is missing 'action'")),
        };
        let content = raw
            .content
            .ok_or_else(|| Error::parse("AI decision is missing 'content'"))?;

        Ok(Self {
            action,
            target: parse_date("target", raw.target)?,
            expires: parse_date("expires", raw.expires)?,
            title: non_empty(raw.title),
            slug: non_empty(raw.slug),
            time: non_empty(raw.time),
            place: non_empty(raw.place),
            content,
            attachments: raw.attachments.filter(|a| !a.is_empty()),
        })
    }

    /// 判断から Memory を組み立てる（expires 省略時は既定値）
    pub fn to_memory(&self, owner: &str, today: NaiveDate) -> Memory {
        let expires = self
            .expires
            .unwrap_or_else(|| default_expires(self.target, today));
        Memory {
            target: self.target,
            expires,
            content: self.content.clone(),
            title: self.title.clone(),
            time: self.time.clone(),
            place: self.place.clone(),
            attachments: self.attachments.clone(),
            owner: owner.to_string(),
        }
    }
}
