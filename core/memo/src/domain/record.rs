//! レコードファイルの書式（YAML フロントマター + Markdown 本文）
//!
//! ```text
//! ---
//! target: 2026-03-15
//! expires: 2026-04-15
//! title: Standup
//! owner: cambridge-lexington
//! ---
//!
//! Team standup at 10am.
//! ```
//!
//! 値の無いフィールドはヘッダーに書かない（null や空リストとしても書かない）。
//! キー順は target, expires, title, time, place, attachments, owner で固定。

use super::memory::Memory;
use chrono::NaiveDate;
use common::error::Error;
use serde::{Deserialize, Serialize};

const DELIMITER: &str = "---";

/// フロントマター部分（serde_yaml で読み書きする）
#[derive(Debug, Serialize, Deserialize)]
struct RecordHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<NaiveDate>,
    expires: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attachments: Option<Vec<String>>,
    /// 旧形式のファイルは user_id キーで書かれている
    #[serde(default, alias = "user_id", skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
}

/// `---` で挟まれたヘッダー（最後の改行を含む）と、それ以降の本文に分ける
///
/// 改行は LF のみを扱う。CRLF は呼び出し側で正規化しておく。
fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix("---\n")?;
    if let Some(body) = rest.strip_prefix("---\n") {
        return Some(("", body));
    }
    if let Some(idx) = rest.find("\n---\n") {
        // ブロックスカラー末尾の改行を失わないよう、ヘッダー側に改行を残す
        return Some((&rest[..idx + 1], &rest[idx + DELIMITER.len() + 2..]));
    }
    rest.strip_suffix(DELIMITER)
        .filter(|header| header.ends_with('\n'))
        .map(|header| (header, ""))
}

/// ファイル内容を Memory に変換する
///
/// owner キーが無いファイルは `default_owner` を所有者とする。
pub fn parse_record(text: &str, default_owner: &str) -> Result<Memory, Error> {
    let normalized;
    let text = if text.contains("\r\n") {
        normalized = text.replace("\r\n", "\n");
        normalized.as_str()
    } else {
        text
    };
    let (header, body) = split_front_matter(text)
        .ok_or_else(|| Error::parse("missing '---' front matter block"))?;
    let header: RecordHeader = serde_yaml::from_str(header)
        .map_err(|e| Error::parse(format!("invalid front matter: {}", e)))?;

    // dump が足す区切りの空行と末尾の改行を 1 つずつ外す
    let body = body.strip_prefix('\n').unwrap_or(body);
    let body = body.strip_suffix('\n').unwrap_or(body);

    Ok(Memory {
        target: header.target,
        expires: header.expires,
        content: body.to_string(),
        title: header.title,
        time: header.time,
        place: header.place,
        attachments: header.attachments.filter(|a| !a.is_empty()),
        owner: header.owner.unwrap_or_else(|| default_owner.to_string()),
    })
}

/// Memory をファイル内容に変換する（末尾は改行）
pub fn format_record(memory: &Memory) -> Result<String, Error> {
    let header = RecordHeader {
        target: memory.target,
        expires: memory.expires,
        title: memory.title.clone(),
        time: memory.time.clone(),
        place: memory.place.clone(),
        attachments: memory.attachments.clone().filter(|a| !a.is_empty()),
        owner: Some(memory.owner.clone()),
    };
    let yaml = serde_yaml::to_string(&header)
        .map_err(|e| Error::system(format!("failed to serialize front matter: {}", e)))?;
    Ok(format!(
        "{delim}\n{yaml}{delim}\n\n{body}\n",
        delim = DELIMITER,
        yaml = yaml,
        body = memory.content
    ))
}
