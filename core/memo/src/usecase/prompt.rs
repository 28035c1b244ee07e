//! AI に渡すプロンプトの組み立て

use chrono::NaiveDate;

use crate::domain::Memory;

const RESPONSE_SCHEMA: &str = r#"{
  "action": "create" | "update",
  "update_title": string (required when action is "update": the exact title of the existing event),
  "target": "YYYY-MM-DD" or null (null for ongoing items without a specific date),
  "expires": "YYYY-MM-DD" or null (when the event stops being relevant; default: 30 days after target, or the coming Sunday for ongoing items),
  "title": string,
  "slug": string (short English words for the file name),
  "time": string or null,
  "place": string or null,
  "content": string (Markdown body),
  "attachments": [string] (URLs to keep with the event)
}"#;

/// 既存メモリ 1 件の要約行（無い項目は出さない）
pub fn describe_memory(memory: &Memory) -> String {
    let target = memory
        .target
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "ongoing".to_string());
    let mut parts = vec![format!("target={}", target)];
    for (key, value) in [
        ("title", &memory.title),
        ("time", &memory.time),
        ("place", &memory.place),
    ] {
        if let Some(v) = value {
            parts.push(format!("{}={}", key, v));
        }
    }
    parts.push(format!("expires={}", memory.expires.format("%Y-%m-%d")));
    format!("- {}", parts.join(", "))
}

/// 今日の日付・既存メモリ・メッセージ・添付 URL からプロンプトを作る
pub fn build_prompt(
    message: &str,
    existing: &[Memory],
    today: NaiveDate,
    attachment_urls: &[String],
) -> String {
    let existing_block = if existing.is_empty() {
        "(none)".to_string()
    } else {
        existing
            .iter()
            .map(describe_memory)
            .collect::<Vec<_>>()
            .join("\n")
    };

    let mut prompt = format!(
        "Today is {} ({}).\n\nExisting events:\n{}\n\nNew message:\n{}\n",
        today.format("%Y-%m-%d"),
        today.format("%A"),
        existing_block,
        message.trim(),
    );

    if !attachment_urls.is_empty() {
        prompt.push_str("\nUploaded attachments (include these URLs in \"attachments\"):\n");
        for url in attachment_urls {
            prompt.push_str(&format!("- {}\n", url));
        }
    }

    prompt.push_str(
        "\nDecide whether the message creates a new event or updates one of the existing events.\n\
         Use \"update\" with the exact existing title in \"update_title\" when the message is about an existing event, \
         even if it is written in a different language.\n\
         Write title and content in the same language as the message. Resolve relative dates against today.\n\
         \nRespond with JSON in this shape:\n",
    );
    prompt.push_str(RESPONSE_SCHEMA);
    prompt.push('\n');
    prompt
}
