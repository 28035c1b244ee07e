//! 静的ページの生成（純粋関数）
//!
//! 期限内のメモリを「今週」（target が無い、または今週末まで）と「今後」に分け、
//! Markdown を HTML にしてテンプレートへ埋め込む。

use chrono::NaiveDate;
use pulldown_cmark::{html, Options, Parser};
use regex::Regex;
use std::sync::OnceLock;

use crate::domain::{next_end_of_week, Memory};

/// 既定のページテンプレート
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/page.html");

const SITE_TITLE_KEY: &str = "site_title";
const THIS_WEEK_KEY: &str = "this_week";
const UPCOMING_KEY: &str = "upcoming";

const THIS_WEEK_HEADING: &str = "This Week";
const UPCOMING_HEADING: &str = "Upcoming";
const NO_EVENTS: &str = "No events.";

/// 既存のリンク・コード・自動リンクは 1 つ目の分岐で丸ごと読み飛ばし、
/// 裸の URL だけをキャプチャ 1 で拾う
fn link_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?s)\[[^\]]*\]\([^)]*\)|`[^`]*`|<a\s[^>]*>.*?</a>|<[^>\s]+>|(https?://[^\s<>\[\]()"'`]+)"#,
        )
        .expect("static link pattern")
    })
}

/// テンプレートの `{{ site_title }}` / `{{ this_week }}` / `{{ upcoming }}`
fn placeholder_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{\{ (site_title|this_week|upcoming) \}\}").expect("static placeholder pattern")
    })
}

/// 裸の URL を `<url>` 形式の自動リンクにする。文末の句読点は URL に含めない。
pub fn autolink(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in link_pattern().captures_iter(text) {
        let Some(url) = caps.get(1) else {
            continue;
        };
        let raw = url.as_str();
        let trimmed = raw.trim_end_matches(['.', ',', ';', ':', '!', '?']);
        out.push_str(&text[last..url.start()]);
        out.push('<');
        out.push_str(trimmed);
        out.push('>');
        out.push_str(&raw[trimmed.len()..]);
        last = url.end();
    }
    out.push_str(&text[last..]);
    out
}

/// Markdown → HTML（ブロック）
pub fn markdown_block(text: &str) -> String {
    let linked = autolink(text);
    let parser = Parser::new_ext(&linked, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out.trim_end().to_string()
}

/// Markdown → HTML（段落 1 つなら <p> を外してインライン用にする）
pub fn markdown_inline(text: &str) -> String {
    let block = markdown_block(text);
    match block
        .strip_prefix("<p>")
        .and_then(|b| b.strip_suffix("</p>"))
    {
        Some(inner) if !inner.contains("<p>") => inner.to_string(),
        _ => block,
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// 添付 URL の表示名（パスの最後のセグメント）
pub fn attachment_label(url: &str) -> &str {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    without_query
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(url)
}

/// 表示順: 継続中が先、日付ありは target の昇順（同日は元の順序）
pub fn sort_for_display(memories: &mut [Memory]) {
    memories.sort_by_key(|m| m.target);
}

/// 今週に表示するか（target が無いものは常に今週）
pub fn is_current_period(memory: &Memory, today: NaiveDate) -> bool {
    match memory.target {
        None => true,
        Some(target) => target <= next_end_of_week(today),
    }
}

fn has_body(memory: &Memory) -> bool {
    memory.title.is_some() && !memory.content.trim().is_empty()
}

/// 1 件を <li> にする。詳細があれば <details> で折りたたむ。
pub fn render_event(memory: &Memory) -> String {
    let label = memory.title.as_deref().unwrap_or(&memory.content);
    let title_html = markdown_inline(label);

    let collapsible = memory.target.is_some()
        || memory.time.is_some()
        || memory.place.is_some()
        || has_body(memory)
        || !memory.attachments().is_empty();
    if !collapsible {
        return format!("<li><strong>{}</strong></li>", title_html);
    }

    let mut parts = vec![
        format!(
            "<li><details>\n<summary><strong>{}</strong></summary>",
            title_html
        ),
        "<div class=\"event-details\">".to_string(),
    ];

    let mut meta = Vec::new();
    if let Some(target) = memory.target {
        meta.push(target.format("%Y-%m-%d").to_string());
    }
    if let Some(time) = &memory.time {
        meta.push(escape_html(time));
    }
    if let Some(place) = &memory.place {
        meta.push(escape_html(place));
    }
    if !meta.is_empty() {
        parts.push(format!("<p class=\"event-meta\">{}</p>", meta.join(" · ")));
    }

    if has_body(memory) {
        parts.push(markdown_block(&memory.content));
    }

    if !memory.attachments().is_empty() {
        parts.push("<ul class=\"attachments\">".to_string());
        for url in memory.attachments() {
            parts.push(format!(
                "<li><a href=\"{}\">{}</a></li>",
                escape_html(url),
                escape_html(attachment_label(url))
            ));
        }
        parts.push("</ul>".to_string());
    }

    parts.push("</div>\n</details></li>".to_string());
    parts.join("\n")
}

fn render_section(heading: &str, events: &[&Memory]) -> String {
    if events.is_empty() {
        return format!("<h2>{}</h2>\n<p>{}</p>", heading, NO_EVENTS);
    }
    let items = events
        .iter()
        .map(|m| render_event(m))
        .collect::<Vec<_>>()
        .join("\n");
    format!("<h2>{}</h2>\n<ul>\n{}\n</ul>", heading, items)
}

/// ページ全体を生成する
///
/// `memories` は期限内のものを渡す（期限判定はしない）。
pub fn render_page(memories: &[Memory], today: NaiveDate, template: &str, site_title: &str) -> String {
    let mut sorted = memories.to_vec();
    sort_for_display(&mut sorted);

    let (this_week, upcoming): (Vec<&Memory>, Vec<&Memory>) =
        sorted.iter().partition(|m| is_current_period(m, today));

    let title = escape_html(site_title);
    let this_week = render_section(THIS_WEEK_HEADING, &this_week);
    let upcoming = render_section(UPCOMING_HEADING, &upcoming);

    // 1 回の走査で置き換える（差し込んだ本文中のプレースホルダーは展開しない）
    placeholder_pattern()
        .replace_all(template, |caps: &regex::Captures| match &caps[1] {
            SITE_TITLE_KEY => title.clone(),
            THIS_WEEK_KEY => this_week.clone(),
            UPCOMING_KEY => upcoming.clone(),
            other => other.to_string(),
        })
        .into_owned()
}
