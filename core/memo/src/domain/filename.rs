//! レコードのファイル名の導出
//!
//! `<target の ISO 日付 | ongoing>-<slug>.md`。slug は明示指定 → title の順に使い、
//! どちらも正規化後に空なら `<prefix>.md` にする（漢字だけのタイトルなど）。

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

const ONGOING_PREFIX: &str = "ongoing";

fn non_alnum_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static slug pattern"))
}

/// 小文字化し、英数字以外の連続をハイフン 1 つにまとめ、前後のハイフンを落とす
pub fn normalize_slug(s: &str) -> String {
    let lower = s.to_lowercase();
    non_alnum_runs()
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// ファイル名を導出する
pub fn derive_filename(
    title: Option<&str>,
    target: Option<NaiveDate>,
    explicit_slug: Option<&str>,
) -> String {
    let prefix = target
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| ONGOING_PREFIX.to_string());

    let slug = [explicit_slug, title]
        .into_iter()
        .flatten()
        .map(normalize_slug)
        .find(|s| !s.is_empty());

    match slug {
        Some(slug) => format!("{}-{}.md", prefix, slug),
        None => format!("{}.md", prefix),
    }
}
