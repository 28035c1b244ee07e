//! メモリ 1 件のドメイン型
//!
//! target が無いものは「継続中（ongoing）」。expires は常に存在する。

use chrono::NaiveDate;

/// メモリ 1 件（イベント・お知らせ）
///
/// 等価性は全フィールドの構造的等価。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    /// イベント当日。None なら継続中
    pub target: Option<NaiveDate>,
    /// この日を過ぎたら削除してよい
    pub expires: NaiveDate,
    /// 本文（Markdown）
    pub content: String,
    /// 短い見出し（Markdown のリンクを含んでよい）
    pub title: Option<String>,
    /// 時刻（自由記述。解釈しない）
    pub time: Option<String>,
    pub place: Option<String>,
    /// アップロード済み添付ファイルの URL。空リストは持たない
    pub attachments: Option<Vec<String>>,
    /// 所有者（テナント）ID
    pub owner: String,
}

impl Memory {
    pub fn new(
        target: Option<NaiveDate>,
        expires: NaiveDate,
        content: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            target,
            expires,
            content: content.into(),
            title: None,
            time: None,
            place: None,
            attachments: None,
            owner: owner.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = Some(place.into());
        self
    }

    /// 空リストは None として保持する
    pub fn with_attachments(mut self, attachments: Vec<String>) -> Self {
        self.attachments = if attachments.is_empty() {
            None
        } else {
            Some(attachments)
        };
        self
    }

    /// 添付 URL（無ければ空スライス）
    pub fn attachments(&self) -> &[String] {
        self.attachments.as_deref().unwrap_or(&[])
    }

    pub fn is_ongoing(&self) -> bool {
        self.target.is_none()
    }

    /// `today > expires` のとき true。expires 当日はまだ有効。
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        today > self.expires
    }
}
