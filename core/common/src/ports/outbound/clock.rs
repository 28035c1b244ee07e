//! 時刻 Outbound ポート
//!
//! usecase はこの trait 経由で「今日」を取得する。`--today` 指定時は使わない。

use chrono::NaiveDate;

/// 時刻取得の抽象
///
/// 実装は `common::adapter::StdClock` やテスト用の固定日付など。
pub trait Clock: Send + Sync {
    /// ローカルタイムゾーンでの今日の日付
    fn today(&self) -> NaiveDate;
}
