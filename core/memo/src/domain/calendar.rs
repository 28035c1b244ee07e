//! 週末・既定の有効期限の計算
//!
//! 週の終わりは日曜日。日曜日当日はその日自身を返す。

use chrono::{Datelike, Days, NaiveDate};

/// 日付の指定が無いイベントの有効期限に足す日数
pub const DATED_EXPIRY_DAYS: u64 = 30;

/// `date` から見て次の日曜日（`date` が日曜日ならそのまま）
pub fn next_end_of_week(date: NaiveDate) -> NaiveDate {
    let days_ahead = 6 - date.weekday().num_days_from_monday();
    date + Days::new(u64::from(days_ahead))
}

/// AI が expires を返さなかったときの有効期限
///
/// target があれば target + 30 日、無ければ today から見た週末。
pub fn default_expires(target: Option<NaiveDate>, today: NaiveDate) -> NaiveDate {
    match target {
        Some(t) => t + Days::new(DATED_EXPIRY_DAYS),
        None => next_end_of_week(today),
    }
}
