//! 人間向けログ（LogRecord → stderr に 1 行で要点のみ出力）
//!
//! MEMO_LOG_FILE 未指定時の既定。warn / error は常に出し、info / debug は verbose 時のみ。

use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord};

const FIELDS_SUMMARY_MAX: usize = 400;

/// stderr へ整形して出力する Log 実装
#[derive(Debug, Clone, Default)]
pub struct StderrLog {
    verbose: bool,
}

impl StderrLog {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn enabled(&self, level: LogLevel) -> bool {
        self.verbose || level <= LogLevel::Warn
    }
}

/// fields の要点だけを短い文字列にする（巨大化防止）
fn fields_summary(record: &LogRecord) -> String {
    let Some(fields) = &record.fields else {
        return String::new();
    };
    let s = serde_json::to_string(fields).unwrap_or_default();
    if s.chars().count() <= FIELDS_SUMMARY_MAX {
        return s;
    }
    let truncated = s.chars().take(FIELDS_SUMMARY_MAX).collect::<String>();
    format!("{}... (len={})", truncated, s.len())
}

pub(crate) fn format_line(record: &LogRecord) -> String {
    let mut line = format!("[{}] {}", record.level.as_str(), record.message);
    let summary = fields_summary(record);
    if !summary.is_empty() {
        line.push(' ');
        line.push_str(&summary);
    }
    line
}

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if self.enabled(record.level) {
            eprintln!("{}", format_line(record));
        }
        Ok(())
    }
}
