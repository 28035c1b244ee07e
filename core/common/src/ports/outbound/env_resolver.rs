//! 環境変数解決 Outbound ポート
//!
//! 設定の解決はこの trait 経由でのみ環境変数を読む。

use crate::error::Error;
use std::path::PathBuf;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用の `MapEnvResolver`。
pub trait EnvResolver: Send + Sync {
    /// 値を返す。未設定・空文字列は None。
    fn var(&self, key: &str) -> Option<String>;

    /// 設定ディレクトリを解決する
    ///
    /// 優先順位:
    /// 1. MEMO_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/memo（XDG_CONFIG_HOME が設定されていれば）
    /// 3. $HOME/.config/memo
    fn resolve_home_dir(&self) -> Result<PathBuf, Error> {
        if let Some(home) = self.var("MEMO_HOME") {
            return Ok(PathBuf::from(home));
        }
        let config_base = self
            .var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| self.var("HOME").map(|h| PathBuf::from(h).join(".config")))
            .ok_or_else(|| Error::env("HOME is not set"))?;
        Ok(config_base.join("memo"))
    }
}
