//! バージョン管理の Outbound ポート
//!
//! 各操作の失敗は呼び出し側の処理全体を失敗させる。

use common::error::Error;
use std::path::PathBuf;

/// バージョン管理（git）
pub trait VersionControl: Send + Sync {
    /// 変更・削除されたパスをステージする
    fn stage(&self, paths: &[PathBuf]) -> Result<(), Error>;
    fn commit(&self, message: &str) -> Result<(), Error>;
    fn push(&self) -> Result<(), Error>;
}
