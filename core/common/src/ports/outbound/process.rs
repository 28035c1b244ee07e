//! サブプロセス実行 Outbound ポート
//!
//! git や gcloud など外部コマンドの起動を trait で抽象化する。

use crate::error::Error;
use std::path::Path;

/// 標準出力を捕捉した実行結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// サブプロセス実行の抽象
///
/// 実装は `common::adapter::StdProcess`（std::process::Command）など。
pub trait Process: Send + Sync {
    /// プログラムを引数付きで実行し、終了コードを返す（出力はそのまま端末へ）
    fn run(&self, program: &Path, args: &[String]) -> Result<i32, Error>;

    /// プログラムを実行し、標準出力・標準エラーを捕捉して返す
    fn output(&self, program: &Path, args: &[String]) -> Result<ProcessOutput, Error>;
}
