//! Inbound ポート: ドライバ（CLI）がアプリを呼び出すインターフェース

use common::error::Error;

use crate::domain::MemoCommand;

/// 解析済みコマンドを実行して終了コードを返す
pub trait UseCaseRunner {
    fn run(&self, command: MemoCommand) -> Result<i32, Error>;
}
