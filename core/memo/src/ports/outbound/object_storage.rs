//! 添付ファイル置き場の Outbound ポート
//!
//! URL だけで削除できること（URL にバケットとオブジェクトパスが含まれる）が前提。

use common::error::Error;
use std::path::Path;

/// オブジェクトストレージ
pub trait ObjectStorage: Send + Sync {
    /// ローカルファイルをアップロードし、公開 URL を返す
    fn upload(&self, local_file: &Path) -> Result<String, Error>;
    /// upload が返した URL のオブジェクトを削除する
    fn delete(&self, url: &str) -> Result<(), Error>;
}
