//! 解決済みの設定値
//!
//! 既定の owner はここで一度だけ決まり、コンストラクタ経由で配られる。

use std::path::PathBuf;

pub const DEFAULT_OWNER: &str = "cambridge-lexington";
pub const DEFAULT_SITE_TITLE: &str = "Church in Cambridge Events";
pub const DEFAULT_MEMORIES_DIR: &str = "memories";
pub const DEFAULT_OUTPUT_DIR: &str = "site";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub default_owner: String,
    pub site_title: String,
    pub memories_dir: PathBuf,
    pub output_dir: PathBuf,
    /// None なら GeminiClient の既定モデル
    pub model: Option<String>,
    /// 添付アップロード先のバケット
    pub bucket: Option<String>,
    /// GCS のアクセストークン（None なら gcloud から取得）
    pub access_token: Option<String>,
    /// 設定時は JSONL ログをこのファイルへ
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_owner: DEFAULT_OWNER.to_string(),
            site_title: DEFAULT_SITE_TITLE.to_string(),
            memories_dir: PathBuf::from(DEFAULT_MEMORIES_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            model: None,
            bucket: None,
            access_token: None,
            log_file: None,
        }
    }
}
