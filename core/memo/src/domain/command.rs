//! CLI から解決されたサブコマンド

use chrono::NaiveDate;
use clap_complete::Shell;
use std::path::PathBuf;

/// 実行するコマンド（main の Runner がディスパッチする）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoCommand {
    /// ヘルプ（clap が整形した本文）
    Help(String),
    /// シェル補完スクリプトを出力
    Completion(Shell),
    /// 自然文からメモリを作成・更新する
    Commit {
        memories_dir: PathBuf,
        message: String,
        today: Option<NaiveDate>,
        attach: Vec<PathBuf>,
        owner: String,
        push: bool,
    },
    /// 期限切れメモリを削除する
    Cleanup {
        memories_dir: PathBuf,
        today: Option<NaiveDate>,
        push: bool,
    },
    /// 静的ページを生成する
    Publish {
        memories_dir: PathBuf,
        output_dir: PathBuf,
        template: Option<PathBuf>,
        site_title: String,
        today: Option<NaiveDate>,
    },
}

impl MemoCommand {
    /// ログ用のコマンド名
    pub fn name(&self) -> &'static str {
        match self {
            Self::Help(_) => "help",
            Self::Completion(_) => "completion",
            Self::Commit { .. } => "commit",
            Self::Cleanup { .. } => "cleanup",
            Self::Publish { .. } => "publish",
        }
    }
}
