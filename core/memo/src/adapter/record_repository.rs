//! レコードファイルの読み書きとディレクトリ走査
//!
//! `<dir>/*.md` をパスの辞書順に読む。壊れたファイルは読み飛ばさずエラーにする。

use common::error::Error;
use common::ports::outbound::FileSystem;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::{format_record, parse_record, Memory};

const RECORD_EXTENSION: &str = "md";

/// レコードファイルのリポジトリ
///
/// owner の無いファイルは `default_owner` のものとして読む。
pub struct RecordRepository {
    fs: Arc<dyn FileSystem>,
    default_owner: String,
}

impl RecordRepository {
    pub fn new(fs: Arc<dyn FileSystem>, default_owner: impl Into<String>) -> Self {
        Self {
            fs,
            default_owner: default_owner.into(),
        }
    }

    /// 1 ファイルを読む
    pub fn load(&self, path: &Path) -> Result<Memory, Error> {
        let text = self.fs.read_to_string(path)?;
        parse_record(&text, &self.default_owner)
            .map_err(|e| Error::parse(format!("Failed to parse '{}': {}", path.display(), e)))
    }

    /// 1 ファイルを書く（一時ファイル + rename で置き換える）
    pub fn dump(&self, memory: &Memory, path: &Path) -> Result<(), Error> {
        let text = format_record(memory)?;
        self.fs.write_atomic(path, &text)
    }

    /// ディレクトリ直下のレコードファイル（辞書順）。ディレクトリが無ければ空。
    pub fn record_paths(&self, dir: &Path) -> Result<Vec<PathBuf>, Error> {
        if !self.fs.exists(dir) {
            return Ok(Vec::new());
        }
        let mut paths: Vec<PathBuf> = self
            .fs
            .read_dir(dir)?
            .into_iter()
            .filter(|p| p.extension().is_some_and(|e| e == RECORD_EXTENSION))
            .filter(|p| self.fs.metadata(p).map(|m| m.is_file()).unwrap_or(false))
            .collect();
        paths.sort();
        Ok(paths)
    }

    /// 全レコードを読む。owner_filter 指定時はその owner のものだけ返す。
    pub fn list_records(
        &self,
        dir: &Path,
        owner_filter: Option<&str>,
    ) -> Result<Vec<(PathBuf, Memory)>, Error> {
        let mut out = Vec::new();
        for path in self.record_paths(dir)? {
            let memory = self.load(&path)?;
            if owner_filter.is_some_and(|owner| memory.owner != owner) {
                continue;
            }
            out.push((path, memory));
        }
        Ok(out)
    }
}
