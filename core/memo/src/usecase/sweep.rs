//! 期限切れメモリの掃除
//!
//! 添付の削除はベストエフォート（失敗は warn ログだけで続行）。
//! レコードファイルは必ず消し、最後にまとめて 1 回だけコミットする。

use chrono::NaiveDate;
use common::error::Error;
use common::ports::outbound::{FileSystem, Log, LogLevel, LogRecord};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapter::RecordRepository;
use crate::domain::Memory;
use crate::ports::outbound::{ObjectStorage, VersionControl};

const CLEANUP_COMMIT_PREFIX: &str = "Cleanup expired memories: ";

pub struct SweepUseCase {
    records: Arc<RecordRepository>,
    fs: Arc<dyn FileSystem>,
    storage: Arc<dyn ObjectStorage>,
    vcs: Arc<dyn VersionControl>,
    log: Arc<dyn Log>,
}

impl SweepUseCase {
    pub fn new(
        records: Arc<RecordRepository>,
        fs: Arc<dyn FileSystem>,
        storage: Arc<dyn ObjectStorage>,
        vcs: Arc<dyn VersionControl>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            records,
            fs,
            storage,
            vcs,
            log,
        }
    }

    /// 期限切れレコード（パス順、owner は問わない）
    pub fn find_expired(
        &self,
        dir: &Path,
        today: NaiveDate,
    ) -> Result<Vec<(PathBuf, Memory)>, Error> {
        Ok(self
            .records
            .list_records(dir, None)?
            .into_iter()
            .filter(|(_, m)| m.is_expired(today))
            .collect())
    }

    /// 期限切れを削除してコミットする。削除したパスを返す。
    ///
    /// 対象が無ければ外部には何もしない。
    pub fn run(&self, dir: &Path, today: NaiveDate, push: bool) -> Result<Vec<PathBuf>, Error> {
        let expired = self.find_expired(dir, today)?;
        if expired.is_empty() {
            return Ok(Vec::new());
        }

        let mut removed = Vec::with_capacity(expired.len());
        for (path, memory) in &expired {
            self.purge_attachments(path, memory);
            self.fs.remove_file(path)?;
            let _ = self.log.log(
                &LogRecord::new(LogLevel::Info, "deleted expired memory")
                    .layer("usecase")
                    .kind("sweep")
                    .field("path", path.display().to_string())
                    .field("expires", memory.expires.to_string()),
            );
            removed.push(path.clone());
        }

        self.vcs.stage(&removed)?;
        self.vcs.commit(&cleanup_commit_message(&removed))?;
        if push {
            self.vcs.push()?;
        }
        Ok(removed)
    }

    fn purge_attachments(&self, path: &Path, memory: &Memory) {
        for url in memory.attachments() {
            if let Err(e) = self.storage.delete(url) {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Warn, "failed to delete attachment")
                        .layer("usecase")
                        .kind("sweep")
                        .field("path", path.display().to_string())
                        .field("url", url.as_str())
                        .field("error", e.to_string()),
                );
            }
        }
    }
}

/// `Cleanup expired memories: a.md, b.md`
pub fn cleanup_commit_message(removed: &[PathBuf]) -> String {
    let names: Vec<String> = removed
        .iter()
        .map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| p.display().to_string())
        })
        .collect();
    format!("{}{}", CLEANUP_COMMIT_PREFIX, names.join(", "))
}
