//! 期限内のメモリから静的ページを書き出す

use chrono::NaiveDate;
use common::error::Error;
use common::ports::outbound::{FileSystem, Log, LogLevel, LogRecord};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::render::{render_page, DEFAULT_TEMPLATE};
use crate::adapter::RecordRepository;
use crate::domain::Memory;

const INDEX_FILE: &str = "index.html";

#[derive(Debug, Clone)]
pub struct PublishRequest<'a> {
    pub memories_dir: &'a Path,
    pub output_dir: &'a Path,
    /// None なら組み込みテンプレート
    pub template: Option<&'a Path>,
    pub site_title: &'a str,
    pub today: NaiveDate,
}

pub struct PublishUseCase {
    records: Arc<RecordRepository>,
    fs: Arc<dyn FileSystem>,
    log: Arc<dyn Log>,
}

impl PublishUseCase {
    pub fn new(records: Arc<RecordRepository>, fs: Arc<dyn FileSystem>, log: Arc<dyn Log>) -> Self {
        Self { records, fs, log }
    }

    /// 期限切れでないメモリ（パス順）
    pub fn live_memories(&self, dir: &Path, today: NaiveDate) -> Result<Vec<Memory>, Error> {
        Ok(self
            .records
            .list_records(dir, None)?
            .into_iter()
            .map(|(_, m)| m)
            .filter(|m| !m.is_expired(today))
            .collect())
    }

    /// `<output_dir>/index.html` を書き、そのパスを返す
    pub fn run(&self, req: &PublishRequest<'_>) -> Result<PathBuf, Error> {
        let memories = self.live_memories(req.memories_dir, req.today)?;
        let template = match req.template {
            Some(path) => self.fs.read_to_string(path)?,
            None => DEFAULT_TEMPLATE.to_string(),
        };
        let html = render_page(&memories, req.today, &template, req.site_title);

        self.fs.create_dir_all(req.output_dir)?;
        let out = req.output_dir.join(INDEX_FILE);
        self.fs.write_atomic(&out, &html)?;

        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "page written")
                .layer("usecase")
                .kind("publish")
                .field("path", out.display().to_string())
                .field("events", memories.len()),
        );
        Ok(out)
    }
}
