//! 自然文メッセージからメモリを作成・更新する
//!
//! 添付アップロード → 既存メモリ読込 → プロンプト → AI → 判断の検証 →
//! 保存先の決定 → 期限切れ掃除（push なし）→ 書き込み → コミット（→ push）。

use chrono::NaiveDate;
use common::error::Error;
use common::ports::outbound::{FileSystem, Log, LogLevel, LogRecord};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::prompt::build_prompt;
use super::sweep::SweepUseCase;
use crate::adapter::RecordRepository;
use crate::domain::{derive_filename, DecisionAction, IntakeDecision, Memory};
use crate::ports::outbound::{LlmCompletion, ObjectStorage, VersionControl};

const UPDATE_COMMIT_PREFIX: &str = "Update memory: ";

/// 1 回の取り込み要求
#[derive(Debug, Clone)]
pub struct IntakeRequest<'a> {
    pub memories_dir: &'a Path,
    pub message: &'a str,
    pub today: NaiveDate,
    pub attach: &'a [PathBuf],
    pub owner: &'a str,
    pub push: bool,
}

/// 取り込み結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeOutcome {
    pub path: PathBuf,
    pub memory: Memory,
    /// 既存ファイルを上書きしたか
    pub updated: bool,
    /// 同時に掃除されたファイル
    pub swept: Vec<PathBuf>,
}

pub struct IntakeUseCase {
    records: Arc<RecordRepository>,
    fs: Arc<dyn FileSystem>,
    llm: Arc<dyn LlmCompletion>,
    storage: Arc<dyn ObjectStorage>,
    vcs: Arc<dyn VersionControl>,
    sweeper: Arc<SweepUseCase>,
    log: Arc<dyn Log>,
}

impl IntakeUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        records: Arc<RecordRepository>,
        fs: Arc<dyn FileSystem>,
        llm: Arc<dyn LlmCompletion>,
        storage: Arc<dyn ObjectStorage>,
        vcs: Arc<dyn VersionControl>,
        sweeper: Arc<SweepUseCase>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            records,
            fs,
            llm,
            storage,
            vcs,
            sweeper,
            log,
        }
    }

    pub fn run(&self, req: &IntakeRequest<'_>) -> Result<IntakeOutcome, Error> {
        let attachment_urls = req
            .attach
            .iter()
            .map(|p| self.storage.upload(p))
            .collect::<Result<Vec<_>, _>>()?;

        let existing = self.records.list_records(req.memories_dir, Some(req.owner))?;
        let existing_memories: Vec<Memory> = existing.iter().map(|(_, m)| m.clone()).collect();
        let prompt = build_prompt(req.message, &existing_memories, req.today, &attachment_urls);

        let response = self.llm.complete(&prompt)?;
        let decision = IntakeDecision::parse(&response)?;
        let memory = decision.to_memory(req.owner, req.today);

        let (path, updated) = resolve_path(req.memories_dir, &decision, &existing);
        let file_name = file_name_of(&path);
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "intake decision")
                .layer("usecase")
                .kind("intake")
                .field(
                    "action",
                    match &decision.action {
                        DecisionAction::Create => "create",
                        DecisionAction::Update { .. } => "update",
                    },
                )
                .field("matched", updated)
                .field("file", file_name.as_str()),
        );

        let swept = self.sweeper.run(req.memories_dir, req.today, false)?;

        self.fs.create_dir_all(req.memories_dir)?;
        self.records.dump(&memory, &path)?;

        self.vcs.stage(std::slice::from_ref(&path))?;
        self.vcs.commit(&format!("{}{}", UPDATE_COMMIT_PREFIX, file_name))?;
        if req.push {
            self.vcs.push()?;
        }

        Ok(IntakeOutcome {
            path,
            memory,
            updated,
            swept,
        })
    }
}

/// 保存先を決める。update で title が完全一致した既存ファイルがあればそれを使う。
/// 一致しなければ新規と同じ規則でファイル名を作る。
pub fn resolve_path(
    dir: &Path,
    decision: &IntakeDecision,
    existing: &[(PathBuf, Memory)],
) -> (PathBuf, bool) {
    if let DecisionAction::Update { ref_title } = &decision.action {
        if let Some((path, _)) = existing
            .iter()
            .find(|(_, m)| m.title.as_deref() == Some(ref_title.as_str()))
        {
            return (path.clone(), true);
        }
    }
    let name = derive_filename(
        decision.title.as_deref(),
        decision.target,
        decision.slug.as_deref(),
    );
    (dir.join(name), false)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
