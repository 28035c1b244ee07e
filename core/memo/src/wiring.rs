//! 配線: 標準アダプタで UseCase を組み立てる

use std::path::PathBuf;
use std::sync::Arc;

use common::adapter::{FileJsonLog, StdClock, StdFileSystem, StdProcess, StderrLog};
use common::ports::outbound::{Clock, FileSystem, Log, Process};

use crate::adapter::{GcsStorage, GeminiCompletion, GitVersionControl, RecordRepository};
use crate::domain::Settings;
use crate::ports::outbound::{LlmCompletion, ObjectStorage, VersionControl};
use crate::usecase::intake::IntakeUseCase;
use crate::usecase::publish::PublishUseCase;
use crate::usecase::sweep::SweepUseCase;

/// Runner が使う組み立て済みのアプリ
pub struct App {
    pub logger: Arc<dyn Log>,
    pub clock: Arc<dyn Clock>,
    pub intake: IntakeUseCase,
    pub sweep: Arc<SweepUseCase>,
    pub publish: PublishUseCase,
}

/// ログ出力先: --log-file / MEMO_LOG_FILE があれば JSONL、なければ stderr
fn make_logger(fs: &Arc<dyn FileSystem>, log_file: Option<PathBuf>, verbose: bool) -> Arc<dyn Log> {
    match log_file {
        Some(path) => Arc::new(FileJsonLog::new(Arc::clone(fs), path)),
        None => Arc::new(StderrLog::new(verbose)),
    }
}

/// 標準アダプタで App を組み立てる（CLI の --log-file は settings より優先）
pub fn wire_memo(settings: Settings, verbose: bool, log_file: Option<PathBuf>) -> App {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let process: Arc<dyn Process> = Arc::new(StdProcess);
    let logger = make_logger(&fs, log_file.or_else(|| settings.log_file.clone()), verbose);

    let records = Arc::new(RecordRepository::new(
        Arc::clone(&fs),
        settings.default_owner.clone(),
    ));
    let llm: Arc<dyn LlmCompletion> = Arc::new(GeminiCompletion::new(settings.model.clone()));
    let storage: Arc<dyn ObjectStorage> = Arc::new(GcsStorage::new(
        settings.bucket.clone(),
        settings.access_token.clone(),
        Arc::clone(&fs),
        Arc::clone(&process),
    ));
    let vcs: Arc<dyn VersionControl> = Arc::new(GitVersionControl::new(Arc::clone(&process)));

    let sweep = Arc::new(SweepUseCase::new(
        Arc::clone(&records),
        Arc::clone(&fs),
        Arc::clone(&storage),
        Arc::clone(&vcs),
        Arc::clone(&logger),
    ));
    let intake = IntakeUseCase::new(
        Arc::clone(&records),
        Arc::clone(&fs),
        llm,
        storage,
        vcs,
        Arc::clone(&sweep),
        Arc::clone(&logger),
    );
    let publish = PublishUseCase::new(records, fs, Arc::clone(&logger));

    App {
        logger,
        clock: Arc::new(StdClock),
        intake,
        sweep,
        publish,
    }
}
