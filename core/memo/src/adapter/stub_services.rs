//! テスト用: 外部サービスのポートを記録・固定応答で置き換える実装

#[cfg(test)]
mod stub {
    use common::error::Error;
    use common::ports::outbound::{Log, LogLevel, LogRecord};
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use crate::ports::outbound::{LlmCompletion, ObjectStorage, VersionControl};

    /// 固定の応答を返し、受け取ったプロンプトを記録する LlmCompletion
    pub struct StubCompletion {
        response: Result<String, Error>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl StubCompletion {
        pub fn new(response: &str) -> Self {
            Self {
                response: Ok(response.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(error: Error) -> Self {
            Self {
                response: Err(error),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl LlmCompletion for StubCompletion {
        fn complete(&self, prompt: &str) -> Result<String, Error> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.response.clone()
        }
    }

    /// upload / delete を記録する ObjectStorage。fail_deletes で delete を常に失敗させる。
    #[derive(Default)]
    pub struct RecordingStorage {
        pub uploads: Mutex<Vec<PathBuf>>,
        pub deletes: Mutex<Vec<String>>,
        pub fail_deletes: bool,
    }

    impl RecordingStorage {
        pub fn failing_deletes() -> Self {
            Self {
                fail_deletes: true,
                ..Default::default()
            }
        }
    }

    impl ObjectStorage for RecordingStorage {
        fn upload(&self, local_file: &Path) -> Result<String, Error> {
            self.uploads.lock().unwrap().push(local_file.to_path_buf());
            let name = local_file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            Ok(format!("https://storage.googleapis.com/test-bucket/attachments/{}", name))
        }

        fn delete(&self, url: &str) -> Result<(), Error> {
            self.deletes.lock().unwrap().push(url.to_string());
            if self.fail_deletes {
                return Err(Error::http(format!("simulated delete failure: {}", url)));
            }
            Ok(())
        }
    }

    /// 操作を記録する VersionControl。fail_commit でコミットを失敗させる。
    #[derive(Default)]
    pub struct RecordingVersionControl {
        pub staged: Mutex<Vec<Vec<PathBuf>>>,
        pub commits: Mutex<Vec<String>>,
        pub pushes: Mutex<usize>,
        pub fail_commit: bool,
    }

    impl RecordingVersionControl {
        pub fn failing_commit() -> Self {
            Self {
                fail_commit: true,
                ..Default::default()
            }
        }

        pub fn commit_count(&self) -> usize {
            self.commits.lock().unwrap().len()
        }

        pub fn push_count(&self) -> usize {
            *self.pushes.lock().unwrap()
        }
    }

    impl VersionControl for RecordingVersionControl {
        fn stage(&self, paths: &[PathBuf]) -> Result<(), Error> {
            self.staged.lock().unwrap().push(paths.to_vec());
            Ok(())
        }

        fn commit(&self, message: &str) -> Result<(), Error> {
            if self.fail_commit {
                return Err(Error::process("simulated commit failure"));
            }
            self.commits.lock().unwrap().push(message.to_string());
            Ok(())
        }

        fn push(&self) -> Result<(), Error> {
            *self.pushes.lock().unwrap() += 1;
            Ok(())
        }
    }

    /// 受け取ったレコードを溜める Log
    #[derive(Default)]
    pub struct RecordingLog {
        pub records: Mutex<Vec<LogRecord>>,
    }

    impl RecordingLog {
        /// 指定レベルのメッセージ一覧
        pub fn messages(&self, level: LogLevel) -> Vec<String> {
            self.records
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.level == level)
                .map(|r| r.message.clone())
                .collect()
        }
    }

    impl Log for RecordingLog {
        fn log(&self, record: &LogRecord) -> Result<(), Error> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }
}

#[cfg(test)]
pub use stub::{RecordingLog, RecordingStorage, RecordingVersionControl, StubCompletion};
