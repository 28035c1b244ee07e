//! アダプター（memo 固有の Outbound ポート実装とレコードの読み書き）

pub mod gcs_storage;
pub mod gemini_completion;
pub mod git_version_control;
pub mod record_repository;
pub mod settings_loader;
pub mod stub_services;

pub use gcs_storage::GcsStorage;
pub use gemini_completion::GeminiCompletion;
pub use git_version_control::GitVersionControl;
pub use record_repository::RecordRepository;
pub use settings_loader::load_settings;
#[cfg(test)]
pub use stub_services::{RecordingLog, RecordingStorage, RecordingVersionControl, StubCompletion};
