//! Outbound ポート: 外部サービスの最小限の能力だけを trait にする

pub mod llm_completion;
pub mod object_storage;
pub mod version_control;

pub use llm_completion::LlmCompletion;
pub use object_storage::ObjectStorage;
pub use version_control::VersionControl;
