//! memo 共通ライブラリ
//!
//! `memo` コマンドの各サブコマンドで共有されるエラー型・ポート・標準アダプター・LLM クライアントを提供します。

/// エラーハンドリング
pub mod error;

/// Outbound ポート（trait）
pub mod ports;

/// ポートの標準実装
pub mod adapter;

/// LLM クライアント
pub mod llm;
