//! Ports & Adapters のポート定義
//!
//! - inbound: CLI がアプリを呼び出すための trait
//! - outbound: アプリが外部サービス（LLM・オブジェクトストレージ・バージョン管理）を使うための trait
//!
//! FS・環境変数・プロセス・時刻・ログのポートは common::ports::outbound にある。

pub mod inbound;
pub mod outbound;
