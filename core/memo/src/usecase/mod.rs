//! ユースケース（ポート経由でのみ外界に触れる）

pub mod intake;
pub mod prompt;
pub mod publish;
pub mod render;
pub mod sweep;
