//! エラーハンドリング
//!
//! 全レイヤーで共通の `Error`。カテゴリごとに終了コードを持ち、
//! `main` は `exit_code()` をそのままプロセスの終了コードにする。

/// エラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// 引数不正（usage を表示する）
    #[error("{0}")]
    InvalidArgument(String),
    /// レコードファイルや AI 応答の形式不正
    #[error("{0}")]
    Parse(String),
    #[error("{0}")]
    Io(String),
    /// 必須の環境変数が無い
    #[error("{0}")]
    Env(String),
    #[error("{0}")]
    Http(String),
    #[error("{0}")]
    Json(String),
    /// 外部コマンド（git / gcloud）の失敗
    #[error("{0}")]
    Process(String),
    #[error("{0}")]
    System(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn process(msg: impl Into<String>) -> Self {
        Self::Process(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    /// usage を表示すべきエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// sysexits.h 準拠の終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::Parse(_) | Self::Json(_) => 65,
            Self::Http(_) => 69,
            Self::Process(_) | Self::System(_) => 70,
            Self::Io(_) => 74,
            Self::Env(_) => 78,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_helpers() {
        let err = Error::invalid_argument("test");
        assert_eq!(err.to_string(), "test");
        assert_eq!(err.exit_code(), 64);
        assert!(err.is_usage());

        let err = Error::system("test");
        assert_eq!(err.exit_code(), 70);
        assert!(!err.is_usage());
    }

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(Error::parse("x").exit_code(), 65);
        assert_eq!(Error::json("x").exit_code(), 65);
        assert_eq!(Error::http("x").exit_code(), 69);
        assert_eq!(Error::process("x").exit_code(), 70);
        assert_eq!(Error::io_msg("x").exit_code(), 74);
        assert_eq!(Error::env("x").exit_code(), 78);
    }
}
