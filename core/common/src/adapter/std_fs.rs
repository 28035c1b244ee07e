//! 標準ファイルシステム実装（std::fs を委譲）
//!
//! エラーメッセージには操作名と対象パスを必ず含める。

use crate::error::Error;
use crate::ports::outbound::{FileMetadata, FileSystem};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// std::fs をそのまま委譲する FileSystem 実装
#[derive(Debug, Clone, Default)]
pub struct StdFileSystem;

/// `<action> '<path>': <io error>` 形式の Io エラーを作るクロージャ
fn io_err<'a>(action: &'a str, path: &'a Path) -> impl FnOnce(io::Error) -> Error + 'a {
    move |e| Error::io_msg(format!("{} '{}': {}", action, path.display(), e))
}

impl FileSystem for StdFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, Error> {
        fs::read_to_string(path).map_err(io_err("Failed to read", path))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, Error> {
        fs::read(path).map_err(io_err("Failed to read", path))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), Error> {
        fs::write(path, contents).map_err(io_err("Failed to write", path))
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), Error> {
        fs::rename(from, to).map_err(|e| {
            Error::io_msg(format!(
                "Failed to move '{}' into place as '{}': {}",
                from.display(),
                to.display(),
                e
            ))
        })
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), Error> {
        fs::create_dir_all(path).map_err(io_err("Failed to create directory", path))
    }

    fn metadata(&self, path: &Path) -> Result<FileMetadata, Error> {
        let m = fs::metadata(path).map_err(io_err("Failed to stat", path))?;
        Ok(FileMetadata::new(m.len(), m.is_file(), m.is_dir()))
    }

    fn remove_file(&self, path: &Path) -> Result<(), Error> {
        fs::remove_file(path).map_err(io_err("Failed to delete", path))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>, Error> {
        fs::read_dir(path)
            .map_err(io_err("Failed to list", path))?
            .map(|entry| {
                entry
                    .map(|e| e.path())
                    .map_err(io_err("Failed to list", path))
            })
            .collect()
    }

    fn open_append(&self, path: &Path) -> Result<Box<dyn io::Write + Send>, Error> {
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(io_err("Failed to open for append", path))?;
        Ok(Box::new(file))
    }
}
