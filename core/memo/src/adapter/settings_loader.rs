//! 設定の読み込み（adapter 層）
//!
//! 優先順位: 環境変数 > 設定ファイル（<home>/config.json）> 既定値。
//! CLI フラグによる上書きは cli 層で行う。

use common::error::Error;
use common::ports::outbound::{EnvResolver, FileSystem};
use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::Settings;

const SETTINGS_FILE: &str = "config.json";
const ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// config.json の内容（全キー省略可）
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    default_owner: Option<String>,
    site_title: Option<String>,
    model: Option<String>,
    bucket: Option<String>,
    memories_dir: Option<PathBuf>,
}

/// 設定ファイルのパス。HOME も無ければ None（ファイル無しとして扱う）。
pub fn settings_path(env: &dyn EnvResolver) -> Option<PathBuf> {
    env.resolve_home_dir().ok().map(|home| home.join(SETTINGS_FILE))
}

fn read_settings_file(fs: &dyn FileSystem, env: &dyn EnvResolver) -> Result<SettingsFile, Error> {
    let Some(path) = settings_path(env) else {
        return Ok(SettingsFile::default());
    };
    if !fs.exists(&path) {
        return Ok(SettingsFile::default());
    }
    let text = fs.read_to_string(&path)?;
    serde_json::from_str(&text)
        .map_err(|e| Error::json(format!("Invalid settings file '{}': {}", path.display(), e)))
}

/// 設定を解決する
pub fn load_settings(fs: &dyn FileSystem, env: &dyn EnvResolver) -> Result<Settings, Error> {
    let file = read_settings_file(fs, env)?;
    let defaults = Settings::default();
    Ok(Settings {
        default_owner: file.default_owner.unwrap_or(defaults.default_owner),
        site_title: file.site_title.unwrap_or(defaults.site_title),
        memories_dir: file.memories_dir.unwrap_or(defaults.memories_dir),
        output_dir: defaults.output_dir,
        model: env.var("GEMINI_MODEL").or(file.model),
        bucket: env.var("GCS_BUCKET").or(file.bucket),
        access_token: env.var(ACCESS_TOKEN_ENV),
        log_file: env.var("MEMO_LOG_FILE").map(PathBuf::from),
    })
}
