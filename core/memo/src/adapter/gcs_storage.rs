//! ObjectStorage の Google Cloud Storage 実装（JSON API を reqwest で直接呼ぶ）
//!
//! アップロード先は `attachments/<uuid><拡張子>`、公開 URL は
//! `https://storage.googleapis.com/<bucket>/<object>`。
//! アクセストークンは設定で渡されたもの、無ければ `gcloud auth print-access-token`。

use common::error::Error;
use common::ports::outbound::{FileSystem, Process};
use reqwest::Url;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::ports::outbound::ObjectStorage;

const PUBLIC_HOST: &str = "storage.googleapis.com";
const OBJECT_PREFIX: &str = "attachments";

/// GCS ストレージ
pub struct GcsStorage {
    bucket: Option<String>,
    access_token: Option<String>,
    fs: Arc<dyn FileSystem>,
    process: Arc<dyn Process>,
}

impl GcsStorage {
    /// bucket は upload にのみ必要（delete は URL から解決する）
    pub fn new(
        bucket: Option<String>,
        access_token: Option<String>,
        fs: Arc<dyn FileSystem>,
        process: Arc<dyn Process>,
    ) -> Self {
        Self {
            bucket,
            access_token,
            fs,
            process,
        }
    }

    fn access_token(&self) -> Result<String, Error> {
        if let Some(token) = &self.access_token {
            return Ok(token.clone());
        }
        let args = vec![
            "auth".to_string(),
            "print-access-token".to_string(),
        ];
        let out = self.process.output(&PathBuf::from("gcloud"), &args)?;
        let token = out.stdout.trim().to_string();
        if out.code != 0 || token.is_empty() {
            return Err(Error::process(format!(
                "gcloud auth print-access-token failed (exit {}): {}",
                out.code,
                out.stderr.trim()
            )));
        }
        Ok(token)
    }

    fn send(&self, request: reqwest::blocking::RequestBuilder, what: &str) -> Result<(), Error> {
        let response = request
            .bearer_auth(self.access_token()?)
            .send()
            .map_err(|e| Error::http(format!("{} request failed: {}", what, e)))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::http(format!("{} failed: HTTP {}: {}", what, status, body)));
        }
        Ok(())
    }
}

/// 新しいオブジェクト名（元ファイルの拡張子を残す）
pub fn object_name_for(local_file: &Path) -> String {
    let ext = local_file
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    format!("{}/{}{}", OBJECT_PREFIX, uuid::Uuid::new_v4().simple(), ext)
}

pub fn public_url(bucket: &str, object: &str) -> String {
    format!("https://{}/{}/{}", PUBLIC_HOST, bucket, object)
}

/// 公開 URL から (bucket, object) を取り出す
pub fn parse_public_url(url: &str) -> Result<(String, String), Error> {
    let invalid = || Error::invalid_argument(format!("Not a storage object URL: {}", url));
    let parsed = Url::parse(url).map_err(|_| invalid())?;
    if parsed.host_str() != Some(PUBLIC_HOST) {
        return Err(invalid());
    }
    let path = parsed.path().trim_start_matches('/');
    match path.split_once('/') {
        Some((bucket, object)) if !bucket.is_empty() && !object.is_empty() => {
            Ok((bucket.to_string(), object.to_string()))
        }
        _ => Err(invalid()),
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "txt" | "md" => "text/plain; charset=utf-8",
        "html" => "text/html; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// JSON API の /b/<bucket>/o/<object>（object は 1 セグメントとしてエンコード）
fn object_api_url(bucket: &str, object: &str) -> Result<Url, Error> {
    let mut url = Url::parse("https://storage.googleapis.com/storage/v1/b")
        .map_err(|e| Error::system(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| Error::system("storage API URL cannot be a base"))?
        .push(bucket)
        .push("o")
        .push(object);
    Ok(url)
}

impl ObjectStorage for GcsStorage {
    fn upload(&self, local_file: &Path) -> Result<String, Error> {
        let bucket = self
            .bucket
            .as_deref()
            .ok_or_else(|| Error::env("GCS_BUCKET is not set; cannot upload attachments"))?;
        let bytes = self.fs.read(local_file)?;
        let object = object_name_for(local_file);

        let mut url = Url::parse("https://storage.googleapis.com/upload/storage/v1/b")
            .map_err(|e| Error::system(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| Error::system("storage API URL cannot be a base"))?
            .push(bucket)
            .push("o");
        url.query_pairs_mut()
            .append_pair("uploadType", "media")
            .append_pair("name", &object)
            .append_pair("predefinedAcl", "publicRead");

        let request = reqwest::blocking::Client::new()
            .post(url)
            .header("Content-Type", content_type_for(local_file))
            .body(bytes);
        self.send(request, "Storage upload")?;
        Ok(public_url(bucket, &object))
    }

    fn delete(&self, url: &str) -> Result<(), Error> {
        let (bucket, object) = parse_public_url(url)?;
        let request = reqwest::blocking::Client::new().delete(object_api_url(&bucket, &object)?);
        self.send(request, "Storage delete")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::StdFileSystem;
    use common::ports::outbound::ProcessOutput;
    use std::sync::Mutex;

    /// gcloud の呼び出しを記録し、固定の出力を返す
    struct ScriptedProcess {
        output: ProcessOutput,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl ScriptedProcess {
        fn new(code: i32, stdout: &str, stderr: &str) -> Arc<Self> {
            Arc::new(Self {
                output: ProcessOutput {
                    code,
                    stdout: stdout.to_string(),
                    stderr: stderr.to_string(),
                },
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Process for ScriptedProcess {
        fn run(&self, _program: &Path, args: &[String]) -> Result<i32, Error> {
            self.calls.lock().unwrap().push(args.to_vec());
            Ok(self.output.code)
        }

        fn output(&self, _program: &Path, args: &[String]) -> Result<ProcessOutput, Error> {
            self.calls.lock().unwrap().push(args.to_vec());
            Ok(self.output.clone())
        }
    }

    fn storage(token: Option<&str>, process: &Arc<ScriptedProcess>) -> GcsStorage {
        GcsStorage::new(
            Some("b".to_string()),
            token.map(str::to_string),
            Arc::new(StdFileSystem),
            Arc::clone(process) as Arc<dyn Process>,
        )
    }

    #[test]
    fn test_configured_token_skips_gcloud() {
        let process = ScriptedProcess::new(0, "from-gcloud\n", "");
        let token = storage(Some("configured"), &process).access_token().unwrap();
        assert_eq!(token, "configured");
        assert!(process.calls().is_empty());
    }

    #[test]
    fn test_token_falls_back_to_gcloud() {
        let process = ScriptedProcess::new(0, "from-gcloud\n", "");
        let token = storage(None, &process).access_token().unwrap();
        assert_eq!(token, "from-gcloud");
        assert_eq!(
            process.calls(),
            vec![vec!["auth".to_string(), "print-access-token".to_string()]]
        );
    }

    #[test]
    fn test_gcloud_failure_is_process_error() {
        let process = ScriptedProcess::new(1, "", "not logged in");
        let err = storage(None, &process).access_token().unwrap_err();
        assert_eq!(err.exit_code(), 70);
        assert!(err.to_string().contains("not logged in"));
    }

    #[test]
    fn test_object_name_keeps_extension() {
        let name = object_name_for(Path::new("/tmp/flyer.PNG"));
        assert!(name.starts_with("attachments/"));
        assert!(name.ends_with(".PNG"));
        // attachments/ + 32 桁 hex + .PNG
        assert_eq!(name.len(), "attachments/".len() + 32 + 4);

        let name = object_name_for(Path::new("README"));
        assert_eq!(name.len(), "attachments/".len() + 32);
    }

    #[test]
    fn test_public_url_roundtrip() {
        let url = public_url("my-bucket", "attachments/abc.png");
        assert_eq!(url, "https://storage.googleapis.com/my-bucket/attachments/abc.png");
        let (bucket, object) = parse_public_url(&url).unwrap();
        assert_eq!(bucket, "my-bucket");
        assert_eq!(object, "attachments/abc.png");
    }

    #[test]
    fn test_parse_public_url_rejects_other_urls() {
        assert!(parse_public_url("https://example.com/bucket/a.png").is_err());
        assert!(parse_public_url("https://storage.googleapis.com/bucket-only").is_err());
        assert!(parse_public_url("not a url").is_err());
    }

    #[test]
    fn test_object_api_url_encodes_slashes() {
        let url = object_api_url("b", "attachments/a.png").unwrap();
        assert_eq!(
            url.as_str(),
            "https://storage.googleapis.com/storage/v1/b/b/o/attachments%2Fa.png"
        );
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type_for(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.bin")), "application/octet-stream");
    }
}
