//! VersionControl の git 実装（Process ポート経由で git を起動）

use common::error::Error;
use common::ports::outbound::Process;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::ports::outbound::VersionControl;

/// カレントディレクトリの作業ツリーに対して git を実行する
pub struct GitVersionControl {
    process: Arc<dyn Process>,
    program: PathBuf,
}

impl GitVersionControl {
    pub fn new(process: Arc<dyn Process>) -> Self {
        Self {
            process,
            program: PathBuf::from("git"),
        }
    }

    fn git(&self, args: Vec<String>) -> Result<(), Error> {
        let code = self.process.run(&self.program, &args)?;
        if code != 0 {
            return Err(Error::process(format!(
                "git {} failed with exit code {}",
                args.first().map(String::as_str).unwrap_or(""),
                code
            )));
        }
        Ok(())
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

impl VersionControl for GitVersionControl {
    fn stage(&self, paths: &[PathBuf]) -> Result<(), Error> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args = vec!["add".to_string(), "--".to_string()];
        args.extend(paths.iter().map(|p| path_arg(p)));
        self.git(args)
    }

    fn commit(&self, message: &str) -> Result<(), Error> {
        self.git(vec!["commit".to_string(), "-m".to_string(), message.to_string()])
    }

    fn push(&self) -> Result<(), Error> {
        self.git(vec!["push".to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::ports::outbound::ProcessOutput;
    use std::sync::Mutex;

    /// 呼ばれた引数を記録し、指定したサブコマンドだけ失敗させる Process
    struct RecordingProcess {
        calls: Mutex<Vec<Vec<String>>>,
        fail_on: Option<&'static str>,
    }

    impl Process for RecordingProcess {
        fn run(&self, program: &Path, args: &[String]) -> Result<i32, Error> {
            assert_eq!(program, Path::new("git"));
            self.calls.lock().unwrap().push(args.to_vec());
            let failing = self.fail_on.is_some_and(|f| args.first().map(String::as_str) == Some(f));
            Ok(if failing { 1 } else { 0 })
        }

        fn output(&self, _program: &Path, _args: &[String]) -> Result<ProcessOutput, Error> {
            Err(Error::process("unexpected output() in test"))
        }
    }

    fn git(fail_on: Option<&'static str>) -> (Arc<RecordingProcess>, GitVersionControl) {
        let process = Arc::new(RecordingProcess {
            calls: Mutex::new(Vec::new()),
            fail_on,
        });
        let vc = GitVersionControl::new(process.clone());
        (process, vc)
    }

    #[test]
    fn test_stage_commit_push_arguments() {
        let (process, vc) = git(None);
        vc.stage(&[PathBuf::from("memories/a.md"), PathBuf::from("memories/b.md")])
            .unwrap();
        vc.commit("Update memory: a.md").unwrap();
        vc.push().unwrap();
        let calls = process.calls.lock().unwrap();
        assert_eq!(calls[0], vec!["add", "--", "memories/a.md", "memories/b.md"]);
        assert_eq!(calls[1], vec!["commit", "-m", "Update memory: a.md"]);
        assert_eq!(calls[2], vec!["push"]);
    }

    #[test]
    fn test_stage_nothing_is_noop() {
        let (process, vc) = git(None);
        vc.stage(&[]).unwrap();
        assert!(process.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_non_zero_exit_is_error() {
        let (_process, vc) = git(Some("commit"));
        let err = vc.commit("x").unwrap_err();
        assert!(matches!(err, Error::Process(_)));
        assert!(err.to_string().contains("git commit"));
    }
}
