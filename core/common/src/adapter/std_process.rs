//! 標準サブプロセス実行（std::process::Command を委譲）
//!
//! git / gcloud の呼び出しに使う。起動できない場合は Process エラー。

use crate::error::Error;
use crate::ports::outbound::{Process, ProcessOutput};
use std::path::Path;
use std::process::{Command, ExitStatus};

#[derive(Debug, Clone, Default)]
pub struct StdProcess;

fn command(program: &Path, args: &[String]) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd
}

fn spawn_error(program: &Path, e: std::io::Error) -> Error {
    Error::process(format!("Cannot start '{}': {}", program.display(), e))
}

/// シグナルで終了した場合は 1 とみなす
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

impl Process for StdProcess {
    fn run(&self, program: &Path, args: &[String]) -> Result<i32, Error> {
        let status = command(program, args)
            .status()
            .map_err(|e| spawn_error(program, e))?;
        Ok(exit_code(status))
    }

    fn output(&self, program: &Path, args: &[String]) -> Result<ProcessOutput, Error> {
        let out = command(program, args)
            .output()
            .map_err(|e| spawn_error(program, e))?;
        Ok(ProcessOutput {
            code: exit_code(out.status),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        })
    }
}
