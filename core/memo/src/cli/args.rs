use chrono::NaiveDate;
use clap::builder::ArgAction;
use clap::error::ErrorKind;
use clap::value_parser;
use clap_complete::Shell;
use common::error::Error;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::domain::{MemoCommand, Settings};

pub const USAGE: &str = "Usage: memo [-v] [--log-file <path>] <commit|cleanup|publish> [options]";

/// 解析結果（グローバルオプション + 実行するコマンド）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// -v / --verbose: info/debug ログも stderr に出す
    pub verbose: bool,
    /// --log-file: JSONL ログの出力先（MEMO_LOG_FILE より優先）
    pub log_file: Option<PathBuf>,
    pub command: MemoCommand,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got '{}' ({})", s, e))
}

fn memories_dir_arg() -> clap::Arg {
    clap::Arg::new("memories-dir")
        .short('d')
        .long("memories-dir")
        .value_name("dir")
        .help("Directory holding the memory files")
        .value_parser(value_parser!(PathBuf))
        .num_args(1)
}

fn today_arg() -> clap::Arg {
    clap::Arg::new("today")
        .long("today")
        .value_name("YYYY-MM-DD")
        .help("Use this date as today (for testing)")
        .value_parser(parse_date)
        .num_args(1)
}

fn no_push_arg() -> clap::Arg {
    clap::Arg::new("no-push")
        .long("no-push")
        .help("Commit locally without pushing")
        .action(ArgAction::SetTrue)
}

pub(crate) fn build_clap_command() -> clap::Command {
    clap::Command::new("memo")
        .about("Keep event memories as Markdown files and publish them as a page")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Emit info/debug logs to stderr")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("log-file")
                .long("log-file")
                .value_name("path")
                .help("Append JSON log lines to this file")
                .value_parser(value_parser!(PathBuf))
                .global(true)
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .subcommand(
            clap::Command::new("commit")
                .about("Create or update a memory from a natural-language message")
                .arg(
                    clap::Arg::new("message")
                        .short('m')
                        .long("message")
                        .value_name("text")
                        .help("The announcement text")
                        .required(true)
                        .num_args(1),
                )
                .arg(memories_dir_arg())
                .arg(today_arg())
                .arg(
                    clap::Arg::new("attach")
                        .short('a')
                        .long("attach")
                        .value_name("file")
                        .help("Upload a file and attach its URL (repeatable)")
                        .value_parser(value_parser!(PathBuf))
                        .action(ArgAction::Append),
                )
                .arg(
                    clap::Arg::new("owner")
                        .long("owner")
                        .value_name("id")
                        .help("Owner (tenant) id")
                        .num_args(1),
                )
                .arg(no_push_arg()),
        )
        .subcommand(
            clap::Command::new("cleanup")
                .about("Delete expired memories and their attachments")
                .arg(memories_dir_arg())
                .arg(today_arg())
                .arg(no_push_arg()),
        )
        .subcommand(
            clap::Command::new("publish")
                .about("Render non-expired memories to <output-dir>/index.html")
                .arg(
                    clap::Arg::new("output-dir")
                        .short('o')
                        .long("output-dir")
                        .value_name("dir")
                        .help("Directory to write index.html into")
                        .value_parser(value_parser!(PathBuf))
                        .num_args(1),
                )
                .arg(memories_dir_arg())
                .arg(
                    clap::Arg::new("template")
                        .long("template")
                        .value_name("file")
                        .help("HTML template with {{ site_title }}, {{ this_week }}, {{ upcoming }}")
                        .value_parser(value_parser!(PathBuf))
                        .num_args(1),
                )
                .arg(
                    clap::Arg::new("title")
                        .long("title")
                        .value_name("text")
                        .help("Site title")
                        .num_args(1),
                )
                .arg(today_arg()),
        )
}

fn memories_dir(matches: &clap::ArgMatches, settings: &Settings) -> PathBuf {
    matches
        .get_one::<PathBuf>("memories-dir")
        .cloned()
        .unwrap_or_else(|| settings.memories_dir.clone())
}

fn matches_to_command(matches: &clap::ArgMatches, settings: &Settings) -> Result<MemoCommand, Error> {
    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(MemoCommand::Completion(shell));
    }

    match matches.subcommand() {
        Some(("commit", sub)) => Ok(MemoCommand::Commit {
            memories_dir: memories_dir(sub, settings),
            message: sub.get_one::<String>("message").cloned().unwrap_or_default(),
            today: sub.get_one::<NaiveDate>("today").copied(),
            attach: sub
                .get_many::<PathBuf>("attach")
                .map(|i| i.cloned().collect())
                .unwrap_or_default(),
            owner: sub
                .get_one::<String>("owner")
                .cloned()
                .unwrap_or_else(|| settings.default_owner.clone()),
            push: !sub.get_flag("no-push"),
        }),
        Some(("cleanup", sub)) => Ok(MemoCommand::Cleanup {
            memories_dir: memories_dir(sub, settings),
            today: sub.get_one::<NaiveDate>("today").copied(),
            push: !sub.get_flag("no-push"),
        }),
        Some(("publish", sub)) => Ok(MemoCommand::Publish {
            memories_dir: memories_dir(sub, settings),
            output_dir: sub
                .get_one::<PathBuf>("output-dir")
                .cloned()
                .unwrap_or_else(|| settings.output_dir.clone()),
            template: sub.get_one::<PathBuf>("template").cloned(),
            site_title: sub
                .get_one::<String>("title")
                .cloned()
                .unwrap_or_else(|| settings.site_title.clone()),
            today: sub.get_one::<NaiveDate>("today").copied(),
        }),
        _ => Err(Error::invalid_argument(
            "No subcommand given (expected commit, cleanup or publish)",
        )),
    }
}

/// 引数列を解析する。未指定の値は settings で補う。
pub fn parse_args_from<I, T>(args: I, settings: &Settings) -> Result<Config, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match build_clap_command().try_get_matches_from(args) {
        Ok(m) => m,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return Ok(Config {
                verbose: false,
                log_file: None,
                command: MemoCommand::Help(e.to_string()),
            });
        }
        Err(e) => return Err(Error::invalid_argument(e.to_string())),
    };

    Ok(Config {
        verbose: matches.get_flag("verbose"),
        log_file: matches.get_one::<PathBuf>("log-file").cloned(),
        command: matches_to_command(&matches, settings)?,
    })
}

/// 引数を解析し、実行に使う設定と組にして返す
///
/// 設定の読み込みに失敗していても help と補完スクリプトは出せる。
/// それ以外のコマンドでは読み込みエラーを返す。
pub fn parse_args_with<I, T>(
    args: I,
    loaded: Result<Settings, Error>,
) -> Result<(Config, Settings), Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let fallback = Settings::default();
    let config = parse_args_from(args, loaded.as_ref().unwrap_or(&fallback))?;
    match config.command {
        MemoCommand::Help(_) | MemoCommand::Completion(_) => {
            Ok((config, loaded.unwrap_or(fallback)))
        }
        _ => Ok((config, loaded?)),
    }
}

/// プロセスの引数を解析する
pub fn parse_args(loaded: Result<Settings, Error>) -> Result<(Config, Settings), Error> {
    parse_args_with(std::env::args_os(), loaded)
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "memo", &mut std::io::stdout());
}
