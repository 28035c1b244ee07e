mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use common::adapter::{StdEnvResolver, StdFileSystem};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use std::process;

use adapter::load_settings;
use cli::{parse_args, print_completion, USAGE};
use domain::MemoCommand;
use ports::inbound::UseCaseRunner;
use usecase::intake::IntakeRequest;
use usecase::publish::PublishRequest;
use wiring::{wire_memo, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl Runner {
    fn dispatch(&self, command: MemoCommand) -> Result<i32, Error> {
        match command {
            MemoCommand::Help(text) => {
                print!("{}", text);
                Ok(0)
            }
            MemoCommand::Completion(shell) => {
                print_completion(shell);
                Ok(0)
            }
            MemoCommand::Commit {
                memories_dir,
                message,
                today,
                attach,
                owner,
                push,
            } => {
                if message.trim().is_empty() {
                    return Err(Error::invalid_argument("--message must not be empty"));
                }
                let outcome = self.app.intake.run(&IntakeRequest {
                    memories_dir: &memories_dir,
                    message: &message,
                    today: today.unwrap_or_else(|| self.app.clock.today()),
                    attach: &attach,
                    owner: &owner,
                    push,
                })?;
                for path in &outcome.swept {
                    println!("Deleted: {}", path.display());
                }
                let verb = if outcome.updated { "Updated" } else { "Created" };
                println!("{}: {}", verb, outcome.path.display());
                Ok(0)
            }
            MemoCommand::Cleanup {
                memories_dir,
                today,
                push,
            } => {
                let today = today.unwrap_or_else(|| self.app.clock.today());
                for path in self.app.sweep.run(&memories_dir, today, push)? {
                    println!("Deleted: {}", path.display());
                }
                Ok(0)
            }
            MemoCommand::Publish {
                memories_dir,
                output_dir,
                template,
                site_title,
                today,
            } => {
                let out = self.app.publish.run(&PublishRequest {
                    memories_dir: &memories_dir,
                    output_dir: &output_dir,
                    template: template.as_deref(),
                    site_title: &site_title,
                    today: today.unwrap_or_else(|| self.app.clock.today()),
                })?;
                println!("Wrote: {}", out.display());
                Ok(0)
            }
        }
    }
}

impl UseCaseRunner for Runner {
    fn run(&self, command: MemoCommand) -> Result<i32, Error> {
        let command_name = command.name();
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command started")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name),
        );

        let result = self.dispatch(command);

        let code = match &result {
            Ok(code) => *code,
            Err(e) => e.exit_code(),
        };
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command finished")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self.app.logger.log(
                &LogRecord::new(LogLevel::Error, e.to_string())
                    .layer("cli")
                    .kind("error"),
            );
        }
        result
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("memo: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let (config, settings) = parse_args(load_settings(&StdFileSystem, &StdEnvResolver))?;
    let app = wire_memo(settings, config.verbose, config.log_file);
    let runner = Runner { app };
    runner.run(config.command)
}

fn print_usage() {
    eprintln!("{}", USAGE);
}
