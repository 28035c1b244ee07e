//! CLI（引数解析とヘルプ・補完の出力）

pub mod args;

pub use args::{parse_args, print_completion, Config, USAGE};
