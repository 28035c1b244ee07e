//! memo 固有のドメイン型（型と不変条件）

pub mod calendar;
pub mod command;
pub mod decision;
pub mod filename;
pub mod memory;
pub mod record;
pub mod settings;

pub use calendar::{default_expires, next_end_of_week};
pub use command::MemoCommand;
pub use decision::{DecisionAction, IntakeDecision};
pub use filename::derive_filename;
pub use memory::Memory;
pub use record::{format_record, parse_record};
pub use settings::Settings;
