//! 命令行界面模块

pub mod commands;
pub mod printer;
pub mod session;

pub use commands::{tokenize, Command};
pub use printer::{PrintMode, Printer};
pub use session::{CommandResult, Engine, Session, SessionConfig};
