pub mod commands;
pub mod input;
pub mod render;
pub mod shell;

pub use commands::{Cli, ShellCommand};
pub use shell::Shell;
