mod command;

pub use command::{Cli, Commands};
