mod command;

pub use command::{validate, Cli};
