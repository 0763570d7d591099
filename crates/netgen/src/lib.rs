pub mod analyzer;
mod cli;
pub mod generator;
pub mod report;

pub use cli::{Cli, Commands};
