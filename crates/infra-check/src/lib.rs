pub mod checks;
mod cli;
pub mod config;
pub mod runner;
pub mod summary;

pub use cli::{validate, Cli};
