pub mod console;
pub mod models;
pub mod utils;

pub use self::console::Console;
