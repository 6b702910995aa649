//! Output formatting for CLI results

pub mod console;
pub mod json;
pub mod table;

pub use console::Console;
