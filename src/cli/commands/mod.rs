pub mod analyze;
mod command_result;
pub mod generate;
pub mod helper;
pub mod init;
pub mod migrate;
pub mod remove_field;
pub mod translate;

pub use command_result::*;
