pub mod args;
pub mod commands;
pub mod root;
pub mod ui;

pub use args::{Args, CheckArgs, validate_check_args};
pub use root::RootCommand;
