pub mod cli;
pub mod config;
pub mod gate;

// Re-export core types for convenience
pub use opagate_core::{Verdict, exit};
