//! Core types for the opagate policy gate.
//!
//! This crate provides the fundamental types shared across opagate
//! components:
//! - Policy verdicts (Verdict)
//! - The process exit-code contract (exit)

mod verdict;

pub mod exit;

pub use verdict::Verdict;
