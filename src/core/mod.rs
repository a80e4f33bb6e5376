//! Command orchestration

pub mod runner;

pub use runner::*;
