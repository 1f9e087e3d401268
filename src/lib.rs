pub mod cli;
pub mod config;
pub mod detector;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod queries;
pub mod rows;
pub mod runner;

pub use error::{AntipatternGuardError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_DETECTED: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
