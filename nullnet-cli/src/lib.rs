//! Library half of the `nullnet` binary: argument parsing, command
//! execution and logging setup.

pub mod cli;
pub mod logging;
