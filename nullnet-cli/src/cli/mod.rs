//! Command-line interface for the nullnet rewiring engine.
//!
//! The `latticize` command draws a seeded random weighted digraph, retries
//! until it is weakly connected, rewires it towards a ring lattice, and
//! reports how the ring cost and assortativity moved.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, LatticizeCommand, SelectionArg, render_summary,
    run_cli,
};
