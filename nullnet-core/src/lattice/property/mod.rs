//! Property-based checks for lattice rewiring.

mod invariants;
mod strategies;
mod types;
