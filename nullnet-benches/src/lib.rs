//! Benchmark support crate for nullnet.
//!
//! Provides seeded connected graphs and parameter types used by the Criterion
//! benchmarks for lattice rewiring and the graph metrics that accompany it.

pub mod error;
pub mod graph;
pub mod params;
