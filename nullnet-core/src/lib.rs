//! Null-model graphs for network analysis.
//!
//! The centrepiece is [`latticize_connected`], which rewires a connected
//! directed graph towards a ring lattice while preserving every node's in-
//! and out-degree, the weight multiset, and connectivity. Around it sit the
//! matrix primitives ([`Adjacency`]), structural metrics, connectivity
//! classification, and random surrogate generators used to build and
//! compare null models.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod connectivity;
mod error;
mod generate;
mod lattice;
mod matrix;
mod metrics;

#[cfg(test)]
mod test_utils;

pub use crate::{
    connectivity::{Connectivity, classify, is_strongly_connected, weak_component_count},
    error::{
        GenerateError, GenerateErrorCode, LatticeError, LatticeErrorCode, MatrixError,
        MatrixErrorCode, MetricError, MetricErrorCode, Result,
    },
    generate::{random_directed_from_weights, random_directed_like, random_directed_weighted},
    lattice::{
        Edge, EdgeList, EdgeSelection, LatticeParams, Latticized, Latticizer, RewireStats,
        RingDistance, latticize_connected,
    },
    matrix::{Adjacency, Comparison},
    metrics::{
        DirectedDegrees, assortativity_directed, assortativity_undirected, degrees_directed,
        degrees_undirected, number_of_links_directed, number_of_links_undirected,
        number_of_nodes,
    },
};
