//! The rewiring loop.
//!
//! The driver owns the working matrix and edge list for the duration of a
//! run. Every candidate moves through sampling, feasibility and
//! reachability checks, and is either applied or rejected; both outcomes
//! consume one attempt. Only [`RewireDriver::apply`] mutates state.

use std::num::NonZeroUsize;

use rand::Rng;
use tracing::{debug, trace};

use super::{
    distance::RingDistance,
    edges::EdgeList,
    feasibility::{self, Rejection},
    sampler::{self, Candidate, Draw},
    verifier,
};
use crate::{error::LatticeError, matrix::Adjacency};

/// Counters describing what happened during a run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RewireStats {
    /// Candidates drawn, accepted or not.
    pub attempts: usize,
    /// Swaps applied to the matrix.
    pub accepted: usize,
    /// Candidates whose edges shared an endpoint.
    pub rejected_overlap: usize,
    /// Candidates that would have duplicated an existing edge.
    pub rejected_duplicate: usize,
    /// Candidates that would have increased the ring cost.
    pub rejected_lattice: usize,
    /// Candidates that could have broken reachability.
    pub rejected_connectivity: usize,
}

impl RewireStats {
    /// Sum of every rejection counter.
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.rejected_overlap
            + self.rejected_duplicate
            + self.rejected_lattice
            + self.rejected_connectivity
    }

    fn record_rejection(&mut self, reason: Rejection) {
        self.attempts += 1;
        match reason {
            Rejection::NodeOverlap => self.rejected_overlap += 1,
            Rejection::DuplicateEdge => self.rejected_duplicate += 1,
            Rejection::LatticeCost => self.rejected_lattice += 1,
            Rejection::Connectivity => self.rejected_connectivity += 1,
        }
    }

    fn record_acceptance(&mut self) {
        self.attempts += 1;
        self.accepted += 1;
    }
}

#[derive(Debug)]
enum State {
    Sampling,
    Feasibility(Candidate),
    Reachability(Candidate),
    Apply(Candidate),
    Reject(Rejection),
}

/// Everything a finished run hands back.
#[derive(Debug)]
pub(crate) struct RewireOutcome {
    pub(crate) matrix: Adjacency,
    pub(crate) edges: EdgeList,
    pub(crate) stats: RewireStats,
}

pub(crate) struct RewireDriver<'rng, R: Rng + ?Sized> {
    matrix: Adjacency,
    ring: RingDistance,
    edges: EdgeList,
    rng: &'rng mut R,
    budget: usize,
    max_consecutive_rejections: Option<NonZeroUsize>,
    streak: usize,
    stats: RewireStats,
}

impl<'rng, R: Rng + ?Sized> RewireDriver<'rng, R> {
    pub(crate) fn new(
        matrix: Adjacency,
        edges: EdgeList,
        rng: &'rng mut R,
        budget: usize,
        max_consecutive_rejections: Option<NonZeroUsize>,
    ) -> Self {
        let ring = RingDistance::new(matrix.node_count());
        Self {
            matrix,
            ring,
            edges,
            rng,
            budget,
            max_consecutive_rejections,
            streak: 0,
            stats: RewireStats::default(),
        }
    }

    /// Runs until the attempt budget is spent.
    ///
    /// # Errors
    /// Returns [`LatticeError::RewireBudgetExhausted`] when the configured
    /// rejection streak is reached.
    pub(crate) fn run(mut self) -> Result<RewireOutcome, LatticeError> {
        if self.edges.len() < 2 {
            return Ok(self.finish());
        }

        let mut state = State::Sampling;
        while self.stats.attempts < self.budget {
            state = match state {
                State::Sampling => match sampler::draw(&self.edges, &mut *self.rng) {
                    Draw::Candidate(candidate) => State::Feasibility(candidate),
                    Draw::Overlap => State::Reject(Rejection::NodeOverlap),
                },
                State::Feasibility(candidate) => {
                    match feasibility::check(&self.matrix, &self.ring, &candidate) {
                        Ok(()) => State::Reachability(candidate),
                        Err(reason) => State::Reject(reason),
                    }
                }
                State::Reachability(candidate) => {
                    let outcome = verifier::verify(&self.matrix, &candidate);
                    trace!(
                        rounds = outcome.rounds(),
                        preserved = outcome.is_preserved(),
                        "reachability checked"
                    );
                    if outcome.is_preserved() {
                        State::Apply(candidate)
                    } else {
                        State::Reject(Rejection::Connectivity)
                    }
                }
                State::Apply(candidate) => {
                    self.apply(&candidate);
                    State::Sampling
                }
                State::Reject(reason) => {
                    self.reject(reason)?;
                    State::Sampling
                }
            };
        }
        Ok(self.finish())
    }

    fn apply(&mut self, candidate: &Candidate) {
        let Candidate {
            first,
            second,
            a,
            b,
            c,
            d,
        } = *candidate;
        let first_weight = self.matrix.at(a, b);
        let second_weight = self.matrix.at(c, d);
        self.matrix.put(a, b, 0.0);
        self.matrix.put(c, d, 0.0);
        self.matrix.put(a, d, first_weight);
        self.matrix.put(c, b, second_weight);
        self.edges.retarget(first, d);
        self.edges.retarget(second, b);

        self.stats.record_acceptance();
        self.streak = 0;
        record_accepted();
        debug!(a, b, c, d, attempt = self.stats.attempts, "swap accepted");
    }

    fn reject(&mut self, reason: Rejection) -> Result<(), LatticeError> {
        self.stats.record_rejection(reason);
        self.streak += 1;
        record_rejected(reason);
        trace!(reason = reason.as_str(), streak = self.streak, "candidate rejected");

        match self.max_consecutive_rejections {
            Some(cap) if self.streak >= cap.get() => Err(LatticeError::RewireBudgetExhausted {
                attempts: self.stats.attempts,
                consecutive_rejections: self.streak,
            }),
            _ => Ok(()),
        }
    }

    fn finish(self) -> RewireOutcome {
        RewireOutcome {
            matrix: self.matrix,
            edges: self.edges,
            stats: self.stats,
        }
    }
}

#[cfg(feature = "metrics")]
fn record_accepted() {
    ::metrics::counter!("lattice_swaps_accepted").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_accepted() {}

#[cfg(feature = "metrics")]
fn record_rejected(reason: Rejection) {
    ::metrics::counter!("lattice_swaps_rejected", "reason" => reason.as_str()).increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_rejected(_reason: Rejection) {}
