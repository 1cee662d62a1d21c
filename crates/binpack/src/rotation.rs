//! Rotation search on top of the greedy packer.
//!
//! The greedy packer always uses cartons in the orientation it is given. This
//! module tries other orientations and keeps the assignment that needs the
//! fewest containers.
//!
//! # Search order
//!
//! 1. Split off cartons that cannot fit the container in any orientation.
//! 2. Pack the remaining cartons in the caller's order, then shuffle them with
//!    a seeded RNG and pack them again. The better of the two is the baseline.
//! 3. Enumerate every combination of feasible orientations, the last carton
//!    changing fastest (the leaf order of a depth-first search), and pack each
//!    combination.
//!
//! A combination replaces the best result only if it uses strictly fewer
//! containers. The search stops early when the iteration budget is used up,
//! when the best result needs a single container, or when it is cancelled.
//! None of these are errors: the best result so far is always returned.

use crate::greedy::{pack_all, GreedyPack};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use u_shipping_core::{Package, StopReason};

/// Outcome of a rotation search.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Filled containers of the best packing found.
    pub bins: Vec<Vec<Package>>,
    /// Cartons the best packing could not place.
    pub rest: Vec<Package>,
    /// Cartons that do not fit the container in any orientation.
    pub oversize: Vec<Package>,
    /// Orientation combinations evaluated (the baseline is not counted).
    pub evaluations: u64,
    /// Why the search stopped.
    pub stop_reason: StopReason,
}

impl SearchOutcome {
    /// Returns the number of containers used.
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }
}

/// Best packing found so far.
#[derive(Debug)]
struct SearchState {
    best: GreedyPack,
}

impl SearchState {
    fn new(baseline: GreedyPack) -> Self {
        Self { best: baseline }
    }

    /// Keeps `candidate` if it needs fewer containers. Returns true if it did.
    fn offer(&mut self, candidate: GreedyPack) -> bool {
        if candidate.bin_count() < self.best.bin_count() {
            self.best = candidate;
            true
        } else {
            false
        }
    }

    /// A single container is the best any non-empty shipment can do.
    fn is_optimal(&self) -> bool {
        self.best.bin_count() < 2
    }
}

/// Cartons prepared for a search: in caller and shuffled order, with the
/// feasible orientations of the shuffled ones.
struct Prepared {
    container: Package,
    given: Vec<Package>,
    baseline: Vec<Package>,
    choices: Vec<Vec<Package>>,
    oversize: Vec<Package>,
}

impl Prepared {
    fn new(container: &Package, packages: &[Package], seed: u64) -> Self {
        let container = container.canonical();
        let (mut todo, oversize): (Vec<Package>, Vec<Package>) = packages
            .iter()
            .copied()
            .partition(|p| p.canonical().fits_within(&container));

        let given = todo.clone();
        let mut rng = StdRng::seed_from_u64(seed);
        todo.shuffle(&mut rng);

        let choices = todo
            .iter()
            .map(|p| {
                p.rotations()
                    .into_iter()
                    .filter(|r| r.fits_within(&container))
                    .collect()
            })
            .collect();

        Self {
            container,
            given,
            baseline: todo,
            choices,
            oversize,
        }
    }

    /// Packs the caller's order and the shuffled order, keeping the better one.
    fn baseline_state(&self) -> SearchState {
        let mut state = SearchState::new(pack_all(&self.container, self.given.clone()));
        state.offer(pack_all(&self.container, self.baseline.clone()));
        state
    }

    fn oriented(&self, indices: &[usize]) -> Vec<Package> {
        self.choices
            .iter()
            .zip(indices)
            .map(|(options, &i)| options[i])
            .collect()
    }

    fn into_outcome(
        self,
        best: GreedyPack,
        evaluations: u64,
        stop_reason: StopReason,
    ) -> SearchOutcome {
        SearchOutcome {
            bins: best.bins,
            rest: best.rest,
            oversize: self.oversize,
            evaluations,
            stop_reason,
        }
    }
}

/// Advances `indices` to the next combination, last position fastest.
///
/// Positions before `fixed` are never touched. Returns false once every
/// combination has been visited.
fn advance(indices: &mut [usize], choices: &[Vec<Package>], fixed: usize) -> bool {
    for pos in (fixed..indices.len()).rev() {
        indices[pos] += 1;
        if indices[pos] < choices[pos].len() {
            return true;
        }
        indices[pos] = 0;
    }
    false
}

/// Runs the rotation search.
///
/// `iteration_budget` caps the number of orientation combinations packed
/// after the baseline. The budget is checked before each combination, so at
/// most `iteration_budget` are packed and a budget of 0 returns the baseline.
/// The baseline never needs more containers than the greedy packer on the
/// input order. With the same `seed` and input order the result is identical
/// across runs.
pub fn optimize(
    container: &Package,
    packages: &[Package],
    iteration_budget: u64,
    seed: u64,
) -> SearchOutcome {
    optimize_with_cancel(
        container,
        packages,
        iteration_budget,
        seed,
        &AtomicBool::new(false),
    )
}

/// Runs the rotation search, stopping early once `cancelled` is set.
pub fn optimize_with_cancel(
    container: &Package,
    packages: &[Package],
    iteration_budget: u64,
    seed: u64,
    cancelled: &AtomicBool,
) -> SearchOutcome {
    let prepared = Prepared::new(container, packages, seed);
    let mut state = prepared.baseline_state();
    log::debug!(
        "Rotation search baseline: {} cartons in {} bins, {} oversize",
        prepared.baseline.len(),
        state.best.bin_count(),
        prepared.oversize.len()
    );

    let mut evaluations = 0u64;
    let stop_reason = if state.is_optimal() {
        StopReason::Optimal
    } else if prepared.choices.iter().any(Vec::is_empty) {
        StopReason::Exhausted
    } else {
        let mut indices = vec![0usize; prepared.choices.len()];
        loop {
            if cancelled.load(Ordering::Relaxed) {
                break StopReason::Cancelled;
            }
            if evaluations >= iteration_budget {
                break StopReason::BudgetExceeded;
            }

            evaluations += 1;
            let candidate = pack_all(&prepared.container, prepared.oriented(&indices));
            log::trace!(
                "Rotation search evaluation {}: {} bins",
                evaluations,
                candidate.bin_count()
            );
            if state.offer(candidate) {
                log::debug!(
                    "Rotation search improved to {} bins after {} evaluations",
                    state.best.bin_count(),
                    evaluations
                );
            }
            if state.is_optimal() {
                break StopReason::Optimal;
            }
            if !advance(&mut indices, &prepared.choices, 0) {
                break StopReason::Exhausted;
            }
        }
    };

    log::info!(
        "Rotation search finished: {} bins, {} evaluations, {:?}",
        state.best.bin_count(),
        evaluations,
        stop_reason
    );
    prepared.into_outcome(state.best, evaluations, stop_reason)
}

/// Runs the rotation search on the rayon thread pool.
///
/// The combinations are split by the orientation of the first carton. All
/// workers share the best result, the evaluation counter and a stop flag,
/// which is checked before every evaluation. The budget is never exceeded,
/// but which of several equally good packings is returned may differ between
/// runs.
pub fn optimize_parallel(
    container: &Package,
    packages: &[Package],
    iteration_budget: u64,
    seed: u64,
    cancelled: &AtomicBool,
) -> SearchOutcome {
    let prepared = Prepared::new(container, packages, seed);
    let state = prepared.baseline_state();

    if state.is_optimal() || prepared.choices.iter().any(Vec::is_empty) {
        let reason = if state.is_optimal() {
            StopReason::Optimal
        } else {
            StopReason::Exhausted
        };
        return prepared.into_outcome(state.best, 0, reason);
    }

    let state = Mutex::new(state);
    let counter = AtomicU64::new(0);
    let stop = AtomicBool::new(false);
    let optimal = AtomicBool::new(false);
    let budget_hit = AtomicBool::new(false);

    let first_options = prepared.choices[0].len();
    (0..first_options).into_par_iter().for_each(|first| {
        let mut indices = vec![0usize; prepared.choices.len()];
        indices[0] = first;

        loop {
            if stop.load(Ordering::Relaxed) || cancelled.load(Ordering::Relaxed) {
                return;
            }
            if counter.fetch_add(1, Ordering::Relaxed) >= iteration_budget {
                budget_hit.store(true, Ordering::Relaxed);
                stop.store(true, Ordering::Relaxed);
                return;
            }

            let candidate = pack_all(&prepared.container, prepared.oriented(&indices));
            {
                let mut guard = match state.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                if guard.offer(candidate) {
                    log::debug!(
                        "Parallel rotation search improved to {} bins",
                        guard.best.bin_count()
                    );
                }
                if guard.is_optimal() {
                    optimal.store(true, Ordering::Relaxed);
                    stop.store(true, Ordering::Relaxed);
                    return;
                }
            }

            if !advance(&mut indices, &prepared.choices, 1) {
                return;
            }
        }
    });

    let evaluations = counter.load(Ordering::Relaxed).min(iteration_budget);
    let stop_reason = if optimal.load(Ordering::Relaxed) {
        StopReason::Optimal
    } else if cancelled.load(Ordering::Relaxed) {
        StopReason::Cancelled
    } else if budget_hit.load(Ordering::Relaxed) {
        StopReason::BudgetExceeded
    } else {
        StopReason::Exhausted
    };

    let state = match state.into_inner() {
        Ok(state) => state,
        Err(poisoned) => poisoned.into_inner(),
    };
    log::info!(
        "Parallel rotation search finished: {} bins, {} evaluations, {:?}",
        state.best.bin_count(),
        evaluations,
        stop_reason
    );
    prepared.into_outcome(state.best, evaluations, stop_reason)
}
