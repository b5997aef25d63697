//! Largest-remainder allocation of sensors across walls.
//!
//! Each wall gets a share of the total proportional to its capacity:
//! 1. Base share = floor(total × capacity / Σ capacity), capped at capacity
//! 2. Leftover units go to walls with the largest fractional remainder
//! 3. Anything still left goes to the largest walls with spare room
//!
//! Both sorts are stable, so ties fall back to wall enumeration order.

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;

/// Sensor count per wall, in wall enumeration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub counts: Vec<u64>,
    /// Sensors requested by the coverage target.
    pub target_count: u64,
    /// Sum of all capacities.
    pub max_possible: u64,
}

impl AllocationPlan {
    /// Total sensors allocated.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Distribute `target_count` sensors over walls with the given capacities.
///
/// `desired_coverage` is only carried into the truncation diagnostic.
pub fn allocate(
    target_count: u64,
    capacities: &[u64],
    desired_coverage: f64,
) -> (AllocationPlan, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let max_possible = capacities
        .iter()
        .fold(0u64, |total, &c| total.saturating_add(c));
    let mut counts = vec![0u64; capacities.len()];

    let plan = |counts| AllocationPlan {
        counts,
        target_count,
        max_possible,
    };

    if max_possible == 0 {
        diagnostics.push(Diagnostic::NoPlacementPossible);
        return (plan(counts), diagnostics);
    }

    if target_count > max_possible {
        diagnostics.push(Diagnostic::TargetTruncated {
            desired_coverage,
            target_count,
            max_possible,
        });
    }
    let actual_total = target_count.min(max_possible);
    if actual_total == 0 {
        return (plan(counts), diagnostics);
    }

    // Proportional base shares. Capacity sum in f64 so it never saturates.
    let capacity_sum: f64 = capacities.iter().map(|&c| c as f64).sum();
    let mut remainders = vec![0.0f64; capacities.len()];
    for (i, &capacity) in capacities.iter().enumerate() {
        let ideal = actual_total as f64 * capacity as f64 / capacity_sum;
        let capped = ideal.min(capacity as f64);
        let base = capped.floor();
        counts[i] = (base as u64).min(capacity);
        remainders[i] = capped - base;
    }

    let mut remaining = actual_total.saturating_sub(counts.iter().sum());

    // Pass 1: largest fractional remainder first
    let mut by_remainder: Vec<usize> = (0..capacities.len()).collect();
    by_remainder.sort_by(|&a, &b| remainders[b].total_cmp(&remainders[a]));
    remaining = grant(&mut counts, capacities, &by_remainder, remaining);

    // Pass 2: largest capacity first, for units pass 1 could not place
    if remaining > 0 {
        let mut by_capacity: Vec<usize> = (0..capacities.len()).collect();
        by_capacity.sort_by(|&a, &b| capacities[b].cmp(&capacities[a]));
        remaining = grant(&mut counts, capacities, &by_capacity, remaining);
    }

    // actual_total <= max_possible, so spare capacity exists until every unit is placed
    assert_eq!(
        remaining, 0,
        "allocation left {remaining} of {actual_total} units with every wall saturated"
    );

    log::debug!(
        "allocated {} of target {} (max {}): {:?}",
        actual_total,
        target_count,
        max_possible,
        counts
    );

    (plan(counts), diagnostics)
}

/// Give one unit to each wall in `order` that has spare capacity.
/// Returns the units still unplaced.
fn grant(counts: &mut [u64], capacities: &[u64], order: &[usize], mut remaining: u64) -> u64 {
    for &i in order {
        if remaining == 0 {
            break;
        }
        if counts[i] < capacities[i] {
            counts[i] += 1;
            remaining -= 1;
        }
    }
    remaining
}
