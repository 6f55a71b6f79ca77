//! Connectivity analysis for organism splitting.
//!
//! Cells of one fungus are connected when they touch in the 8-neighbourhood.
//! Components are found with a breadth-first flood fill, O(cells) per fungus.

use mycelia_data::GridPos;
use std::collections::{BTreeSet, VecDeque};

/// Connected components of `cells`, largest first.
///
/// Discovery starts from the smallest position, and equal-sized components
/// keep discovery order, so the result is deterministic.
#[must_use]
pub fn components(cells: &BTreeSet<GridPos>) -> Vec<Vec<GridPos>> {
    let mut unvisited = cells.clone();
    let mut found: Vec<Vec<GridPos>> = Vec::new();
    let mut queue = VecDeque::new();

    while let Some(start) = unvisited.pop_first() {
        let mut component = vec![start];
        queue.push_back(start);
        while let Some(pos) = queue.pop_front() {
            for next in pos.moore_neighbors() {
                if unvisited.remove(&next) {
                    component.push(next);
                    queue.push_back(next);
                }
            }
        }
        found.push(component);
    }

    found.sort_by(|a, b| b.len().cmp(&a.len()));
    found
}

/// How a disconnected fungus breaks apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan {
    /// Cells that stay with the original organism.
    pub keep: Vec<GridPos>,
    /// One entry per new organism.
    pub offshoots: Vec<Vec<GridPos>>,
}

/// `None` when the cells form a single component.
#[must_use]
pub fn split_plan(cells: &BTreeSet<GridPos>) -> Option<SplitPlan> {
    if cells.len() < 2 {
        return None;
    }
    let mut parts = components(cells);
    if parts.len() < 2 {
        return None;
    }
    let keep = parts.remove(0);
    Some(SplitPlan {
        keep,
        offshoots: parts,
    })
}
