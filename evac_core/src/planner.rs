//! Hazard-weighted shortest path over a 4-connected floor grid.
//!
//! Entering a cell costs `1`, plus a surcharge for every nearby hazard when
//! the occupant is avoiding them. Walls are impassable. The search is a
//! label-setting Dijkstra over a binary heap that stops on the first goal it
//! finalizes; equal-cost frontier entries leave in the order they were pushed,
//! so a given input always yields the same route.

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};

use log::trace;

use crate::cell::Cell;
use crate::geometry::FloorGeometry;
use crate::occupants::Occupant;

/// Surcharge applied around each hazard.
///
/// A hazard at distance `d < radius` adds `floor((peak - d) * scale)`.
/// Contributions from several hazards are summed; `cap` bounds the sum and
/// is off by default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardCost {
    pub radius: f64,
    pub peak: f64,
    pub scale: f64,
    pub cap: Option<u64>,
}

impl Default for HazardCost {
    fn default() -> Self {
        HazardCost { radius: 4.0, peak: 4.5, scale: 10.0, cap: None }
    }
}

impl HazardCost {
    pub fn surcharge(&self, cell: Cell, hazards: &BTreeSet<Cell>) -> u64 {
        let total: u64 = hazards
            .iter()
            .map(|hazard| cell.distance(*hazard))
            .filter(|d| *d < self.radius)
            // Only bites when configured with peak < radius
            .map(|d| ((self.peak - d) * self.scale).floor().max(0.0) as u64)
            .sum();
        match self.cap {
            Some(cap) => total.min(cap),
            None => total,
        }
    }
}

/// Ordered cells from the occupant's position to a goal, both inclusive.
/// Empty when no goal can be reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    pub cells: Vec<Cell>,
    /// Sum of the cost of every cell entered after the first.
    pub cost: u64,
}

impl Route {
    pub fn unreachable() -> Route {
        Route::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn start(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    pub fn goal(&self) -> Option<Cell> {
        self.cells.last().copied()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FrontierEntry {
    cost: u64,
    /// Push order, breaks ties between equal costs.
    seq: u64,
    cell: Cell,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap
        other.cost.cmp(&self.cost).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Plans routes on one floor against one hazard set.
pub struct PathPlanner<'a, G: FloorGeometry + ?Sized> {
    geometry: &'a G,
    hazards: &'a BTreeSet<Cell>,
    hazard_cost: HazardCost,
}

impl<'a, G: FloorGeometry + ?Sized> PathPlanner<'a, G> {
    /// `hazards` must be the hazards on the same floor as `geometry`.
    pub fn new(geometry: &'a G, hazards: &'a BTreeSet<Cell>) -> Self {
        PathPlanner { geometry, hazards, hazard_cost: HazardCost::default() }
    }

    pub fn with_hazard_cost(mut self, hazard_cost: HazardCost) -> Self {
        self.hazard_cost = hazard_cost;
        self
    }

    /// Cost of stepping into `cell`, or `None` if it cannot be entered.
    pub fn cell_cost(&self, cell: Cell, avoid_hazards: bool) -> Option<u64> {
        if !self.geometry.contains(cell) || self.geometry.is_wall(cell) {
            return None;
        }
        if avoid_hazards {
            Some(1 + self.hazard_cost.surcharge(cell, self.hazards))
        } else {
            Some(1)
        }
    }

    /// Hazards for a responder looking for one, exits otherwise.
    pub fn goals(&self, occupant: &Occupant) -> &'a BTreeSet<Cell> {
        let geometry: &'a G = self.geometry;
        if occupant.seeks_hazards() && !self.hazards.is_empty() {
            self.hazards
        } else {
            geometry.exits()
        }
    }

    /// Total cost of walking `cells` as `occupant` would, or `None` if the
    /// sequence skips a cell or enters one that is impassable.
    pub fn route_cost(&self, occupant: &Occupant, cells: &[Cell]) -> Option<u64> {
        let avoid = occupant.avoids_hazards();
        cells.windows(2).try_fold(0u64, |total, step| {
            if !step[0].is_adjacent(step[1]) {
                return None;
            }
            Some(total + self.cell_cost(step[1], avoid)?)
        })
    }

    pub fn plan(&self, occupant: &Occupant) -> Route {
        let start = occupant.cell;
        if !self.geometry.contains(start) || self.geometry.is_wall(start) {
            trace!("[Planner] {} starts off-grid or in a wall at {start}", occupant.id);
            return Route::unreachable();
        }

        let goals = self.goals(occupant);
        if goals.is_empty() {
            return Route::unreachable();
        }
        let avoid = occupant.avoids_hazards();

        let (width, height) = self.geometry.bounds();
        let index = |cell: Cell| (cell.y * width + cell.x) as usize;
        let size = (width as usize) * (height as usize);

        let mut best = vec![u64::MAX; size];
        let mut came_from: Vec<Option<Cell>> = vec![None; size];
        let mut finalized = vec![false; size];
        let mut frontier = BinaryHeap::new();
        let mut seq = 0;

        best[index(start)] = 0;
        frontier.push(FrontierEntry { cost: 0, seq, cell: start });

        while let Some(FrontierEntry { cost, cell, .. }) = frontier.pop() {
            let i = index(cell);
            if finalized[i] {
                continue;
            }
            finalized[i] = true;

            if goals.contains(&cell) {
                trace!("[Planner] {} reaches {cell} at cost {cost}", occupant.id);
                return Route { cells: reconstruct(&came_from, index, cell), cost };
            }

            for next in cell.neighbors() {
                let Some(step) = self.cell_cost(next, avoid) else { continue };
                let j = index(next);
                if finalized[j] {
                    continue;
                }
                let candidate = cost + step;
                if candidate < best[j] {
                    best[j] = candidate;
                    came_from[j] = Some(cell);
                    seq += 1;
                    frontier.push(FrontierEntry { cost: candidate, seq, cell: next });
                }
            }
        }

        trace!("[Planner] {} has no reachable goal from {start}", occupant.id);
        Route::unreachable()
    }
}

fn reconstruct(came_from: &[Option<Cell>], index: impl Fn(Cell) -> usize, goal: Cell) -> Vec<Cell> {
    let mut cells = vec![goal];
    let mut current = goal;
    while let Some(previous) = came_from[index(current)] {
        cells.push(previous);
        current = previous;
    }
    cells.reverse();
    cells
}
