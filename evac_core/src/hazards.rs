use std::collections::{BTreeMap, BTreeSet};

use crate::cell::Cell;
use crate::Floor;

static NO_HAZARDS: BTreeSet<Cell> = BTreeSet::new();

/// Point hazards grouped by floor. Presence is binary; a cell holds at most one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HazardRegistry {
    floors: BTreeMap<Floor, BTreeSet<Cell>>,
}

impl HazardRegistry {
    pub fn new() -> HazardRegistry {
        HazardRegistry::default()
    }

    /// Adds a hazard at `cell` or removes the one already there.
    /// Returns whether a hazard is present afterwards.
    pub fn toggle(&mut self, cell: Cell, floor: Floor) -> bool {
        let cells = self.floors.entry(floor).or_default();
        let present = if cells.remove(&cell) {
            false
        } else {
            cells.insert(cell);
            true
        };
        if cells.is_empty() {
            self.floors.remove(&floor);
        }
        present
    }

    pub(crate) fn insert(&mut self, cell: Cell, floor: Floor) {
        self.floors.entry(floor).or_default().insert(cell);
    }

    /// Removes every hazard on `floor`, leaving other floors alone.
    pub fn clear_floor(&mut self, floor: Floor) -> usize {
        self.floors.remove(&floor).map_or(0, |cells| cells.len())
    }

    pub fn hazards_on(&self, floor: Floor) -> &BTreeSet<Cell> {
        self.floors.get(&floor).unwrap_or(&NO_HAZARDS)
    }

    pub fn contains(&self, cell: Cell, floor: Floor) -> bool {
        self.hazards_on(floor).contains(&cell)
    }

    /// Every hazard, ordered by floor then cell.
    pub fn all(&self) -> impl Iterator<Item = (Floor, Cell)> + '_ {
        self.floors.iter().flat_map(|(floor, cells)| cells.iter().map(move |cell| (*floor, *cell)))
    }

    pub fn len(&self) -> usize {
        self.floors.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }
}
