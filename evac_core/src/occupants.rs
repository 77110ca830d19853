use std::collections::BTreeMap;

use crate::cell::Cell;
use crate::{Floor, Intent, OccupantId, Role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupant {
    pub id: OccupantId,
    pub cell: Cell,
    pub floor: Floor,
    pub role: Role,
    pub intent: Intent,
}

impl Occupant {
    /// Only responders may target hazards; civilians always evacuate.
    pub fn seeks_hazards(&self) -> bool {
        self.role == Role::Responder && self.intent == Intent::SeekHazard
    }

    pub fn avoids_hazards(&self) -> bool {
        !self.seeks_hazards()
    }
}

/// Last write wins per identity; no versioning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupantRegistry {
    occupants: BTreeMap<OccupantId, Occupant>,
}

impl OccupantRegistry {
    pub fn new() -> OccupantRegistry {
        OccupantRegistry::default()
    }

    /// Creates or overwrites an occupant. Returns true if it was new.
    pub fn upsert(&mut self, id: &str, cell: Cell, floor: Floor, role: Role, intent: Intent) -> bool {
        let occupant = Occupant { id: id.to_string(), cell, floor, role, intent };
        self.occupants.insert(occupant.id.clone(), occupant).is_none()
    }

    pub fn remove(&mut self, id: &str) -> Option<Occupant> {
        self.occupants.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&Occupant> {
        self.occupants.get(id)
    }

    /// Ordered by identity.
    pub fn all(&self) -> impl Iterator<Item = &Occupant> {
        self.occupants.values()
    }

    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }
}
