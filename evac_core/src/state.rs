use log::debug;
use msgs::authority_msg::{HazardEntry, OccupantEntry, Snapshot};
use msgs::observer_msg::ObserverMsg;

use crate::cell::Cell;
use crate::hazards::HazardRegistry;
use crate::occupants::OccupantRegistry;

/// Both registries, as owned by the authority or adopted by an observer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvacState {
    pub occupants: OccupantRegistry,
    pub hazards: HazardRegistry,
}

impl EvacState {
    pub fn new() -> EvacState {
        EvacState::default()
    }

    /// Applies one observer message on behalf of `sender`.
    /// Coordinates are stored as reported, without checking them against any floor plan.
    pub fn apply(&mut self, sender: &str, msg: ObserverMsg) {
        match msg {
            ObserverMsg::Position { x, y, floor, role, intent } => {
                let created = self.occupants.upsert(sender, Cell::new(x, y), floor, role, intent);
                debug!("{sender} {} at ({x},{y}) floor {floor}", if created { "placed" } else { "moved" });
            }
            ObserverMsg::ToggleHazard { x, y, floor } => {
                let present = self.hazards.toggle(Cell::new(x, y), floor);
                debug!("{sender} toggled hazard at ({x},{y}) floor {floor}: present={present}");
            }
            ObserverMsg::ClearHazards { floor } => {
                let removed = self.hazards.clear_floor(floor);
                debug!("{sender} cleared {removed} hazards on floor {floor}");
            }
            ObserverMsg::Withdraw => {
                self.occupants.remove(sender);
                debug!("{sender} withdrew");
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            occupants: self
                .occupants
                .all()
                .map(|o| OccupantEntry {
                    id: o.id.clone(),
                    x: o.cell.x,
                    y: o.cell.y,
                    floor: o.floor,
                    role: o.role,
                    intent: o.intent,
                })
                .collect(),
            hazards: self
                .hazards
                .all()
                .map(|(floor, cell)| HazardEntry { x: cell.x, y: cell.y, floor })
                .collect(),
        }
    }

    /// Rebuilds both registries from a snapshot, replacing whatever came before.
    pub fn from_snapshot(snapshot: &Snapshot) -> EvacState {
        let mut state = EvacState::new();
        for o in &snapshot.occupants {
            state.occupants.upsert(&o.id, Cell::new(o.x, o.y), o.floor, o.role, o.intent);
        }
        for h in &snapshot.hazards {
            state.hazards.insert(Cell::new(h.x, h.y), h.floor);
        }
        state
    }
}
