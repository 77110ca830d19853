use std::collections::BTreeMap;

use log::{debug, warn};
use msgs::authority_msg::AuthorityMsg;

use crate::geometry::FloorPlans;
use crate::planner::{HazardCost, PathPlanner, Route};
use crate::state::EvacState;
use crate::{Floor, OccupantId};

/// One observer's picture of the building: the last snapshot it adopted and
/// the routes it derived from it. Routes are never received, only recomputed.
pub struct ObserverView {
    plans: FloorPlans,
    hazard_cost: HazardCost,
    identity: Option<OccupantId>,
    state: EvacState,
    routes: BTreeMap<OccupantId, Route>,
}

impl ObserverView {
    pub fn new(plans: FloorPlans) -> ObserverView {
        ObserverView {
            plans,
            hazard_cost: HazardCost::default(),
            identity: None,
            state: EvacState::new(),
            routes: BTreeMap::new(),
        }
    }

    pub fn with_hazard_cost(mut self, hazard_cost: HazardCost) -> ObserverView {
        self.hazard_cost = hazard_cost;
        self
    }

    /// Discards the previous view, adopts the snapshot in `msg` and recomputes every route.
    pub fn adopt(&mut self, msg: &AuthorityMsg) {
        if let AuthorityMsg::Welcome { identity, .. } = msg {
            self.identity = Some(identity.clone());
        }
        self.state = EvacState::from_snapshot(msg.snapshot());
        self.recompute();
    }

    /// Swaps in new floor geometry, e.g. after a floor change, and replans.
    pub fn set_plans(&mut self, plans: FloorPlans) {
        self.plans = plans;
        self.recompute();
    }

    fn recompute(&mut self) {
        let mut routes = BTreeMap::new();
        let mut missing_floors: Vec<Floor> = Vec::new();
        for occupant in self.state.occupants.all() {
            let route = match self.plans.get(occupant.floor) {
                Some(plan) => PathPlanner::new(plan, self.state.hazards.hazards_on(occupant.floor))
                    .with_hazard_cost(self.hazard_cost)
                    .plan(occupant),
                None => {
                    if !missing_floors.contains(&occupant.floor) {
                        missing_floors.push(occupant.floor);
                    }
                    Route::unreachable()
                }
            };
            debug!("route for {}: {} cells, cost {}", occupant.id, route.len(), route.cost);
            routes.insert(occupant.id.clone(), route);
        }
        for floor in missing_floors {
            warn!("no floor plan for floor {floor}, its occupants get no route");
        }
        self.routes = routes;
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn state(&self) -> &EvacState {
        &self.state
    }

    pub fn routes(&self) -> &BTreeMap<OccupantId, Route> {
        &self.routes
    }

    pub fn route(&self, id: &str) -> Option<&Route> {
        self.routes.get(id)
    }

    /// The route of the occupant this view was assigned, if it has reported a position.
    pub fn own_route(&self) -> Option<&Route> {
        self.identity.as_deref().and_then(|id| self.routes.get(id))
    }
}

#[cfg(test)]
mod tests {
    use msgs::authority_msg::{HazardEntry, OccupantEntry, Snapshot};
    use msgs::role::{Intent, Role};

    use super::*;
    use crate::cell::Cell;

    fn entry(id: &str, x: i32, y: i32, floor: Floor) -> OccupantEntry {
        OccupantEntry { id: id.into(), x, y, floor, role: Role::Civilian, intent: Intent::Evacuate }
    }

    #[test]
    fn welcome_sets_identity_and_routes() {
        let mut view = ObserverView::new(FloorPlans::builtin());
        view.adopt(&AuthorityMsg::Welcome {
            identity: "me".into(),
            snapshot: Snapshot { occupants: vec![entry("me", 5, 5, 1)], hazards: vec![] },
        });
        assert_eq!(view.identity(), Some("me"));
        let route = view.own_route().unwrap();
        assert_eq!(route.goal(), Some(Cell::new(5, 0)));
        assert_eq!(route.cost, 5);
    }

    #[test]
    fn new_snapshot_replaces_old_view() {
        let mut view = ObserverView::new(FloorPlans::builtin());
        view.adopt(&AuthorityMsg::Snapshot(Snapshot {
            occupants: vec![entry("a", 5, 5, 1), entry("b", 2, 2, 1)],
            hazards: vec![HazardEntry { x: 3, y: 3, floor: 1 }],
        }));
        assert_eq!(view.routes().len(), 2);

        view.adopt(&AuthorityMsg::Snapshot(Snapshot { occupants: vec![entry("b", 2, 2, 1)], hazards: vec![] }));
        assert!(view.route("a").is_none());
        assert!(view.state().hazards.is_empty());
        assert_eq!(view.identity(), None);
    }

    #[test]
    fn occupant_on_unknown_floor_gets_empty_route() {
        let mut view = ObserverView::new(FloorPlans::builtin());
        view.adopt(&AuthorityMsg::Snapshot(Snapshot { occupants: vec![entry("up", 5, 5, 4)], hazards: vec![] }));
        assert!(view.route("up").unwrap().is_empty());
    }
}
