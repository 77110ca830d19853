use std::collections::BTreeSet;

use evac_core::{Cell, EvacState, FloorPlans, GridFloor, Intent, Occupant, ObserverView, PathPlanner, Role};
use msgs::authority_msg::AuthorityMsg;
use msgs::observer_msg::ObserverMsg;

fn building() -> GridFloor {
    GridFloor::bordered(10, 10, [Cell::new(5, 0)])
}

fn occupant(x: i32, y: i32, role: Role, intent: Intent) -> Occupant {
    Occupant { id: "o".into(), cell: Cell::new(x, y), floor: 1, role, intent }
}

fn hazards(cells: &[(i32, i32)]) -> BTreeSet<Cell> {
    cells.iter().map(|&c| Cell::from(c)).collect()
}

#[test]
fn civilian_walks_straight_to_open_exit() {
    env_logger::try_init().ok();
    let floor = building();
    let none = BTreeSet::new();
    let route = PathPlanner::new(&floor, &none).plan(&occupant(5, 5, Role::Civilian, Intent::Evacuate));

    let expected: Vec<Cell> = (0..=5).rev().map(|y| Cell::new(5, y)).collect();
    assert_eq!(route.cells, expected);
    assert_eq!(route.cost, 5);
}

#[test]
fn civilian_detours_around_hazard() {
    let floor = building();
    let hazard = hazards(&[(5, 3)]);
    let planner = PathPlanner::new(&floor, &hazard);
    let civilian = occupant(5, 8, Role::Civilian, Intent::Evacuate);
    let route = planner.plan(&civilian);

    assert_eq!(route.start(), Some(Cell::new(5, 8)));
    assert_eq!(route.goal(), Some(Cell::new(5, 0)));
    assert!(route.cost > 8);
    assert!(!route.cells.contains(&Cell::new(5, 3)));
    assert!(!route.cells.contains(&Cell::new(5, 4)));
    assert_eq!(planner.route_cost(&civilian, &route.cells), Some(route.cost));

    let straight: Vec<Cell> = (0..=8).rev().map(|y| Cell::new(5, y)).collect();
    assert!(planner.route_cost(&civilian, &straight).unwrap() > route.cost);
}

#[test]
fn seeking_responder_ignores_surcharges() {
    let floor = building();
    let targets = hazards(&[(3, 3), (2, 1)]);
    let planner = PathPlanner::new(&floor, &targets);
    let route = planner.plan(&occupant(8, 8, Role::Responder, Intent::SeekHazard));

    assert_eq!(route.goal(), Some(Cell::new(3, 3)));
    assert_eq!(route.cost, 10);
    assert_eq!(route.len(), 11);
}

#[test]
fn evacuating_responder_avoids_like_civilian() {
    let floor = building();
    let hazard = hazards(&[(5, 3)]);
    let planner = PathPlanner::new(&floor, &hazard);
    let responder = planner.plan(&occupant(5, 8, Role::Responder, Intent::Evacuate));
    let civilian = planner.plan(&occupant(5, 8, Role::Civilian, Intent::Evacuate));
    assert_eq!(responder, civilian);
}

#[test]
fn seeking_responder_without_hazards_evacuates() {
    let floor = building();
    let none = BTreeSet::new();
    let planner = PathPlanner::new(&floor, &none);
    let seeking = planner.plan(&occupant(2, 7, Role::Responder, Intent::SeekHazard));
    let evacuating = planner.plan(&occupant(2, 7, Role::Responder, Intent::Evacuate));
    assert_eq!(seeking, evacuating);
    assert_eq!(seeking.goal(), Some(Cell::new(5, 0)));
}

#[test]
fn hazards_on_other_floors_do_not_count() {
    let mut state = EvacState::new();
    state.apply("r", ObserverMsg::Position { x: 2, y: 7, floor: 1, role: Role::Responder, intent: Intent::SeekHazard });
    state.apply("r", ObserverMsg::ToggleHazard { x: 4, y: 4, floor: 2 });

    let mut view = ObserverView::new(FloorPlans::builtin());
    view.adopt(&AuthorityMsg::Snapshot(state.snapshot()));
    assert_eq!(view.route("r").unwrap().goal(), Some(Cell::new(5, 0)));
}

#[test]
fn double_toggle_and_floor_clear() {
    let mut state = EvacState::new();
    state.apply("a", ObserverMsg::ToggleHazard { x: 2, y: 2, floor: 1 });
    state.apply("a", ObserverMsg::ToggleHazard { x: 2, y: 2, floor: 1 });
    assert!(state.hazards.hazards_on(1).is_empty());

    state.apply("a", ObserverMsg::ToggleHazard { x: 2, y: 2, floor: 1 });
    state.apply("a", ObserverMsg::ToggleHazard { x: 6, y: 3, floor: 2 });
    state.apply("a", ObserverMsg::ToggleHazard { x: 7, y: 7, floor: 2 });
    state.apply("a", ObserverMsg::ClearHazards { floor: 2 });
    assert_eq!(state.hazards.all().collect::<Vec<_>>(), vec![(1, Cell::new(2, 2))]);
}

#[test]
fn independent_observers_agree_on_routes() {
    let mut state = EvacState::new();
    state.apply("a", ObserverMsg::Position { x: 5, y: 8, floor: 1, role: Role::Civilian, intent: Intent::Evacuate });
    state.apply("b", ObserverMsg::Position { x: 8, y: 8, floor: 1, role: Role::Responder, intent: Intent::SeekHazard });
    state.apply("a", ObserverMsg::ToggleHazard { x: 5, y: 3, floor: 1 });
    state.apply("b", ObserverMsg::ToggleHazard { x: 3, y: 6, floor: 1 });

    // One view gets the welcome, the other a re-serialized update
    let json = AuthorityMsg::Snapshot(state.snapshot()).encode().unwrap();
    let mut first = ObserverView::new(FloorPlans::builtin());
    let mut second = ObserverView::new(FloorPlans::builtin());
    first.adopt(&AuthorityMsg::Welcome { identity: "a".into(), snapshot: state.snapshot() });
    second.adopt(&AuthorityMsg::decode(&json).unwrap());

    assert_eq!(first.routes(), second.routes());
    assert_eq!(first.own_route(), first.route("a"));
}

#[test]
fn interior_walls_force_long_way_round() {
    let plan = GridFloor::parse(
        "#####E####\n\
         #........#\n\
         #.######.#\n\
         #.#....#.#\n\
         #.#.##.#.#\n\
         #...#....#\n\
         ##########",
    )
    .unwrap();
    let none = BTreeSet::new();
    let route = PathPlanner::new(&plan, &none).plan(&occupant(5, 3, Role::Civilian, Intent::Evacuate));
    assert_eq!(route.start(), Some(Cell::new(5, 3)));
    assert_eq!(route.goal(), Some(Cell::new(5, 0)));
    assert!(route.cells.windows(2).all(|w| w[0].is_adjacent(w[1])));
    assert!(route.cells.iter().all(|c| !plan.walls().contains(c)));
    assert_eq!(route.cost as usize, route.len() - 1);
}

#[test]
fn hazard_at_extreme_coordinates_is_harmless() {
    let mut state = EvacState::new();
    state.apply("a", ObserverMsg::Position { x: 5, y: 5, floor: 1, role: Role::Civilian, intent: Intent::Evacuate });
    state.apply("a", ObserverMsg::ToggleHazard { x: i32::MIN, y: 0, floor: 1 });
    state.apply("b", ObserverMsg::ToggleHazard { x: i32::MAX, y: i32::MIN, floor: 1 });
    assert_eq!(state.hazards.len(), 2);

    let mut view = ObserverView::new(FloorPlans::builtin());
    view.adopt(&AuthorityMsg::Snapshot(state.snapshot()));

    let route = view.route("a").unwrap();
    assert_eq!(route.goal(), Some(Cell::new(5, 0)));
    assert_eq!(route.cost, 5);
}
