//! Hazard-aware evacuation routing and the registries it reads from.
//!
//! The authority owns an [`EvacState`] and mutates it one message at a time.
//! Every observer (the authority's own display included) adopts full
//! snapshots into an [`ObserverView`], which re-runs the [`PathPlanner`] for
//! each occupant it knows about.

pub mod cell;
pub mod error;
pub mod geometry;
pub mod hazards;
pub mod occupants;
pub mod planner;
pub mod state;
pub mod view;

pub use cell::Cell;
pub use error::GeometryError;
pub use geometry::{FloorGeometry, FloorPlans, GridFloor};
pub use hazards::HazardRegistry;
pub use occupants::{Occupant, OccupantRegistry};
pub use planner::{HazardCost, PathPlanner, Route};
pub use state::EvacState;
pub use view::ObserverView;

pub use msgs::{role::{Intent, Role}, Floor, OccupantId, DEFAULT_FLOOR};
