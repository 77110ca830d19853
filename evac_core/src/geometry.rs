//! Floor geometry: the read-only walls and exits the planner queries.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use log::{debug, info};

use crate::cell::Cell;
use crate::error::{GeometryError, Result};
use crate::Floor;

const WALL_CHAR: char = '#';
const EXIT_CHAR: char = 'E';
const PLAN_PREFIX: &str = "floor_";
const PLAN_SUFFIX: &str = ".txt";

/// What the planner needs to know about one floor.
pub trait FloorGeometry {
    fn is_wall(&self, cell: Cell) -> bool;

    /// `(width, height)`; valid cells are `0..width` by `0..height`.
    fn bounds(&self) -> (i32, i32);

    /// Default goal set.
    fn exits(&self) -> &BTreeSet<Cell>;

    fn contains(&self, cell: Cell) -> bool {
        let (width, height) = self.bounds();
        cell.x >= 0 && cell.y >= 0 && cell.x < width && cell.y < height
    }
}

/// A rectangular floor with explicit wall and exit cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridFloor {
    width: i32,
    height: i32,
    walls: BTreeSet<Cell>,
    exits: BTreeSet<Cell>,
}

impl GridFloor {
    pub fn new(
        width: i32,
        height: i32,
        walls: impl IntoIterator<Item = Cell>,
        exits: impl IntoIterator<Item = Cell>,
    ) -> Result<GridFloor> {
        let walls: BTreeSet<Cell> = walls.into_iter().collect();
        let exits: BTreeSet<Cell> = exits.into_iter().collect();
        if let Some(cell) = walls.intersection(&exits).next() {
            return Err(GeometryError::WallExitOverlap { x: cell.x, y: cell.y });
        }
        Ok(GridFloor { width: width.max(0), height: height.max(0), walls, exits })
    }

    /// Walls along the outer border only, with the given exits cut into it.
    pub fn bordered(width: i32, height: i32, exits: impl IntoIterator<Item = Cell>) -> GridFloor {
        let exits: BTreeSet<Cell> = exits.into_iter().collect();
        let mut walls = BTreeSet::new();
        for x in 0..width {
            walls.insert(Cell::new(x, 0));
            walls.insert(Cell::new(x, height - 1));
        }
        for y in 0..height {
            walls.insert(Cell::new(0, y));
            walls.insert(Cell::new(width - 1, y));
        }
        walls.retain(|cell| !exits.contains(cell));
        GridFloor { width: width.max(0), height: height.max(0), walls, exits }
    }

    /// Parses a text plan: one row per line, `#` wall, `E` exit, anything else open.
    /// Short rows are padded with open cells up to the longest row.
    pub fn parse(text: &str) -> Result<GridFloor> {
        let rows: Vec<&str> = text.lines().map(|line| line.trim_end_matches('\r')).collect();
        if rows.is_empty() {
            return Err(GeometryError::Empty);
        }

        let mut walls = Vec::new();
        let mut exits = Vec::new();
        let mut width = 0;
        for (y, row) in rows.iter().enumerate() {
            width = width.max(row.chars().count());
            for (x, c) in row.chars().enumerate() {
                let cell = Cell::new(x as i32, y as i32);
                match c {
                    WALL_CHAR => walls.push(cell),
                    EXIT_CHAR => exits.push(cell),
                    _ => {}
                }
            }
        }
        GridFloor::new(width as i32, rows.len() as i32, walls, exits)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<GridFloor> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| GeometryError::Io { path: path.display().to_string(), source })?;
        GridFloor::parse(&text)
    }

    pub fn walls(&self) -> &BTreeSet<Cell> {
        &self.walls
    }
}

impl FloorGeometry for GridFloor {
    fn is_wall(&self, cell: Cell) -> bool {
        self.walls.contains(&cell)
    }

    fn bounds(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn exits(&self) -> &BTreeSet<Cell> {
        &self.exits
    }
}

/// Geometry for every floor of a building, replaced wholesale when it changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FloorPlans {
    floors: BTreeMap<Floor, GridFloor>,
}

impl FloorPlans {
    pub fn new() -> FloorPlans {
        FloorPlans::default()
    }

    /// A single 10x10 floor with border walls and one exit at `(5,0)`.
    pub fn builtin() -> FloorPlans {
        let mut plans = FloorPlans::new();
        plans.insert(crate::DEFAULT_FLOOR, GridFloor::bordered(10, 10, [Cell::new(5, 0)]));
        plans
    }

    /// Loads every `floor_<n>.txt` in `dir`. Other files are ignored.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<FloorPlans> {
        let dir = dir.as_ref();
        let io_error = |source| GeometryError::Io { path: dir.display().to_string(), source };

        let mut plans = FloorPlans::new();
        for entry in std::fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else { continue };
            let Some(floor_str) = name.strip_prefix(PLAN_PREFIX).and_then(|rest| rest.strip_suffix(PLAN_SUFFIX)) else {
                debug!("skipping {name}: not a floor plan");
                continue;
            };
            let floor: Floor = floor_str.parse().map_err(|_| GeometryError::FloorName(name.to_string()))?;
            let plan = GridFloor::load(&path)?;
            info!("loaded floor {floor} from {name}: {}x{}, {} exits", plan.width, plan.height, plan.exits.len());
            plans.insert(floor, plan);
        }
        Ok(plans)
    }

    pub fn insert(&mut self, floor: Floor, plan: GridFloor) -> Option<GridFloor> {
        self.floors.insert(floor, plan)
    }

    pub fn get(&self, floor: Floor) -> Option<&GridFloor> {
        self.floors.get(&floor)
    }

    pub fn floors(&self) -> impl Iterator<Item = Floor> + '_ {
        self.floors.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }
}
