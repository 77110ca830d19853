use std::fmt;

/// A grid coordinate. The floor it lives on is carried alongside, never inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

/// Up, down, left, right. Planner tie-breaking depends on this order.
const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

impl Cell {
    pub const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    pub fn neighbors(self) -> impl Iterator<Item = Cell> {
        NEIGHBOR_OFFSETS.into_iter().map(move |(dx, dy)| Cell::new(self.x + dx, self.y + dy))
    }

    // Widened: hazards may sit anywhere in i32, far outside any floor.
    fn delta(self, other: Cell) -> (i64, i64) {
        (self.x as i64 - other.x as i64, self.y as i64 - other.y as i64)
    }

    pub fn distance(self, other: Cell) -> f64 {
        let (dx, dy) = self.delta(other);
        let (dx, dy) = (dx as f64, dy as f64);
        (dx * dx + dy * dy).sqrt()
    }

    pub fn manhattan(self, other: Cell) -> u64 {
        let (dx, dy) = self.delta(other);
        dx.unsigned_abs() + dy.unsigned_abs()
    }

    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Cell {
        Cell::new(x, y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
