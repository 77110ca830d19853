//! Error types for floor geometry

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("floor plan has no rows")]
    Empty,

    #[error("cell ({x},{y}) is both a wall and an exit")]
    WallExitOverlap { x: i32, y: i32 },

    #[error("could not read floor plan {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("floor plan file {0} does not name a floor number")]
    FloorName(String),
}

pub type Result<T> = std::result::Result<T, GeometryError>;
