mod generator;
mod maze;

pub use generator::{GenStep, Generator, Mark};
pub use maze::{Cell, Dir, Maze, MazeError, Segment, Wall};
