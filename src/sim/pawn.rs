use crate::world::{Cell, Dir, Maze};

use super::moves::Pose;

/// Discrete heading.  Angles are in degrees, 0 = east (+x), 90 = south (+y).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    East,
    South,
    West,
    North,
}

impl Facing {
    #[inline]
    pub fn degrees(self) -> i32 {
        match self {
            Facing::East => 0,
            Facing::South => 90,
            Facing::West => 180,
            Facing::North => 270,
        }
    }

    /// Snap any multiple of 90 (including negatives and ≥ 360) to a heading.
    pub fn from_degrees(deg: i32) -> Facing {
        match deg.rem_euclid(360) {
            90 => Facing::South,
            180 => Facing::West,
            270 => Facing::North,
            _ => Facing::East,
        }
    }

    /// Cell step for moving `dir` (+1 ahead, −1 back) along this heading.
    pub fn forward_delta(self, dir: isize) -> (isize, isize) {
        match self {
            Facing::East => (dir, 0),
            Facing::South => (0, dir),
            Facing::West => (-dir, 0),
            Facing::North => (0, -dir),
        }
    }

    /// Cell step for strafing `dir` (+1 right, −1 left) relative to this heading.
    pub fn lateral_delta(self, dir: isize) -> (isize, isize) {
        match self {
            Facing::East => (0, dir),
            Facing::South => (-dir, 0),
            Facing::West => (0, -dir),
            Facing::North => (dir, 0),
        }
    }
}

/// The player's discrete state plus the exit it is looking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pawn {
    pub cell: Cell,
    pub facing: Facing,
    pub exit: Cell,
}

impl Pawn {
    /// Top-left corner facing east; exit in the opposite corner.
    pub fn new(maze: &Maze) -> Self {
        Self {
            cell: Cell::new(0, 0),
            facing: Facing::East,
            exit: Cell::new(maze.width() - 1, maze.height() - 1),
        }
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        Pose::new(
            self.cell.x as f64,
            self.cell.y as f64,
            self.facing.degrees() as f64,
        )
    }

    #[inline]
    pub fn on_exit(&self) -> bool {
        self.cell == self.exit
    }

    /// Destination of a unit step, if the maze lets the pawn through.
    pub fn target(&self, maze: &Maze, (dx, dy): (isize, isize)) -> Option<Cell> {
        let dir = Dir::from_delta(dx, dy)?;
        maze.is_open(self.cell, dir)
            .then(|| maze.neighbour(self.cell, dir))
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_round_trips_through_degrees() {
        for f in [Facing::East, Facing::South, Facing::West, Facing::North] {
            assert_eq!(Facing::from_degrees(f.degrees()), f);
            assert_eq!(Facing::from_degrees(f.degrees() + 360), f);
        }
        assert_eq!(Facing::from_degrees(-90), Facing::North);
        assert_eq!(Facing::from_degrees(360), Facing::East);
    }

    #[test]
    fn strafe_right_is_clockwise_of_forward() {
        // y grows downwards, so clockwise is (x, y) → (−y, x)
        for f in [Facing::East, Facing::South, Facing::West, Facing::North] {
            let (fx, fy) = f.forward_delta(1);
            assert_eq!(f.lateral_delta(1), (-fy, fx));
            assert_eq!(f.forward_delta(-1), (-fx, -fy));
        }
    }

    #[test]
    fn target_needs_an_open_wall() {
        let mut maze = Maze::new(2, 2).unwrap();
        let pawn = Pawn::new(&maze);
        assert_eq!(pawn.exit, Cell::new(1, 1));
        assert_eq!(pawn.target(&maze, (1, 0)), None);
        maze.crunch(Cell::new(0, 0), Dir::East);
        assert_eq!(pawn.target(&maze, (1, 0)), Some(Cell::new(1, 0)));
        assert_eq!(pawn.target(&maze, (-1, 0)), None);
    }
}
