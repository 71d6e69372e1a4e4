//! Maze model: a `width × height` grid of cells and the walls between them.
//!
//! ### Wall lattice
//! Walls live on a lattice twice as fine as the cell grid:
//!
//! ```text
//!   cell (x, y)            centre  (2x+1, 2y+1)
//!   north wall of (x, y)   (2x, 2y) ─ (2x+2, 2y)
//!   west  wall of (x, y)   (2x, 2y) ─ (2x, 2y+2)
//! ```
//!
//! Horizontal and vertical walls are stored in two independent arrays.
//! Border walls exist for every cell on the edge and can never be opened.

use glam::{IVec2, ivec2};
use thiserror::Error;

/// One grid position.  `x` grows east, `y` grows south (screen order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// The four grid directions, clockwise from east.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    East,
    South,
    West,
    North,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::East, Dir::South, Dir::West, Dir::North];

    /// Unit step in cell coordinates.
    #[inline]
    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::East => (1, 0),
            Dir::South => (0, 1),
            Dir::West => (-1, 0),
            Dir::North => (0, -1),
        }
    }

    /// Inverse of [`Dir::delta`]; `None` unless the step is a unit step.
    pub fn from_delta(dx: isize, dy: isize) -> Option<Dir> {
        match (dx, dy) {
            (1, 0) => Some(Dir::East),
            (0, 1) => Some(Dir::South),
            (-1, 0) => Some(Dir::West),
            (0, -1) => Some(Dir::North),
            _ => None,
        }
    }
}

/// State of one wall slot.
///
/// `Shown`/`Hidden` are both *present* walls; the distinction only drives the
/// fog of war on the top-down map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wall {
    Open,
    Shown,
    Hidden,
}

impl Wall {
    #[inline]
    pub fn is_present(self) -> bool {
        self != Wall::Open
    }
}

/// One present wall as a lattice segment, ready for projection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub a: IVec2,
    pub b: IVec2,
    pub wall: Wall,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MazeError {
    /// Both dimensions must be at least one cell.
    #[error("maze needs at least one cell, got {width}x{height}")]
    Empty { width: usize, height: usize },
}

#[derive(Clone, Debug)]
pub struct Maze {
    width: usize,
    height: usize,
    /// `(height + 1) × width`: the wall on the north edge of `(x, y)`.
    horizontal: Vec<Wall>,
    /// `height × (width + 1)`: the wall on the west edge of `(x, y)`.
    vertical: Vec<Wall>,
}

impl Maze {
    /// A fully walled grid.
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::Empty { width, height });
        }
        Ok(Self {
            width,
            height,
            horizontal: vec![Wall::Shown; (height + 1) * width],
            vertical: vec![Wall::Shown; height * (width + 1)],
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Put every wall back (all shown), as before generation.
    pub fn reset(&mut self) {
        self.horizontal.fill(Wall::Shown);
        self.vertical.fill(Wall::Shown);
    }

    #[inline]
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// In-bounds neighbour of `cell` in direction `dir`.
    pub fn neighbour(&self, cell: Cell, dir: Dir) -> Option<Cell> {
        let (dx, dy) = dir.delta();
        let x = cell.x as isize + dx;
        let y = cell.y as isize + dy;
        self.contains(x, y).then(|| Cell::new(x as usize, y as usize))
    }

    /// Row-major index of `cell`, used by per-cell side tables.
    #[inline]
    pub fn index(&self, cell: Cell) -> usize {
        cell.y * self.width + cell.x
    }

    /*----------------------------- walls --------------------------------*/

    fn slot(&self, cell: Cell, dir: Dir) -> (bool, usize) {
        debug_assert!(cell.x < self.width && cell.y < self.height);
        match dir {
            Dir::North => (true, cell.y * self.width + cell.x),
            Dir::South => (true, (cell.y + 1) * self.width + cell.x),
            Dir::West => (false, cell.y * (self.width + 1) + cell.x),
            Dir::East => (false, cell.y * (self.width + 1) + cell.x + 1),
        }
    }

    fn slot_mut(&mut self, cell: Cell, dir: Dir) -> &mut Wall {
        match self.slot(cell, dir) {
            (true, i) => &mut self.horizontal[i],
            (false, i) => &mut self.vertical[i],
        }
    }

    /// State of the wall on side `dir` of `cell`.
    pub fn wall(&self, cell: Cell, dir: Dir) -> Wall {
        match self.slot(cell, dir) {
            (true, i) => self.horizontal[i],
            (false, i) => self.vertical[i],
        }
    }

    /// True if the pawn can step from `cell` towards `dir`.
    pub fn is_open(&self, cell: Cell, dir: Dir) -> bool {
        self.neighbour(cell, dir).is_some() && !self.wall(cell, dir).is_present()
    }

    /// Remove the wall between `cell` and its neighbour towards `dir`.
    ///
    /// Returns `false` (and changes nothing) for border walls.
    pub fn crunch(&mut self, cell: Cell, dir: Dir) -> bool {
        if self.neighbour(cell, dir).is_none() {
            return false;
        }
        *self.slot_mut(cell, dir) = Wall::Open;
        true
    }

    /// Number of absent walls, i.e. passages between cells.
    pub fn passage_count(&self) -> usize {
        self.horizontal
            .iter()
            .chain(&self.vertical)
            .filter(|w| !w.is_present())
            .count()
    }

    /// Every passage as a pair of adjacent cells (each reported once).
    pub fn passages(&self) -> impl Iterator<Item = (Cell, Cell)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).flat_map(move |x| {
                let cell = Cell::new(x, y);
                [Dir::East, Dir::South]
                    .into_iter()
                    .filter(move |&d| self.is_open(cell, d))
                    .filter_map(move |d| self.neighbour(cell, d).map(|n| (cell, n)))
            })
        })
    }

    /*--------------------------- fog of war -----------------------------*/

    fn swap_walls(&mut self, from: Wall, to: Wall) {
        for w in self.horizontal.iter_mut().chain(self.vertical.iter_mut()) {
            if *w == from {
                *w = to;
            }
        }
    }

    /// Hide every present wall (start of play).
    pub fn hide_all(&mut self) {
        self.swap_walls(Wall::Shown, Wall::Hidden);
    }

    /// Show every present wall.
    pub fn reveal_all(&mut self) {
        self.swap_walls(Wall::Hidden, Wall::Shown);
    }

    /// Show the four walls around `cell`.
    pub fn show_around(&mut self, cell: Cell) {
        for dir in Dir::ALL {
            let w = self.slot_mut(cell, dir);
            if *w == Wall::Hidden {
                *w = Wall::Shown;
            }
        }
    }

    /*--------------------------- geometry -------------------------------*/

    /// Every present wall as a lattice segment: horizontal walls row by row,
    /// then vertical walls.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        let w = self.width;
        let horizontal = self.horizontal.iter().enumerate().map(move |(i, &wall)| {
            let (x, y) = ((i % w) as i32, (i / w) as i32);
            Segment {
                a: ivec2(2 * x, 2 * y),
                b: ivec2(2 * x + 2, 2 * y),
                wall,
            }
        });
        let vertical = self.vertical.iter().enumerate().map(move |(i, &wall)| {
            let (x, y) = ((i % (w + 1)) as i32, (i / (w + 1)) as i32);
            Segment {
                a: ivec2(2 * x, 2 * y),
                b: ivec2(2 * x, 2 * y + 2),
                wall,
            }
        });
        horizontal
            .chain(vertical)
            .filter(|s| s.wall.is_present())
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
