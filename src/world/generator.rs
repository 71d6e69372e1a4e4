//! Randomised growing-tree generator (Prim flavour).
//!
//! The generator is incremental: every [`Generator::step`] carves exactly one
//! cell into the maze so the map can animate the growth.  Randomness is
//! injected by the caller, any [`rand::Rng`] will do.
//!
//! ```text
//! untouched ──push──► frontier ──pick at random──► visited (+1 passage)
//! ```
//!
//! Because each newly visited cell opens exactly one wall towards the
//! already-visited region, the passages form a spanning tree: `w·h − 1`
//! passages, connected, no cycles.

use log::debug;
use rand::Rng;
use smallvec::SmallVec;

use super::maze::{Cell, Dir, Maze};

/// Per-cell generation marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    Untouched,
    /// Queued in the frontier (at most once).
    Frontier,
    Visited,
}

/// Outcome of one generation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenStep {
    /// `cell` joined the maze through the wall on its `towards` side.
    Carved { cell: Cell, towards: Dir },
    Finished,
}

#[derive(Clone, Debug)]
pub struct Generator {
    width: usize,
    marks: Vec<Mark>,
    frontier: Vec<Cell>,
}

impl Generator {
    /// Wall up `maze`, visit one random cell and seed the frontier with its
    /// neighbours.
    pub fn start<R: Rng + ?Sized>(maze: &mut Maze, rng: &mut R) -> Self {
        maze.reset();

        let mut g = Self {
            width: maze.width(),
            marks: vec![Mark::Untouched; maze.cell_count()],
            frontier: Vec::with_capacity(maze.cell_count()),
        };

        let seed = Cell::new(
            rng.gen_range(0..maze.width()),
            rng.gen_range(0..maze.height()),
        );
        debug!("maze generation seeded at ({}, {})", seed.x, seed.y);
        g.visit(maze, seed);
        g
    }

    /// Run a fresh generation to completion.
    pub fn generate<R: Rng + ?Sized>(maze: &mut Maze, rng: &mut R) {
        let mut g = Self::start(maze, rng);
        while g.step(maze, rng) != GenStep::Finished {}
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.frontier.is_empty()
    }

    #[inline]
    pub fn mark(&self, cell: Cell) -> Mark {
        self.marks[cell.y * self.width + cell.x]
    }

    #[inline]
    pub fn frontier(&self) -> &[Cell] {
        &self.frontier
    }

    /// Carve one frontier cell into the maze.
    pub fn step<R: Rng + ?Sized>(&mut self, maze: &mut Maze, rng: &mut R) -> GenStep {
        if self.frontier.is_empty() {
            return GenStep::Finished;
        }

        // Any frontier entry, not the newest one: this is what gives the
        // short, bushy dead ends of Prim-style mazes.
        let n = rng.gen_range(0..self.frontier.len());
        let cell = self.frontier.swap_remove(n);
        self.marks[maze.index(cell)] = Mark::Visited;

        let visited: SmallVec<[Dir; 4]> = Dir::ALL
            .into_iter()
            .filter(|&d| {
                maze.neighbour(cell, d)
                    .is_some_and(|nb| self.marks[maze.index(nb)] == Mark::Visited)
            })
            .collect();
        // A frontier cell always touches the visited region.
        debug_assert!(!visited.is_empty());
        let towards = visited[rng.gen_range(0..visited.len())];
        maze.crunch(cell, towards);

        self.push_neighbours(maze, cell);
        if self.frontier.is_empty() {
            debug!("maze generation finished: {} passages", maze.passage_count());
        }
        GenStep::Carved { cell, towards }
    }

    fn visit(&mut self, maze: &Maze, cell: Cell) {
        self.marks[maze.index(cell)] = Mark::Visited;
        self.push_neighbours(maze, cell);
    }

    fn push_neighbours(&mut self, maze: &Maze, cell: Cell) {
        for dir in [Dir::East, Dir::West, Dir::South, Dir::North] {
            if let Some(nb) = maze.neighbour(cell, dir) {
                let mark = &mut self.marks[maze.index(nb)];
                if *mark == Mark::Untouched {
                    *mark = Mark::Frontier;
                    self.frontier.push(nb);
                }
            }
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::VecDeque;

    /// Cells reachable from (0, 0) through passages.
    fn reachable(maze: &Maze) -> usize {
        let mut seen = vec![false; maze.cell_count()];
        let mut queue = VecDeque::from([Cell::new(0, 0)]);
        seen[0] = true;
        let mut count = 0;
        while let Some(c) = queue.pop_front() {
            count += 1;
            for d in Dir::ALL {
                if maze.is_open(c, d) {
                    let nb = maze.neighbour(c, d).unwrap();
                    if !seen[maze.index(nb)] {
                        seen[maze.index(nb)] = true;
                        queue.push_back(nb);
                    }
                }
            }
        }
        count
    }

    #[test]
    fn default_size_is_a_spanning_tree() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut maze = Maze::new(15, 12).unwrap();
        Generator::generate(&mut maze, &mut rng);
        assert_eq!(maze.passage_count(), 15 * 12 - 1);
        assert_eq!(reachable(&maze), 15 * 12);
    }

    #[test]
    fn one_step_per_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut maze = Maze::new(6, 4).unwrap();
        let mut g = Generator::start(&mut maze, &mut rng);
        let mut carved = 0;
        while let GenStep::Carved { cell, .. } = g.step(&mut maze, &mut rng) {
            assert_eq!(g.mark(cell), Mark::Visited);
            carved += 1;
        }
        assert_eq!(carved, 6 * 4 - 1);
        assert!(g.is_finished());
        assert_eq!(g.step(&mut maze, &mut rng), GenStep::Finished);
    }

    #[test]
    fn frontier_never_holds_duplicates() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut maze = Maze::new(8, 8).unwrap();
        let mut g = Generator::start(&mut maze, &mut rng);
        loop {
            let mut f = g.frontier().to_vec();
            let len = f.len();
            f.sort();
            f.dedup();
            assert_eq!(f.len(), len);
            assert!(f.iter().all(|&c| g.mark(c) == Mark::Frontier));
            if g.step(&mut maze, &mut rng) == GenStep::Finished {
                break;
            }
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let build = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut maze = Maze::new(10, 7).unwrap();
            Generator::generate(&mut maze, &mut rng);
            maze.passages().collect::<Vec<_>>()
        };
        assert_eq!(build(42), build(42));
        assert_ne!(build(42), build(43));
    }

    #[test]
    fn single_cell_is_already_finished() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut maze = Maze::new(1, 1).unwrap();
        let mut g = Generator::start(&mut maze, &mut rng);
        assert!(g.is_finished());
        assert_eq!(g.step(&mut maze, &mut rng), GenStep::Finished);
        assert_eq!(maze.passage_count(), 0);
    }

    #[test]
    fn start_rewalls_a_used_maze() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut maze = Maze::new(4, 4).unwrap();
        Generator::generate(&mut maze, &mut rng);
        let g = Generator::start(&mut maze, &mut rng);
        assert_eq!(maze.passage_count(), 0);
        assert!(!g.frontier().is_empty());
    }
}
