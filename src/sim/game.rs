//! Maze + pawn state machine.
//!
//! ```text
//!  Generating ──done──► Idle ◄──────────────┐
//!                        │ command           │ move finished
//!                        ▼                   │ (re-issue held command)
//!                    Animating ──tick──► ────┘
//!                        │ forward move lands on the exit
//!                        ▼
//!                      Solved
//! ```
//!
//! Commands are only accepted while `Idle`; everything else is ignored.
//! Illegal steps never fail, they turn into a bump animation.

use log::{debug, info, trace};
use rand::Rng;

use crate::{
    engine::{FirstPerson, Projection},
    renderer::DrawCall,
    world::{GenStep, Generator, Maze, MazeError},
};

use super::{
    command::Command,
    moves::{Advance, Move, MoveKind, Pose},
    pawn::Pawn,
};

#[derive(Clone, Debug)]
pub enum Phase {
    Generating(Generator),
    Idle,
    Animating(Move),
    Solved,
}

#[derive(Clone, Debug)]
pub struct Game {
    maze: Maze,
    pawn: Pawn,
    phase: Phase,
    held: Option<Command>,
}

impl Game {
    /// Fresh `width × height` maze with generation under way.
    pub fn new<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Self, MazeError> {
        let mut maze = Maze::new(width, height)?;
        let generator = Generator::start(&mut maze, rng);
        let pawn = Pawn::new(&maze);
        Ok(Self {
            maze,
            pawn,
            phase: Phase::Generating(generator),
            held: None,
        })
    }

    /// Play on an already carved maze, skipping generation.
    pub fn with_maze(maze: Maze) -> Self {
        let mut game = Self {
            pawn: Pawn::new(&maze),
            maze,
            phase: Phase::Idle,
            held: None,
        };
        game.begin_play();
        game
    }

    /// Throw away the current maze and start generating a new one.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        debug!("new maze requested");
        self.phase = Phase::Generating(Generator::start(&mut self.maze, rng));
        self.pawn = Pawn::new(&self.maze);
    }

    /*----------------------------- queries ------------------------------*/

    #[inline]
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    #[inline]
    pub fn pawn(&self) -> &Pawn {
        &self.pawn
    }

    #[inline]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn generator(&self) -> Option<&Generator> {
        match &self.phase {
            Phase::Generating(g) => Some(g),
            _ => None,
        }
    }

    #[inline]
    pub fn is_generating(&self) -> bool {
        matches!(self.phase, Phase::Generating(_))
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating(_))
    }

    #[inline]
    pub fn is_solved(&self) -> bool {
        matches!(self.phase, Phase::Solved)
    }

    /// Pose to draw: the interpolated one while animating.
    pub fn pose(&self) -> Pose {
        match &self.phase {
            Phase::Animating(m) => m.pose(),
            _ => self.pawn.pose(),
        }
    }

    /*---------------------------- generation ----------------------------*/

    /// Carve one more cell.  Returns `true` once the maze is complete (and
    /// on every call after that).
    pub fn step_generation<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let Phase::Generating(g) = &mut self.phase else {
            return true;
        };
        match g.step(&mut self.maze, rng) {
            GenStep::Carved { .. } if !g.is_finished() => false,
            _ => {
                self.begin_play();
                true
            }
        }
    }

    fn begin_play(&mut self) {
        self.maze.hide_all();
        self.pawn = Pawn::new(&self.maze);
        self.maze.show_around(self.pawn.cell);
        self.phase = if self.pawn.on_exit() {
            self.maze.reveal_all();
            Phase::Solved
        } else {
            Phase::Idle
        };
    }

    /*------------------------------- play -------------------------------*/

    /// Command to re-issue automatically whenever a move finishes.
    #[inline]
    pub fn set_held(&mut self, held: Option<Command>) {
        self.held = held;
    }

    /// Start a move if idle.  Returns whether the command was accepted.
    pub fn issue_command(&mut self, cmd: Command) -> bool {
        if !self.is_idle() {
            return false;
        }
        let mv = self.plan(cmd);
        trace!("{cmd:?} -> {:?}", mv.kind());
        self.phase = Phase::Animating(mv);
        true
    }

    fn plan(&self, cmd: Command) -> Move {
        let from = self.pawn.pose();
        let facing = self.pawn.facing;
        let step = match cmd {
            Command::TurnLeft => return Move::turn(from, -1),
            Command::TurnRight => return Move::turn(from, 1),
            Command::Forward => facing.forward_delta(1),
            Command::Backward => facing.forward_delta(-1),
            Command::StrafeLeft => facing.lateral_delta(-1),
            Command::StrafeRight => facing.lateral_delta(1),
        };
        match self.pawn.target(&self.maze, step) {
            Some(to) => Move::forward(from, to),
            None => Move::bump(from, step),
        }
    }

    /// Advance the running animation by one step; no-op otherwise.
    pub fn tick(&mut self) {
        let Phase::Animating(mv) = self.phase else {
            return;
        };
        match mv.advance() {
            Advance::Running(next) => self.phase = Phase::Animating(next),
            Advance::Finished(done) => self.finish(done),
        }
    }

    fn finish(&mut self, done: Move) {
        self.phase = Phase::Idle;
        match done.kind() {
            MoveKind::Forward { to } => {
                self.pawn.cell = to;
                self.maze.show_around(to);
                if self.pawn.on_exit() {
                    info!("exit reached at ({}, {})", to.x, to.y);
                    self.maze.reveal_all();
                    self.phase = Phase::Solved;
                    return;
                }
            }
            MoveKind::Turn { to } => self.pawn.facing = to,
            MoveKind::Bump { .. } => {}
        }
        if let Some(cmd) = self.held {
            self.issue_command(cmd);
        }
    }

    /// Show every wall on the map.  Only honoured while idle.
    pub fn reveal(&mut self) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.maze.reveal_all();
        true
    }

    /// First-person wireframe of the current pose.
    pub fn render_frame(&self, proj: &Projection) -> Vec<DrawCall> {
        let mut calls = Vec::new();
        FirstPerson::new(proj.width).render(&self.maze, self.pose(), proj, &mut calls);
        calls
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
