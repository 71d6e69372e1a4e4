//! In-flight animations between two discrete pawn states.
//!
//! A [`Move`] owns a start pose, an end pose and a step counter `k ∈ 0..=nb`.
//! The visible pose is the linear blend at `u = k / nb`.  [`Move::advance`]
//! is called once per tick and hands the move back either still running or
//! finished, so the caller decides what to commit.

use crate::world::Cell;

use super::pawn::Facing;

pub const FORWARD_STEPS: u32 = 20;
pub const TURN_STEPS: u32 = 20;
pub const BUMP_STEPS: u32 = 6;
/// Fraction of a cell the pawn travels into a wall before bouncing back.
pub const BUMP_DEPTH: f64 = 0.1;

/// Continuous pawn placement in cell units and degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
}

impl Pose {
    pub const fn new(x: f64, y: f64, angle: f64) -> Self {
        Self { x, y, angle }
    }

    #[inline]
    pub fn lerp(self, to: Pose, u: f64) -> Pose {
        Pose {
            x: self.x * (1.0 - u) + to.x * u,
            y: self.y * (1.0 - u) + to.y * u,
            angle: self.angle * (1.0 - u) + to.angle * u,
        }
    }

    /// Centre of the pose on the wall lattice (two lattice units per cell).
    #[inline]
    pub fn lattice(self) -> (f64, f64) {
        (2.0 * self.x + 1.0, 2.0 * self.y + 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// Step into `to`; committed when the move finishes.
    Forward { to: Cell },
    /// Rotate in place; `to` is committed when the move finishes.
    Turn { to: Facing },
    /// Nudge into a wall and back; commits nothing.
    Bump { returning: bool },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Move {
    kind: MoveKind,
    from: Pose,
    to: Pose,
    k: u32,
    nb: u32,
}

/// Result of advancing a move by one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Advance {
    Running(Move),
    Finished(Move),
}

impl Move {
    pub fn forward(from: Pose, to: Cell) -> Self {
        Self {
            kind: MoveKind::Forward { to },
            from,
            to: Pose::new(to.x as f64, to.y as f64, from.angle),
            k: 0,
            nb: FORWARD_STEPS,
        }
    }

    /// `quarter_turns` is +1 for a right turn, −1 for a left one.
    pub fn turn(from: Pose, quarter_turns: i32) -> Self {
        let angle = from.angle + 90.0 * quarter_turns as f64;
        Self {
            kind: MoveKind::Turn {
                to: Facing::from_degrees(angle as i32),
            },
            from,
            to: Pose { angle, ..from },
            k: 0,
            nb: TURN_STEPS,
        }
    }

    /// Bump towards the blocked unit step `(dx, dy)`.
    pub fn bump(from: Pose, (dx, dy): (isize, isize)) -> Self {
        Self {
            kind: MoveKind::Bump { returning: false },
            from,
            to: Pose {
                x: from.x + BUMP_DEPTH * dx as f64,
                y: from.y + BUMP_DEPTH * dy as f64,
                ..from
            },
            k: 0,
            nb: BUMP_STEPS,
        }
    }

    #[inline]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    #[inline]
    pub fn from(&self) -> Pose {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Pose {
        self.to
    }

    /// `(k, nb)`.
    #[inline]
    pub fn progress(&self) -> (u32, u32) {
        (self.k, self.nb)
    }

    /// Interpolated pose at the current step.
    pub fn pose(&self) -> Pose {
        match self.k {
            0 => self.from,
            k if k == self.nb => self.to,
            k => self.from.lerp(self.to, k as f64 / self.nb as f64),
        }
    }

    /// One tick forward.  A bump's outward leg rolls straight into its
    /// return leg instead of finishing.
    pub fn advance(mut self) -> Advance {
        self.k += 1;
        if self.k < self.nb {
            return Advance::Running(self);
        }
        match self.kind {
            MoveKind::Bump { returning: false } => {
                self.kind = MoveKind::Bump { returning: true };
                core::mem::swap(&mut self.from, &mut self.to);
                self.k = 0;
                Advance::Running(self)
            }
            _ => Advance::Finished(self),
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
