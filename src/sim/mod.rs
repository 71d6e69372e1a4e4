mod command;
mod game;
mod moves;
mod pawn;
mod tic;

pub use command::Command;
pub use game::{Game, Phase};
pub use moves::{Advance, BUMP_DEPTH, BUMP_STEPS, FORWARD_STEPS, Move, MoveKind, Pose, TURN_STEPS};
pub use pawn::{Facing, Pawn};
pub use tic::{STEP_DELAY_MS, Timer};
