//! First-person wireframe maze.
//!
//! * [`world`] owns the maze: the wall grid and the growing-tree generator.
//! * [`sim`] moves the pawn through it one tick at a time.
//! * [`engine`] turns a maze + pose into a list of [`renderer::DrawCall`]s.
//! * [`renderer`] rasterises draw calls into a frame buffer.
//! * [`app`] glues keyboard state and timers to the above.

pub mod app;
pub mod config;
pub mod engine;
pub mod renderer;
pub mod sim;
pub mod world;

pub use app::{App, Keys, Status};
pub use config::{Config, ConfigError};
pub use sim::{Command, Game, Phase};
pub use world::{Cell, Maze, MazeError};
