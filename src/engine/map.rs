//! Top-down map panel.
//!
//! Layout in panel pixels: cell `(x, y)` covers
//! `[ORIGIN + 22·(x, y), ORIGIN + 22·(x + 1, y + 1)]`.

use glam::{IVec2, ivec2};

use crate::{
    renderer::{DrawCall, FRONTIER, PAWN, UNTOUCHED, WALL},
    sim::{Game, Pose},
    world::{Cell, Generator, Mark, Maze, Wall},
};

pub const CELL_PX: i32 = 22;
pub const ORIGIN: IVec2 = ivec2(25, 40);
/// Room left below the grid.
pub const FOOTER_PX: i32 = 30;
pub const PAWN_RADIUS: i32 = 8;
/// Inset of the exit cross from the cell corners.
const EXIT_INSET: i32 = 3;

/// Pixel size of the panel for a `width × height` maze.
pub fn panel_size(width: usize, height: usize) -> (usize, usize) {
    (
        (2 * ORIGIN.x + CELL_PX * width as i32) as usize,
        (ORIGIN.y + CELL_PX * height as i32 + FOOTER_PX) as usize,
    )
}

#[inline]
fn corner(x: f64, y: f64) -> (f64, f64) {
    (
        ORIGIN.x as f64 + x * CELL_PX as f64,
        ORIGIN.y as f64 + y * CELL_PX as f64,
    )
}

/// Draw the whole panel for `game`.
pub fn draw(game: &Game, out: &mut Vec<DrawCall>) {
    walls(game.maze(), out);
    match game.generator() {
        Some(g) => cells(game.maze(), g, out),
        None => {
            pawn(game.pose(), out);
            exit(game.pawn().exit, out);
        }
    }
}

/// Shown walls only; hidden ones are still in the fog.
fn walls(maze: &Maze, out: &mut Vec<DrawCall>) {
    for s in maze.segments().filter(|s| s.wall == Wall::Shown) {
        let (x0, y0) = corner(s.a.x as f64 / 2.0, s.a.y as f64 / 2.0);
        let (x1, y1) = corner(s.b.x as f64 / 2.0, s.b.y as f64 / 2.0);
        out.push(DrawCall::line(x0, y0, x1, y1, WALL));
    }
}

fn cells(maze: &Maze, g: &Generator, out: &mut Vec<DrawCall>) {
    let all = (0..maze.height()).flat_map(|y| (0..maze.width()).map(move |x| Cell::new(x, y)));
    for (mark, colour) in [(Mark::Untouched, UNTOUCHED), (Mark::Frontier, FRONTIER)] {
        for c in all.clone().filter(|&c| g.mark(c) == mark) {
            let (x0, y0) = corner(c.x as f64, c.y as f64);
            let (x1, y1) = corner(c.x as f64 + 1.0, c.y as f64 + 1.0);
            out.push(DrawCall::rect(x0 + 1.0, y0 + 1.0, x1 - 1.0, y1 - 1.0, colour));
        }
    }
}

/// Circle at the cell centre plus a tick pointing along the heading.
fn pawn(pose: Pose, out: &mut Vec<DrawCall>) {
    let (cx, cy) = corner(pose.x + 0.5, pose.y + 0.5);
    let (cx, cy) = (cx.round(), cy.round());
    let (s, c) = pose.angle.to_radians().sin_cos();
    let r = PAWN_RADIUS as f64;
    out.push(DrawCall::circle(cx, cy, PAWN_RADIUS, PAWN));
    out.push(DrawCall::line(cx, cy, cx + c * r, cy + s * r, PAWN));
}

fn exit(cell: Cell, out: &mut Vec<DrawCall>) {
    let (x0, y0) = corner(cell.x as f64, cell.y as f64);
    let (x1, y1) = corner(cell.x as f64 + 1.0, cell.y as f64 + 1.0);
    let i = EXIT_INSET as f64;
    out.push(DrawCall::line(x0 + i, y0 + i, x1 - i, y1 - i, PAWN));
    out.push(DrawCall::line(x1 - i, y0 + i, x0 + i, y1 - i, PAWN));
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
