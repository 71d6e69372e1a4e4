//! Rendering abstraction layer.
//!
//! *Game and engine code never touch a pixel buffer directly.*
//! They produce a list of [`DrawCall`]s and hand them to a type that
//! implements [`Renderer`].
//!
//! * Coordinates are already rounded to whole pixels when a call is built.
//! * A helper blanket-impl [`RendererExt`] adds `draw_frame` so call-sites
//!   stay short.

use glam::{IVec2, ivec2};

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

pub const BACKGROUND: Rgba = 0x00_FFFFFF;
pub const WALL: Rgba = 0x00_0000FF;
pub const UNTOUCHED: Rgba = 0x00_BEBEBE;
pub const FRONTIER: Rgba = 0x00_FFFF00;
pub const PAWN: Rgba = 0x00_FF0000;
pub const DIVIDER: Rgba = 0x00_000000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line {
    pub from: IVec2,
    pub to: IVec2,
    pub colour: Rgba,
}

/// Filled axis-aligned rectangle, both corners inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub min: IVec2,
    pub max: IVec2,
    pub colour: Rgba,
}

/// Circle outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Circle {
    pub centre: IVec2,
    pub radius: i32,
    pub colour: Rgba,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawCall {
    Line(Line),
    Rect(Rect),
    Circle(Circle),
}

#[inline]
fn px(x: f64, y: f64) -> IVec2 {
    ivec2(x.round() as i32, y.round() as i32)
}

impl DrawCall {
    pub fn line(x0: f64, y0: f64, x1: f64, y1: f64, colour: Rgba) -> Self {
        DrawCall::Line(Line {
            from: px(x0, y0),
            to: px(x1, y1),
            colour,
        })
    }

    pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64, colour: Rgba) -> Self {
        let (a, b) = (px(x0, y0), px(x1, y1));
        DrawCall::Rect(Rect {
            min: a.min(b),
            max: a.max(b),
            colour,
        })
    }

    pub fn circle(cx: f64, cy: f64, radius: i32, colour: Rgba) -> Self {
        DrawCall::Circle(Circle {
            centre: px(cx, cy),
            radius,
            colour,
        })
    }

    /// Same call shifted by `d` pixels, used to place a panel in the window.
    pub fn offset(self, d: IVec2) -> Self {
        match self {
            DrawCall::Line(l) => DrawCall::Line(Line {
                from: l.from + d,
                to: l.to + d,
                ..l
            }),
            DrawCall::Rect(r) => DrawCall::Rect(Rect {
                min: r.min + d,
                max: r.max + d,
                ..r
            }),
            DrawCall::Circle(c) => DrawCall::Circle(Circle {
                centre: c.centre + d,
                ..c
            }),
        }
    }
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
/// Software callers typically forward it to their window-manager.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    fn draw_line(&mut self, line: &Line);

    fn fill_rect(&mut self, rect: &Rect);

    fn draw_circle(&mut self, circle: &Circle);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// `submit(&[Rgba], w, h)` is run exactly once per frame.
    fn end_frame<F, R>(&mut self, submit: F) -> R
    where
        F: FnOnce(&[Rgba], usize, usize) -> R;
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_frame<F, R>(&mut self, width: usize, height: usize, calls: &[DrawCall], submit: F) -> R
    where
        F: FnOnce(&[Rgba], usize, usize) -> R,
    {
        self.begin_frame(width, height);
        for c in calls {
            match c {
                DrawCall::Line(l) => self.draw_line(l),
                DrawCall::Rect(r) => self.fill_rect(r),
                DrawCall::Circle(c) => self.draw_circle(c),
            }
        }
        self.end_frame(submit)
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

pub mod software;
pub use software::Software;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_round_to_pixels() {
        assert_eq!(
            DrawCall::line(0.4, 1.6, 2.5, -0.4, WALL),
            DrawCall::Line(Line {
                from: ivec2(0, 2),
                to: ivec2(3, 0),
                colour: WALL
            })
        );
        let DrawCall::Rect(r) = DrawCall::rect(10.0, 10.0, 2.0, 4.0, PAWN) else {
            panic!("not a rect");
        };
        assert_eq!((r.min, r.max), (ivec2(2, 4), ivec2(10, 10)));
    }

    #[test]
    fn offset_moves_every_point() {
        let d = ivec2(100, 5);
        let DrawCall::Line(l) = DrawCall::line(1.0, 2.0, 3.0, 4.0, WALL).offset(d) else {
            panic!("not a line");
        };
        assert_eq!((l.from, l.to), (ivec2(101, 7), ivec2(103, 9)));
        let DrawCall::Circle(c) = DrawCall::circle(0.0, 0.0, 8, PAWN).offset(d) else {
            panic!("not a circle");
        };
        assert_eq!((c.centre, c.radius), (d, 8));
    }
}
