//! ---------------------------------------------------------------------------
//! Software (CPU) line renderer
//!
//! * Fills an owned `Vec<u32>` frame-buffer in **0x00RRGGBB** format.
//! * Every primitive is clipped per pixel, so callers may pass coordinates
//!   far outside the frame.
//! ---------------------------------------------------------------------------

use crate::renderer::{BACKGROUND, Circle, Line, Rect, Renderer, Rgba};

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

#[derive(Default)]
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl Software {
    #[inline]
    fn plot(&mut self, x: i32, y: i32, colour: Rgba) {
        if (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y) {
            self.scratch[y as usize * self.width + x as usize] = colour;
        }
    }

    /// Pixel at `(x, y)`, if inside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        (x < self.width && y < self.height).then(|| self.scratch[y * self.width + x])
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }
        self.scratch.fill(BACKGROUND);
    }

    /// Integer Bresenham.
    fn draw_line(&mut self, l: &Line) {
        let (mut x0, mut y0) = (l.from.x, l.from.y);
        let (x1, y1) = (l.to.x, l.to.y);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, l.colour);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn fill_rect(&mut self, r: &Rect) {
        let x0 = r.min.x.max(0);
        let y0 = r.min.y.max(0);
        let x1 = r.max.x.min(self.width as i32 - 1);
        let y1 = r.max.y.min(self.height as i32 - 1);
        if x0 > x1 || y0 > y1 {
            return;
        }
        for y in y0 as usize..=y1 as usize {
            let row = y * self.width;
            self.scratch[row + x0 as usize..=row + x1 as usize].fill(r.colour);
        }
    }

    /// Midpoint circle, eight-way symmetric.
    fn draw_circle(&mut self, c: &Circle) {
        let (cx, cy) = (c.centre.x, c.centre.y);
        let mut x = c.radius;
        let mut y = 0;
        let mut err = 1 - x;
        while x >= y {
            for (px, py) in [
                (x, y),
                (y, x),
                (-y, x),
                (-x, y),
                (-x, -y),
                (-y, -x),
                (y, -x),
                (x, -y),
            ] {
                self.plot(cx + px, cy + py, c.colour);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    fn end_frame<F, R>(&mut self, submit: F) -> R
    where
        F: FnOnce(&[Rgba], usize, usize) -> R,
    {
        submit(&self.scratch, self.width, self.height)
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
