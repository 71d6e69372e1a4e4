//! One-dimensional depth buffer for wireframe walls.
//!
//! Every screen column remembers the nearest wall top seen so far.  Once all
//! walls are blended, [`ColumnBuffer::resolve`] walks the columns once and
//! turns runs of interior columns into top/bottom lines, and true wall ends
//! into vertical edges.  Bottoms are the tops mirrored about the horizon
//! (`height − y`).

use crate::renderer::{DrawCall, Rgba};

use super::transform::ScreenPoint;

/// How a column relates to the segment that owns it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Edge {
    #[default]
    Interior,
    /// A real end of the wall falls on this column: draw a vertical edge.
    Extremity,
    /// The wall was cut by the viewport here and continues off-screen.
    Clipped,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Column {
    /// `None` until a wall covers the column.
    pub depth: Option<f64>,
    pub y: f64,
    pub edge: Edge,
}

#[derive(Clone, Debug, Default)]
pub struct ColumnBuffer {
    cols: Vec<Column>,
}

impl ColumnBuffer {
    pub fn new(width: usize) -> Self {
        Self {
            cols: vec![Column::default(); width],
        }
    }

    /// Empty every column, resizing to `width` if needed.
    pub fn reset(&mut self, width: usize) {
        self.cols.clear();
        self.cols.resize(width, Column::default());
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.cols.len()
    }

    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.cols
    }

    /// Merge one projected wall.  Returns `false` when the wall was culled
    /// before touching any column.
    pub fn blend(&mut self, a: ScreenPoint, b: ScreenPoint) -> bool {
        let width = self.cols.len() as f64;
        if self.cols.is_empty() {
            return false;
        }
        let off = |p: &ScreenPoint| p.x < 0.0 || p.x >= width;

        if (a.x < 0.0 && b.x < 0.0) || (a.x >= width && b.x >= width) {
            return false;
        }
        if a.depth <= 0.0 && b.depth <= 0.0 {
            return false;
        }
        // Half behind the viewer and half off-screen: cannot be placed
        // without real clipping, drop it.
        if (a.is_behind() && off(&b)) || (b.is_behind() && off(&a)) {
            return false;
        }

        let (p, q) = if a.x <= b.x { (a, b) } else { (b, a) };
        let ix1 = p.x.round().max(0.0) as usize;
        let ix2 = q.x.round().min(width - 1.0) as usize;
        let span = q.x - p.x;
        // Sub-pixel span (wall seen edge-on): no slope to follow, keep the
        // nearer end that is in front of the viewer.
        let flat = ix1 == ix2 || span.abs() < 1.0;
        let front = if q.depth > 0.0 && (p.depth <= 0.0 || q.depth < p.depth) { q } else { p };

        for x in ix1..=ix2 {
            let xf = x as f64;
            let (z, y) = if flat {
                (front.depth, front.y)
            } else {
                let u = ((xf - p.x) / span).clamp(0.0, 1.0);
                (p.depth + u * (q.depth - p.depth), p.y + u * (q.y - p.y))
            };

            let col = &mut self.cols[x];
            if col.depth.is_some_and(|d| z >= d) {
                continue;
            }
            col.depth = Some(z);
            col.y = y;
            col.edge = if x != ix1 && x != ix2 {
                Edge::Interior
            } else if (xf - p.x).abs() > 1.0 && (xf - q.x).abs() > 1.0 {
                Edge::Clipped
            } else {
                Edge::Extremity
            };
        }
        true
    }

    /// Single left-to-right pass emitting the visible wireframe.
    pub fn resolve(&self, height: usize, colour: Rgba, out: &mut Vec<DrawCall>) {
        let h = height as f64;
        let last = self.cols.len().saturating_sub(1);
        let mut last_x: isize = -1;

        for (x, col) in self.cols.iter().enumerate() {
            if col.edge == Edge::Interior && x != last {
                continue;
            }
            let run = (last_x + 1) as usize;
            if run + 1 < x {
                let (l, r) = (&self.cols[run], &self.cols[x - 1]);
                if l.depth.is_some() && r.depth.is_some() {
                    let (x0, x1) = (run as f64, (x - 1) as f64);
                    out.push(DrawCall::line(x0, l.y, x1, r.y, colour));
                    out.push(DrawCall::line(x0, h - l.y, x1, h - r.y, colour));
                }
            }
            if col.edge == Edge::Extremity {
                let xf = x as f64;
                out.push(DrawCall::line(xf, h - col.y, xf, col.y, colour));
            }
            last_x = x as isize;
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
