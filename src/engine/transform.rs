//! Homogeneous 4×4 view transform.
//!
//! Column-vector convention (`glam`): the matrix is applied as `M · v`, so
//! the rightmost factor acts first.
//!
//! ```text
//! M = T(w/2, h/2, 0) · S(f·w, f·h, 1) · P(d) · Rx(90°) · Rz(a + 90°) · T(−cx, −cy, 0)
//! ```
//!
//! `(cx, cy)` is the pose on the wall lattice.  Both rotations turn the
//! other way from glam's counter-clockwise convention, hence the negated
//! angles below.

use glam::{DMat4, DVec3, DVec4, dvec3};

use crate::sim::Pose;

/// Viewport and lens parameters of the first-person view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub width: usize,
    pub height: usize,
    /// Perspective distance `d`; larger values flatten the view.
    pub dist_d: f64,
    /// Normalised-to-pixel factor, applied to both axes.
    pub scale: f64,
}

impl Projection {
    pub const fn new(width: usize, height: usize, dist_d: f64, scale: f64) -> Self {
        Self {
            width,
            height,
            dist_d,
            scale,
        }
    }

    /// Full view matrix for `pose`.
    pub fn build(&self, pose: Pose) -> DMat4 {
        let (cx, cy) = pose.lattice();
        let (w, h) = (self.width as f64, self.height as f64);

        DMat4::from_translation(dvec3(w / 2.0, h / 2.0, 0.0))
            * DMat4::from_scale(dvec3(self.scale * w, self.scale * h, 1.0))
            * perspective(self.dist_d)
            * DMat4::from_rotation_x(-90f64.to_radians())
            * DMat4::from_rotation_z(-(pose.angle + 90.0).to_radians())
            * DMat4::from_translation(dvec3(-cx, -cy, 0.0))
    }
}

/// `diag(d, d, d, d)` with `w' = z + d`.
pub fn perspective(d: f64) -> DMat4 {
    DMat4::from_cols(
        DVec4::new(d, 0.0, 0.0, 0.0),
        DVec4::new(0.0, d, 0.0, 0.0),
        DVec4::new(0.0, 0.0, d, 1.0),
        DVec4::new(0.0, 0.0, 0.0, d),
    )
}

/// A projected point: pixel coordinates plus signed depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    /// `z' / |w'|`: negative behind the viewer.
    pub depth: f64,
}

impl ScreenPoint {
    /// Stand-in for a point with `w' == 0`.
    pub const AT_INFINITY: ScreenPoint = ScreenPoint {
        x: 0.0,
        y: 0.0,
        depth: -1.0,
    };

    #[inline]
    pub fn is_behind(&self) -> bool {
        self.depth < 0.0
    }
}

/// Apply `m` to `(p, 1)` and divide by `w'`.
pub fn project(m: &DMat4, p: DVec3) -> ScreenPoint {
    let v = *m * p.extend(1.0);
    if v.w == 0.0 {
        return ScreenPoint::AT_INFINITY;
    }
    ScreenPoint {
        x: v.x / v.w,
        y: v.y / v.w,
        depth: v.z / v.w.abs(),
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
