use glam::{DVec3, IVec2};

use crate::{
    renderer::{DrawCall, WALL},
    sim::Pose,
    world::Maze,
};

use super::{
    transform::{Projection, project},
    zbuffer::ColumnBuffer,
};

/// First-person wireframe renderer.  Keeps its column buffer between frames.
#[derive(Clone, Debug, Default)]
pub struct FirstPerson {
    buf: ColumnBuffer,
}

impl FirstPerson {
    pub fn new(width: usize) -> Self {
        Self {
            buf: ColumnBuffer::new(width),
        }
    }

    pub fn buffer(&self) -> &ColumnBuffer {
        &self.buf
    }

    /// Project every present wall of `maze` as seen from `pose` and append
    /// the visible lines to `out`.  Hidden walls are drawn too; fog of war
    /// only applies to the map.
    pub fn render(&mut self, maze: &Maze, pose: Pose, proj: &Projection, out: &mut Vec<DrawCall>) {
        let m = proj.build(pose);
        self.buf.reset(proj.width);

        // wall tops sit at z = 1
        let lift = |p: IVec2| p.as_dvec2().extend(1.0);
        for seg in maze.segments() {
            let (a, b): (DVec3, DVec3) = (lift(seg.a), lift(seg.b));
            self.buf.blend(project(&m, a), project(&m, b));
        }
        self.buf.resolve(proj.height, WALL, out);
    }
}
