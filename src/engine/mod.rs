pub mod map;
mod transform;
mod view;
mod zbuffer;

pub use transform::{Projection, ScreenPoint, perspective, project};
pub use view::FirstPerson;
pub use zbuffer::{Column, ColumnBuffer, Edge};
