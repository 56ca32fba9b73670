//! Floating-point geometric primitives.

mod edge;
mod point2;
mod point3;
mod triangle;
mod vec2;
mod vec3;

pub use edge::Edge;
pub use point2::Point2;
pub use point3::Point3;
pub use triangle::{Triangle2, Triangle3};
pub use vec2::Vec2;
pub use vec3::Vec3;
