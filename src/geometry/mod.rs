pub mod platonic;
pub mod polyhedron;
pub mod portal;

pub use platonic::Solid;
pub use portal::{build_indexed_dodecahedron, build_portal_geometry};
