pub mod bounds;
pub mod material;
pub mod mesh;

pub use bounds::BoundingBox;
pub use material::{Color, PortalMaterial};
pub use mesh::{FaceGroup, IndexedMesh};
