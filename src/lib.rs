pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod pipeline;
pub mod scene;
pub mod types;

pub use config::{PipelineConfig, PortalGeometryConfig, SceneSettings};
pub use geometry::build_indexed_dodecahedron;
pub use pipeline::Pipeline;
