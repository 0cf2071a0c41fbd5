pub mod glb_writer;
pub mod manifest;

pub use glb_writer::write_portal_glb;
pub use manifest::{SceneManifest, write_manifest};
