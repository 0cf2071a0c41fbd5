use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

/// Radius of the portal dodecahedron.
pub const DEFAULT_RADIUS: f64 = 3.0;
/// Uniform scale of the portal mesh node.
pub const DEFAULT_PORTAL_SCALE: f32 = 1.5;
/// Uniform scale of the room model inside every portal.
pub const DEFAULT_ROOM_SCALE: f32 = 3.8;
/// Room scale a face falls back to when none is configured.
pub const FALLBACK_ROOM_SCALE: f32 = 3.5;
/// Frame step used when simulating animation.
pub const DEFAULT_FRAME_DELTA: f64 = 1.0 / 60.0;

/// Portal geometry parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortalGeometryConfig {
    pub radius: f64,
    /// Subdivision level; only 0 is accepted by the builder.
    pub detail: u32,
}

impl Default for PortalGeometryConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            detail: 0,
        }
    }
}

/// Fixed presentation parameters of the portal scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSettings {
    pub portal_scale: f32,
    pub room_scale: f32,
    pub camera_position: [f32; 3],
    /// Asset path the room model is served from.
    pub room_asset: String,
    /// Portal content sized in world units instead of screen space.
    pub world_units: bool,
    pub shadows: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            portal_scale: DEFAULT_PORTAL_SCALE,
            room_scale: DEFAULT_ROOM_SCALE,
            camera_position: [-6.0, 0.5, 3.0],
            room_asset: "/dodeca.glb".into(),
            world_units: false,
            shadows: true,
        }
    }
}

/// Fully resolved pipeline configuration (constructed from CLI args).
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub geometry: PortalGeometryConfig,
    pub scene: SceneSettings,
    /// Local room model (glTF / GLB) to load into the scene.
    pub room: Option<PathBuf>,
    /// Output directory for `portal.glb` and `scene.json`.
    pub output: Option<PathBuf>,
    pub frames: u32,
    pub frame_delta: f64,
    pub dry_run: bool,
    pub verbose: bool,
    /// Emit log lines as JSON objects.
    pub log_json: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            geometry: PortalGeometryConfig::default(),
            scene: SceneSettings::default(),
            room: None,
            output: None,
            frames: 0,
            frame_delta: DEFAULT_FRAME_DELTA,
            dry_run: false,
            verbose: false,
            log_json: false,
        }
    }
}

/// CLI argument definition (clap derive).
#[derive(Parser, Debug)]
#[command(
    name = "portal-dodeca",
    about = "Dodecahedral portal scene builder and glTF exporter",
    version
)]
pub struct CliArgs {
    /// Portal dodecahedron radius
    #[arg(long, default_value_t = DEFAULT_RADIUS)]
    pub radius: f64,

    /// Subdivision level (only 0 is supported)
    #[arg(long, default_value_t = 0)]
    pub detail: u32,

    /// Portal mesh scale
    #[arg(long, default_value_t = DEFAULT_PORTAL_SCALE)]
    pub scale: f32,

    /// Room model scale inside each portal
    #[arg(long, default_value_t = DEFAULT_ROOM_SCALE)]
    pub room_scale: f32,

    /// Room model to load (glTF or GLB)
    #[arg(long)]
    pub room: Option<PathBuf>,

    /// Output directory
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Number of animation frames to simulate before export
    #[arg(long, default_value_t = 0)]
    pub frames: u32,

    /// Seconds per simulated frame
    #[arg(long, default_value_t = DEFAULT_FRAME_DELTA)]
    pub delta: f64,

    /// Build and report only, write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Write logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl From<CliArgs> for PipelineConfig {
    fn from(args: CliArgs) -> Self {
        PipelineConfig {
            geometry: PortalGeometryConfig {
                radius: args.radius,
                detail: args.detail,
            },
            scene: SceneSettings {
                portal_scale: args.scale,
                room_scale: args.room_scale,
                ..Default::default()
            },
            room: args.room,
            output: args.output,
            frames: args.frames,
            frame_delta: args.delta,
            dry_run: args.dry_run,
            verbose: args.verbose,
            log_json: args.log_json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_geometry_config() {
        let gc = PortalGeometryConfig::default();
        assert_eq!(gc.radius, 3.0);
        assert_eq!(gc.detail, 0);
    }

    #[test]
    fn default_scene_settings() {
        let s = SceneSettings::default();
        assert_eq!(s.portal_scale, 1.5);
        assert_eq!(s.room_scale, 3.8);
        assert_eq!(s.camera_position, [-6.0, 0.5, 3.0]);
        assert_eq!(s.room_asset, "/dodeca.glb");
        assert!(!s.world_units);
        assert!(s.shadows);
    }

    #[test]
    fn cli_args_to_pipeline_config() {
        let args = CliArgs::parse_from([
            "portal-dodeca",
            "--radius",
            "2.5",
            "--detail",
            "1",
            "--scale",
            "2",
            "--room-scale",
            "3.5",
            "--room",
            "dodeca.glb",
            "-o",
            "./out",
            "--frames",
            "120",
            "--delta",
            "0.5",
            "--dry-run",
            "-v",
            "--log-json",
        ]);

        let config: PipelineConfig = args.into();

        assert!((config.geometry.radius - 2.5).abs() < f64::EPSILON);
        assert_eq!(config.geometry.detail, 1);
        assert_eq!(config.scene.portal_scale, 2.0);
        assert_eq!(config.scene.room_scale, 3.5);
        assert_eq!(config.scene.camera_position, [-6.0, 0.5, 3.0]);
        assert_eq!(config.room, Some(PathBuf::from("dodeca.glb")));
        assert_eq!(config.output, Some(PathBuf::from("./out")));
        assert_eq!(config.frames, 120);
        assert!((config.frame_delta - 0.5).abs() < f64::EPSILON);
        assert!(config.dry_run);
        assert!(config.verbose);
        assert!(config.log_json);
    }

    #[test]
    fn cli_args_minimal() {
        let args = CliArgs::parse_from(["portal-dodeca"]);
        let config: PipelineConfig = args.into();

        assert_eq!(config.geometry, PortalGeometryConfig::default());
        assert_eq!(config.scene, SceneSettings::default());
        assert_eq!(config.room, None);
        assert_eq!(config.output, None);
        assert_eq!(config.frames, 0);
        assert!(!config.dry_run);
        assert!(!config.verbose);
        assert!(!config.log_json);
    }
}
