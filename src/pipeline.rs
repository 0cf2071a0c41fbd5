use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::info;

use crate::config::PipelineConfig;
use crate::error::{PortalError, Result};
use crate::export::{write_manifest, write_portal_glb};
use crate::geometry::build_portal_geometry;
use crate::scene::{PortalScene, default_faces, load_room};

/// Summary of a completed pipeline run.
#[derive(Debug)]
pub struct ProcessingResult {
    pub face_count: usize,
    pub triangle_count: usize,
    pub frames: u32,
    /// Files written, in order.
    pub written: Vec<PathBuf>,
    pub duration: Duration,
}

/// Pipeline orchestrator -- build, assemble, animate, export.
pub struct Pipeline;

impl Pipeline {
    /// Run the full pipeline.
    pub fn run(config: &PipelineConfig) -> Result<ProcessingResult> {
        let start = Instant::now();

        let scene = Self::prepare(config)?;

        if config.dry_run {
            info!("--dry-run: reporting scene only");
            print_summary(&scene);
            return Ok(ProcessingResult {
                face_count: scene.chambers.len(),
                triangle_count: scene.geometry.triangle_count(),
                frames: config.frames,
                written: Vec::new(),
                duration: start.elapsed(),
            });
        }

        let written = match &config.output {
            Some(out_dir) => {
                info!("Stage 4/4: Export");
                Self::export(&scene, out_dir)?
            }
            None => {
                print_summary(&scene);
                Vec::new()
            }
        };

        let duration = start.elapsed();
        info!(files = written.len(), elapsed = ?duration, "Pipeline complete");

        Ok(ProcessingResult {
            face_count: scene.chambers.len(),
            triangle_count: scene.geometry.triangle_count(),
            frames: config.frames,
            written,
            duration,
        })
    }

    /// Build, assemble and animate the scene without writing anything.
    pub fn prepare(config: &PipelineConfig) -> Result<PortalScene> {
        info!("Stage 1/4: Portal geometry");
        let geometry = build_portal_geometry(&config.geometry)?;

        info!("Stage 2/4: Scene assembly");
        let room = config.room.as_deref().map(load_room).transpose()?;
        let mut scene =
            PortalScene::assemble(geometry, default_faces()?, config.scene.clone(), room)?;

        if config.frames > 0 {
            info!(
                frames = config.frames,
                delta = config.frame_delta,
                "Stage 3/4: Animation"
            );
            for _ in 0..config.frames {
                scene.advance(config.frame_delta);
            }
        }

        Ok(scene)
    }

    fn export(scene: &PortalScene, out_dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(out_dir).map_err(|e| {
            PortalError::Output(format!(
                "Failed to create output directory {}: {e}",
                out_dir.display()
            ))
        })?;

        let glb_path = out_dir.join("portal.glb");
        let glb = write_portal_glb(
            &scene.geometry,
            &scene.portal_materials(),
            scene.settings.portal_scale,
        )?;
        fs::write(&glb_path, &glb)
            .map_err(|e| PortalError::Output(format!("Failed to write portal.glb: {e}")))?;
        info!(bytes = glb.len(), path = %glb_path.display(), "Wrote portal GLB");

        let manifest_path = out_dir.join("scene.json");
        write_manifest(scene, &manifest_path)?;

        Ok(vec![glb_path, manifest_path])
    }
}

/// Print the face table and geometry stats.
fn print_summary(scene: &PortalScene) {
    let geometry = &scene.geometry;
    println!("=== Portal Geometry ===");
    println!("  Vertices:  {}", geometry.vertex_count());
    println!("  Triangles: {}", geometry.triangle_count());
    println!("  Indices:   {}", geometry.index_count());
    println!("  Groups:    {}", geometry.groups.len());
    println!();
    println!("=== Faces ===");
    for chamber in &scene.chambers {
        println!(
            "  {:>2}  [{:>3}, {:>3})  {}  {}",
            chamber.portal.face,
            chamber.group.start,
            chamber.group.start + chamber.group.count,
            chamber.portal.background,
            chamber.portal.shape.name()
        );
    }
    if let Some(room) = &scene.room {
        println!();
        println!("=== Room ===");
        println!("  Parts:     {}", room.parts.len());
        println!("  Triangles: {}", room.triangle_count());
    }
}
