use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use portal_dodeca::config::{CliArgs, PipelineConfig};
use portal_dodeca::pipeline::Pipeline;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Init tracing
    let filter = if args.verbose {
        EnvFilter::new("portal_dodeca=debug")
    } else {
        EnvFilter::new("portal_dodeca=info")
    };
    let config: PipelineConfig = args.into();

    if config.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    match Pipeline::run(&config) {
        Ok(result) => {
            println!(
                "Done: {} faces, {} triangles, {} files written in {:.2}s",
                result.face_count,
                result.triangle_count,
                result.written.len(),
                result.duration.as_secs_f64()
            );
            Ok(())
        }
        Err(e) => {
            error!(%e, "Pipeline failed");
            Err(anyhow::anyhow!(e)).context("portal-dodeca pipeline failed")
        }
    }
}
