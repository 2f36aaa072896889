//! Configuration check command

use std::path::PathBuf;

use clap::Args;
use vectarget_core::TargetingConfig;

#[derive(Debug, Args)]
pub struct CheckConfigArgs {
    /// TOML capability configuration
    pub file: PathBuf,
}

pub fn execute(args: CheckConfigArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = TargetingConfig::from_path(&args.file)?;

    println!(
        "{}: ok (queue_capacity = {}, {} capabilities)",
        args.file.display(),
        config.queue_capacity,
        config.capabilities.len()
    );
    for cap in &config.capabilities {
        let bounds = &cap.distance_bounds;
        println!(
            "  {} two_phase={} point_of_cast={} min={} max={} presentation_keys={}",
            cap.id,
            cap.two_phase,
            cap.point_of_cast.as_str(),
            fmt_bound(bounds.min),
            fmt_bound(bounds.max),
            cap.presentation.len()
        );
    }
    Ok(())
}

fn fmt_bound(bound: Option<f32>) -> String {
    bound.map_or_else(|| "-".to_string(), |b| b.to_string())
}
