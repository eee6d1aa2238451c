use anyhow::Result;
use clap::Parser;

use hero_scene::cli::Cli;
use hero_scene::config::{load_config, CompositionConfig};
use hero_scene::core::{HeadlessSurface, Pacing};
use hero_scene::snapshot::SceneSnapshot;
use hero_scene::stage::Stage;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.dump_config {
        println!("{}", CompositionConfig::default().to_json()?);
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => CompositionConfig::default(),
    };

    let pacing = if cli.realtime { Pacing::Realtime } else { Pacing::Fixed };
    let mut surface = HeadlessSurface::new(cli.fps)
        .with_frame_limit(cli.frames)
        .with_pacing(pacing);

    let mut stage = Stage::from_config(&config);
    let summary = stage.run(&mut surface)?;

    if cli.snapshot {
        println!("{}", SceneSnapshot::of_stage(&stage).to_json()?);
    } else {
        println!(
            "{} frames, {:.2}s, {} elements, {} faults ({} elements)",
            summary.frames,
            summary.elapsed,
            stage.scene().len(),
            summary.faults,
            summary.faulted_elements.len()
        );
    }

    Ok(())
}
