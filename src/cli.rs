// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "hero-scene")]
#[command(about = "Animated hero scene, driven on a headless surface", long_about = None)]
pub struct Cli {
    /// Composition config (JSON); omitted fields use the stock hero scene
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of frames to run
    #[arg(long, default_value_t = 300)]
    pub frames: u64,

    /// Surface frame rate
    #[arg(long, default_value_t = 60.0)]
    pub fps: f32,

    /// Pace frames to the wall clock instead of stepping as fast as possible
    #[arg(long)]
    pub realtime: bool,

    /// Print the final scene snapshot as JSON
    #[arg(long)]
    pub snapshot: bool,

    /// Print the default composition config and exit
    #[arg(long = "dump-config")]
    pub dump_config: bool,
}
