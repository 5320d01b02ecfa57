use clap::{Parser, Subcommand};
use glassfall_common::Viewport;
use glassfall_sim::{Particle, ParticleField};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glassfall-cli", about = "Headless tools for the glassfall demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and population info
    Info,
    /// Step the particle field headlessly and dump the final state as JSON.
    /// Runs the replay twice to prove the seed reproduces it bit-exactly.
    Replay {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "600")]
        frames: u64,
        /// RNG seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Simulated frames per second (drives the rotation clock)
        #[arg(long, default_value = "60.0")]
        fps: f32,
    },
}

#[derive(Serialize)]
struct ReplayReport<'a> {
    seed: u64,
    frames: u64,
    reproducible: bool,
    particles: &'a [Particle],
}

/// Same focus-plane viewport the desktop app starts with: 50 degree fov,
/// 1280x720 window, camera 30 units out.
fn default_viewport() -> Viewport {
    Viewport::from_perspective(50.0_f32.to_radians(), 1280.0 / 720.0, 30.0)
}

fn run_replay(seed: u64, frames: u64, fps: f32) -> ParticleField {
    let mut field = ParticleField::new(seed, default_viewport());
    for frame in 0..frames {
        field.step(frame as f32 / fps);
    }
    field
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("glassfall-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("population: {}", glassfall_sim::POPULATION);
            println!("fall limit: +/-{}", glassfall_sim::FALL_LIMIT);
            let vp = default_viewport();
            println!("default viewport: {:.2} x {:.2} world units", vp.width, vp.height);
        }
        Commands::Replay { frames, seed, fps } => {
            tracing::info!(seed, frames, "running headless replay");
            let field = run_replay(seed, frames, fps);
            let check = run_replay(seed, frames, fps);
            let reproducible =
                field.particles() == check.particles() && field.matrices() == check.matrices();
            if !reproducible {
                tracing::error!("replay diverged for identical seeds");
            }

            let report = ReplayReport {
                seed,
                frames,
                reproducible,
                particles: field.particles(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            anyhow::ensure!(reproducible, "replay was not reproducible");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_is_reproducible() {
        let a = run_replay(7, 120, 60.0);
        let b = run_replay(7, 120, 60.0);
        assert_eq!(a.particles(), b.particles());
        assert_eq!(a.matrices(), b.matrices());
    }

    #[test]
    fn report_serializes() {
        let field = run_replay(1, 10, 60.0);
        let report = ReplayReport {
            seed: 1,
            frames: 10,
            reproducible: true,
            particles: field.particles(),
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"seed\":1"));
    }
}
