use std::f32::consts::TAU;
use std::time::Duration;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use swirl_core::TrailConfig;
use swirl_platform::Result;
use swirl_raster::Host;

const VIEWPORT: (u32, u32) = (800, 600);
const FRAME: Duration = Duration::from_millis(16);

fn main() {
    // Init logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter("info")
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    info!("Swirl starting");
    if let Err(e) = run() {
        eprintln!("Swirl error: {e}");
    }
}

fn run() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => TrailConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => TrailConfig::default(),
    };
    info!(preset = %config.name, "preset loaded");

    let (mut host, channels) = Host::new(config, VIEWPORT.0, VIEWPORT.1);

    // Sweep the pointer around an ellipse for a few seconds, pausing the
    // effect partway through as if the window were hidden and shown again.
    let (center_x, center_y) = (VIEWPORT.0 as f32 / 2.0, VIEWPORT.1 as f32 / 2.0);
    for frame in 0..360u32 {
        let t = frame as f32 / 120.0 * TAU;
        channels.pointer.send((
            center_x + 250.0 * t.cos(),
            center_y + 150.0 * t.sin(),
        ))?;

        if frame == 180 {
            channels.visibility.send(true)?;
        }
        if frame == 210 {
            channels.visibility.send(false)?;
        }

        host.pump();
        if frame % 60 == 0 {
            info!(
                frame,
                live = host.simulator().particle_count(),
                running = host.simulator().is_running(),
                "trail status"
            );
        }
        std::thread::sleep(FRAME);
    }

    info!(live = host.simulator().particle_count(), "Swirl done");
    Ok(())
}
