//! elevator-scene binary
//!
//! Builds the scene, connects the MQTT bridge and runs the render loop until
//! ctrl-c.  Each frame is drawn into a [`DrawList`]; with `--dump-frames` the
//! list is written to stdout as one JSON object per line for a viewer to
//! consume.  Logs go to stderr.
//!
//! ## Configuration (CLI / env)
//!
//! | Key                  | Default          | Description                     |
//! |----------------------|------------------|---------------------------------|
//! | `SCENE_BROKER_HOST`  | `localhost`      | MQTT broker host                |
//! | `SCENE_BROKER_PORT`  | `1883`           | MQTT broker port                |
//! | `SCENE_CLIENT_ID`    | `elevator-scene` | MQTT client id                  |
//! | `SCENE_SETTINGS`     | *(none)*         | TOML file for [`SceneSettings`] |
//!
//! Scene settings (`SCENE_ELEVATORS`, `SCENE_SPEED`, …) are read by
//! [`SceneSettings::load`].

use anyhow::{Context, Result};
use clap::Parser;
use elevator_scene::bridge::{self, BridgeConfig, BridgeEvent, BridgeHandle};
use elevator_scene::{DrawList, Scene, SceneSettings};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Log scene and bridge counters every this many ticks.
const STATS_EVERY: u64 = 600;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "elevator-scene", about = "Live elevator scene", version)]
struct Args {
    /// MQTT broker host
    #[arg(long, env = "SCENE_BROKER_HOST", default_value = "localhost")]
    broker_host: String,

    /// MQTT broker port
    #[arg(long, env = "SCENE_BROKER_PORT", default_value_t = 1883)]
    broker_port: u16,

    /// MQTT client id
    #[arg(long, env = "SCENE_CLIENT_ID", default_value = "elevator-scene")]
    client_id: String,

    /// Scene settings file (TOML)
    #[arg(long, env = "SCENE_SETTINGS")]
    settings: Option<PathBuf>,

    /// Write every frame's draw list to stdout as a JSON line
    #[arg(long)]
    dump_frames: bool,
}

/// One rendered frame as written by `--dump-frames`.
#[derive(Serialize)]
struct Frame<'a> {
    tick: u64,
    #[serde(flatten)]
    draw: &'a DrawList,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("elevator_scene=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let settings =
        SceneSettings::load(args.settings.as_deref()).context("Failed to load scene settings")?;

    tracing::info!(
        "Starting elevator-scene (elevators={:?}, floors={}, speed={}, {:.0}Hz)",
        settings.elevators,
        settings.floors.len(),
        settings.speed,
        settings.tick_rate_hz,
    );

    let scene = settings
        .build_scene()
        .context("Failed to build scene")?;
    let surface = scene.layout_config().canvas;
    tracing::info!("Scene surface {}x{}", surface.w, surface.h);
    let frame_interval = settings.frame_interval().context("Invalid tick rate")?;

    let bridge_config = BridgeConfig {
        host: args.broker_host,
        port: args.broker_port,
        client_id: args.client_id,
        event_buffer: settings.event_buffer,
        ..Default::default()
    };
    let bridge = bridge::spawn(bridge_config, scene.floor_map().clone())
        .context("Failed to spawn bridge thread")?;

    tokio::select! {
        result = render_loop(scene, &bridge, frame_interval, args.dump_frames) => {
            result?;
            tracing::error!("Render loop exited unexpectedly");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("elevator-scene shutting down (SIGINT)");
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Render loop
// ---------------------------------------------------------------------------

async fn render_loop(
    mut scene: Scene,
    bridge: &BridgeHandle,
    interval: Duration,
    dump_frames: bool,
) -> Result<()> {
    let mut timer = tokio::time::interval(interval);
    timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut canvas = DrawList::new();

    loop {
        timer.tick().await;

        for event in bridge.poll() {
            match event {
                BridgeEvent::Action(action) => scene.enqueue_action(action),
                BridgeEvent::Connected { broker } => {
                    tracing::info!("Bridge connected to {}", broker)
                }
                BridgeEvent::Disconnected { reason } => {
                    tracing::warn!("Bridge disconnected: {}", reason)
                }
            }
        }

        canvas.reset();
        let report = scene.render_frame(&mut canvas);

        if dump_frames {
            let mut out = std::io::stdout().lock();
            serde_json::to_writer(
                &mut out,
                &Frame {
                    tick: report.tick,
                    draw: &canvas,
                },
            )
            .context("Failed to serialise frame")?;
            writeln!(out).context("Failed to write frame")?;
        }

        if report.tick % STATS_EVERY == 0 {
            tracing::debug!("scene {:?}, bridge {:?}", scene.stats(), bridge.stats());
        }
    }
}
