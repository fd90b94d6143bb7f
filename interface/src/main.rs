mod communication;
mod config;
mod node;

use brain::{NavigationController, load_route};
use clap::Parser;
use communication::CommunicationLayer;
use config::NodeConfig;
use log::info;
use std::path::PathBuf;
use tokio::sync::watch;

/// Drives a turtle through a waypoint route and back to where it started.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Waypoint file, overrides the config
    #[arg(short, long)]
    waypoints: Option<PathBuf>,

    /// Control period in milliseconds, overrides the config
    #[arg(long)]
    period_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            NodeConfig::load(path)?
        }
        None => NodeConfig::default(),
    };
    if let Some(waypoints) = args.waypoints {
        config.waypoints = waypoints;
    }
    if let Some(period_ms) = args.period_ms {
        config.navigation.control_period_ms = period_ms;
    }
    config.navigation.validate()?;

    // The whole route must load before the transport is touched.
    let route = load_route(&config.waypoints)?;
    let mut nav = NavigationController::new(route, config.navigation);

    info!("Connecting to zenoh...");
    let comms = CommunicationLayer::new(&config.transport).await?;

    let (tx, rx) = watch::channel(None);
    comms
        .subscribe_pose(move |pose| {
            tx.send_replace(Some(pose));
        })
        .await?;
    info!(
        "Listening for poses on {}, commanding {}",
        config.transport.pose_key, config.transport.cmd_vel_key
    );

    let outcome = node::run(&mut nav, rx, &comms).await;
    comms.close().await?;
    outcome
}
