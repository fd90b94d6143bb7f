use brain::{NavEvent, NavigationController};
use kinematics::{Pose, VelocityCommand};
use log::{error, info};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};

/// Destination for velocity commands.
pub trait CommandSink {
    async fn send(&self, cmd: &VelocityCommand) -> Result<(), Box<dyn std::error::Error>>;
}

/// Drive `nav` until the journey is complete, then send a final stop.
///
/// `poses` holds only the latest sample; samples that arrive between two
/// wakeups of the loop are superseded, never queued.
pub async fn run<S: CommandSink>(
    nav: &mut NavigationController,
    mut poses: watch::Receiver<Option<Pose>>,
    sink: &S,
) -> Result<(), Box<dyn std::error::Error>> {
    let period = Duration::from_millis(nav.params().control_period_ms);
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!("Control loop running every {:?}", period);

    loop {
        tokio::select! {
            Ok(()) = poses.changed() => {
                let latest = *poses.borrow_and_update();
                if let Some(pose) = latest {
                    if let Some(NavEvent::JourneyComplete { .. }) = nav.on_pose(pose) {
                        break;
                    }
                }
            }
            _ = ticker.tick() => {
                let tick = nav.on_tick();
                if let Some(cmd) = tick.command {
                    // A later tick overwrites this command, so a lost publish is not fatal.
                    if let Err(e) = sink.send(&cmd).await {
                        error!("Failed to publish velocity command: {}", e);
                    }
                }
                if tick.is_complete() {
                    break;
                }
            }
        }
    }

    info!("Journey complete, stopping vehicle");
    sink.send(&VelocityCommand::stop()).await
}
