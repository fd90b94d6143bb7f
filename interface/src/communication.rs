use edgefirst_schemas::geometry_msgs::{Twist, Vector3};
use kinematics::{Pose, VelocityCommand};
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zenoh::Session;

use crate::config::TransportConfig;
use crate::node::CommandSink;

/// `turtlesim/msg/Pose`
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct TurtlePose {
    pub x: f32,
    pub y: f32,
    pub theta: f32,
    pub linear_velocity: f32,
    pub angular_velocity: f32,
}

impl From<TurtlePose> for Pose {
    fn from(msg: TurtlePose) -> Self {
        Pose::new(msg.x as f64, msg.y as f64, msg.theta as f64)
    }
}

#[derive(Debug, Error)]
pub enum PayloadError {
    // ROS 2 payloads carry a 4 byte CDR encapsulation header.
    #[error("payload too short for a ROS 2 message ({0} bytes)")]
    TooShort(usize),

    #[error("CDR error: {0}")]
    Cdr(#[from] cdr::Error),
}

pub fn encode_twist(cmd: &VelocityCommand) -> Result<Vec<u8>, PayloadError> {
    let msg = Twist {
        linear: Vector3 {
            x: cmd.vx,
            y: cmd.vy,
            z: 0.0,
        },
        angular: Vector3 {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        },
    };
    // Writes the encapsulation header itself.
    Ok(cdr::serialize::<_, _, cdr::CdrLe>(&msg, cdr::Infinite)?)
}

pub fn decode_pose(payload: &[u8]) -> Result<Pose, PayloadError> {
    if payload.len() <= 4 {
        return Err(PayloadError::TooShort(payload.len()));
    }
    let msg: TurtlePose = cdr::deserialize(payload)?;
    Ok(msg.into())
}

pub struct CommunicationLayer {
    session: Session,
    pose_key: String,
    cmd_vel_key: String,
}

impl CommunicationLayer {
    pub async fn new(transport: &TransportConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let config = zenoh::config::Config::default();
        let session = zenoh::open(config).await.map_err(|e| e.to_string())?;

        Ok(Self {
            session,
            pose_key: transport.pose_key.clone(),
            cmd_vel_key: transport.cmd_vel_key.clone(),
        })
    }

    pub async fn publish_velocity(&self, cmd: &VelocityCommand) -> Result<(), Box<dyn std::error::Error>> {
        let payload = encode_twist(cmd)?;
        self.session.put(&self.cmd_vel_key, payload).await.map_err(|e| e.to_string())?;
        Ok(())
    }

    pub async fn subscribe_pose<F>(&self, callback: F) -> Result<(), Box<dyn std::error::Error>>
    where F: Fn(Pose) + Send + Sync + 'static
    {
        let subscriber = self.session.declare_subscriber(&self.pose_key).await.map_err(|e| e.to_string())?;

        tokio::spawn(async move {
            while let Ok(sample) = subscriber.recv_async().await {
                let payload = sample.payload().to_bytes();
                match decode_pose(&payload) {
                    Ok(pose) => callback(pose),
                    Err(e) => warn!("Dropping pose sample: {}", e),
                }
            }
        });
        Ok(())
    }

    pub async fn close(self) -> Result<(), Box<dyn std::error::Error>> {
        self.session.close().await.map_err(|e| e.to_string())?;
        Ok(())
    }
}

impl CommandSink for CommunicationLayer {
    async fn send(&self, cmd: &VelocityCommand) -> Result<(), Box<dyn std::error::Error>> {
        self.publish_velocity(cmd).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twist_carries_planar_velocity() {
        let payload = encode_twist(&VelocityCommand::new(0.5, -0.5)).unwrap();
        assert_eq!(&payload[..4], &[0x00, 0x01, 0x00, 0x00]);

        let msg: Twist = cdr::deserialize(&payload).unwrap();
        assert_eq!(msg.linear.x, 0.5);
        assert_eq!(msg.linear.y, -0.5);
        assert_eq!(msg.linear.z, 0.0);
        assert_eq!(msg.angular.z, 0.0);
    }

    #[test]
    fn test_decode_turtle_pose() {
        let msg = TurtlePose {
            x: 5.5,
            y: 2.25,
            theta: 1.5,
            ..Default::default()
        };
        let payload = cdr::serialize::<_, _, cdr::CdrLe>(&msg, cdr::Infinite).unwrap();

        let pose = decode_pose(&payload).unwrap();
        assert_eq!(pose, Pose::new(5.5, 2.25, 1.5));
    }

    #[test]
    fn test_short_payload_rejected() {
        assert!(matches!(
            decode_pose(&[0x00, 0x01, 0x00, 0x00]),
            Err(PayloadError::TooShort(4))
        ));
    }
}
