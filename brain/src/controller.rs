//! Waypoint navigation state machine.
//!
//! The controller drains the forward queue outbound, pushing every consumed
//! displacement onto the visited stack, then pops the stack and undoes each
//! displacement to retrace the route back to where it started. It is driven
//! by two events, pose samples and control ticks, which the host must deliver
//! from a single task.

use crate::containers::{EmptyError, ForwardQueue, VisitedStack};
use crate::params::NavParams;
use crate::velocity::VelocityLaw;
use kinematics::{Displacement, Pose, VelocityCommand};
use log::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingFirstPose,
    Navigating,
    Finished,
}

/// Which half of the journey the current setpoint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    Outbound,
    Return,
}

/// Notifications produced when the setpoint changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavEvent {
    /// A displacement was taken from the queue.
    Arrived {
        at: Pose,
        displacement: Displacement,
        setpoint: Pose,
    },
    /// A displacement was popped from the stack and is being undone.
    Retracing {
        at: Pose,
        displacement: Displacement,
        setpoint: Pose,
    },
    /// Queue and stack are both empty. Emitted once.
    JourneyComplete { at: Pose },
}

/// Result of one control tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tick {
    /// Command to publish, `None` when nothing should be sent.
    pub command: Option<VelocityCommand>,
    pub event: Option<NavEvent>,
}

impl Tick {
    fn idle() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.event, Some(NavEvent::JourneyComplete { .. }))
    }
}

#[derive(Debug, Clone, Copy)]
enum State {
    AwaitingFirstPose,
    Navigating { pose: Pose, setpoint: Pose, leg: Leg },
    Finished { pose: Pose },
}

pub struct NavigationController {
    params: NavParams,
    law: VelocityLaw,
    pending: ForwardQueue,
    visited: VisitedStack,
    state: State,
}

impl NavigationController {
    pub fn new(route: ForwardQueue, params: NavParams) -> Self {
        Self {
            law: VelocityLaw::from(&params),
            params,
            pending: route,
            visited: VisitedStack::new(),
            state: State::AwaitingFirstPose,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::AwaitingFirstPose => Phase::AwaitingFirstPose,
            State::Navigating { .. } => Phase::Navigating,
            State::Finished { .. } => Phase::Finished,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase() == Phase::Finished
    }

    pub fn pose(&self) -> Option<Pose> {
        match self.state {
            State::AwaitingFirstPose => None,
            State::Navigating { pose, .. } | State::Finished { pose } => Some(pose),
        }
    }

    pub fn setpoint(&self) -> Option<Pose> {
        match self.state {
            State::Navigating { setpoint, .. } => Some(setpoint),
            _ => None,
        }
    }

    pub fn leg(&self) -> Option<Leg> {
        match self.state {
            State::Navigating { leg, .. } => Some(leg),
            _ => None,
        }
    }

    pub fn pending(&self) -> &ForwardQueue {
        &self.pending
    }

    pub fn visited(&self) -> &VisitedStack {
        &self.visited
    }

    pub fn params(&self) -> &NavParams {
        &self.params
    }

    /// Record a new pose sample. The first sample establishes the first
    /// setpoint.
    pub fn on_pose(&mut self, sample: Pose) -> Option<NavEvent> {
        match self.state {
            State::AwaitingFirstPose => {
                info!("First pose received at {}", sample);
                Some(self.advance_setpoint(sample))
            }
            State::Navigating { setpoint, leg, .. } => {
                self.state = State::Navigating {
                    pose: sample,
                    setpoint,
                    leg,
                };
                None
            }
            State::Finished { .. } => {
                self.state = State::Finished { pose: sample };
                None
            }
        }
    }

    /// Run one control step.
    ///
    /// On arrival the command is zero and the next setpoint is chosen in the
    /// same tick.
    pub fn on_tick(&mut self) -> Tick {
        let (pose, setpoint) = match self.state {
            State::AwaitingFirstPose => {
                debug!("Waiting for first pose...");
                return Tick::idle();
            }
            State::Finished { .. } => return Tick::idle(),
            State::Navigating { pose, setpoint, .. } => (pose, setpoint),
        };

        if pose.approx_eq(&setpoint, self.params.tolerance) {
            let event = self.advance_setpoint(pose);
            return Tick {
                command: Some(VelocityCommand::stop()),
                event: Some(event),
            };
        }

        let command = self.law.command(&pose.error_to(&setpoint));
        trace!("pose {} setpoint {} -> {:?}", pose, setpoint, command);
        Tick {
            command: Some(command),
            event: None,
        }
    }

    fn advance_setpoint(&mut self, pose: Pose) -> NavEvent {
        match self.pending.dequeue() {
            Ok(displacement) => {
                let setpoint = pose.combine(&displacement);
                self.visited.push(displacement);
                info!("Arrived at {}, heading to {}", pose, setpoint);
                self.state = State::Navigating {
                    pose,
                    setpoint,
                    leg: Leg::Outbound,
                };
                return NavEvent::Arrived {
                    at: pose,
                    displacement,
                    setpoint,
                };
            }
            Err(EmptyError) => {}
        }

        match self.visited.pop() {
            Ok(displacement) => {
                let setpoint = pose.difference(&displacement);
                info!("At {}, retracing to {}", pose, setpoint);
                self.state = State::Navigating {
                    pose,
                    setpoint,
                    leg: Leg::Return,
                };
                NavEvent::Retracing {
                    at: pose,
                    displacement,
                    setpoint,
                }
            }
            Err(EmptyError) => {
                info!("Journey complete at {}", pose);
                self.state = State::Finished { pose };
                NavEvent::JourneyComplete { at: pose }
            }
        }
    }
}
