use crate::params::NavParams;
use kinematics::{Displacement, VelocityCommand};

/// Per-axis bang-bang law.
///
/// Each axis is driven at `cruise_speed` towards the setpoint while its error
/// is outside the deadband, and held at zero inside it. There is no
/// hysteresis, so noise straddling the deadband edge makes the output chatter.
#[derive(Debug, Clone, Copy)]
pub struct VelocityLaw {
    pub cruise_speed: f64,
    pub deadband: f64,
}

impl VelocityLaw {
    pub fn new(cruise_speed: f64, deadband: f64) -> Self {
        Self {
            cruise_speed,
            deadband,
        }
    }

    pub fn axis(&self, error: f64) -> f64 {
        if error > self.deadband {
            self.cruise_speed
        } else if error < -self.deadband {
            -self.cruise_speed
        } else {
            0.0
        }
    }

    pub fn command(&self, error: &Displacement) -> VelocityCommand {
        VelocityCommand::new(self.axis(error.x), self.axis(error.y))
    }
}

impl From<&NavParams> for VelocityLaw {
    fn from(params: &NavParams) -> Self {
        Self::new(params.cruise_speed, params.tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_sign() {
        let law = VelocityLaw::from(&NavParams::default());
        assert_eq!(law.axis(0.5), 0.5);
        assert_eq!(law.axis(-0.5), -0.5);
        assert_eq!(law.axis(0.05), 0.0);
        assert_eq!(law.axis(-0.05), 0.0);
        assert_eq!(law.axis(42.0), 0.5);
    }

    #[test]
    fn test_axes_are_independent() {
        let law = VelocityLaw::new(0.5, 0.1);
        let cmd = law.command(&Displacement::new(-3.0, 0.02));
        assert_eq!(cmd, VelocityCommand::new(-0.5, 0.0));
    }
}
