use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("Invalid navigation parameter {name}: {value} (must be positive)")]
    Invalid { name: &'static str, value: f64 },
}

/// Tuning for the navigation controller.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct NavParams {
    /// Speed commanded on an axis whose error is outside the tolerance.
    #[serde(default = "default_cruise_speed")]
    pub cruise_speed: f64,

    /// Arrival tolerance, also used as the velocity deadband.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Control tick period in milliseconds.
    #[serde(default = "default_control_period_ms")]
    pub control_period_ms: u64,
}

fn default_cruise_speed() -> f64 {
    0.5
}

fn default_tolerance() -> f64 {
    kinematics::TOLERANCE
}

fn default_control_period_ms() -> u64 {
    20
}

impl Default for NavParams {
    fn default() -> Self {
        Self {
            cruise_speed: default_cruise_speed(),
            tolerance: default_tolerance(),
            control_period_ms: default_control_period_ms(),
        }
    }
}

impl NavParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        let checks = [
            ("cruise_speed", self.cruise_speed),
            ("tolerance", self.tolerance),
            ("control_period_ms", self.control_period_ms as f64),
        ];
        for (name, value) in checks {
            // Also rejects NaN.
            if !(value > 0.0) {
                return Err(ParamsError::Invalid { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = NavParams::default();
        assert_eq!(params.cruise_speed, 0.5);
        assert_eq!(params.tolerance, 0.1);
        assert_eq!(params.control_period_ms, 20);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive() {
        let params = NavParams {
            tolerance: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::Invalid {
                name: "tolerance",
                ..
            })
        ));

        let params = NavParams {
            cruise_speed: f64::NAN,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
