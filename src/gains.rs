use serde::Deserialize;

use crate::config::ConfigError;

/// Proportional, integral, and derivative gains for the lateral controller.
///
/// The fields map one to one onto the keys of the tuning file read by
/// [`FileGains`](crate::FileGains).
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct ControllerGains {
    /// Proportional gain.
    pub kp: f32,
    /// Integral gain.
    pub ki: f32,
    /// Derivative gain.
    pub kd: f32,
}

impl ControllerGains {
    /// Each gain must be finite and non-negative.
    pub(crate) fn validated(self) -> Result<Self, ConfigError> {
        for (name, value) in [("kp", self.kp), ("ki", self.ki), ("kd", self.kd)] {
            if !value.is_finite() || value < 0. {
                return Err(ConfigError::InvalidGain { name, value });
            }
        }
        Ok(self)
    }
}

/// Source of controller gains, chosen by the caller and injected into
/// [`LateralController`](crate::LateralController).
///
/// [`StaticGains`] serves tests and fixed deployments,
/// [`FileGains`](crate::FileGains) re-reads a tuning file so gains can be
/// edited between ticks. A provider is consulted once per control tick.
pub trait GainsProvider {
    fn gains(&self) -> Result<ControllerGains, ConfigError>;
}

/// Fixed gains held in memory.
///
/// Validated once at construction and read without IO afterwards. Being
/// `Copy`, a single value also serves as the read-only snapshot shared by
/// control loops running on separate threads.
#[derive(Clone, Copy, Debug)]
pub struct StaticGains(ControllerGains);

impl StaticGains {
    pub fn new(kp: f32, ki: f32, kd: f32) -> Result<Self, ConfigError> {
        ControllerGains { kp, ki, kd }.validated().map(Self)
    }
}

impl From<ControllerGains> for StaticGains {
    fn from(gains: ControllerGains) -> Self {
        Self(gains)
    }
}

impl GainsProvider for StaticGains {
    fn gains(&self) -> Result<ControllerGains, ConfigError> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{GainsProvider, StaticGains};
    use crate::config::ConfigError;

    #[test]
    fn static_gains_round_trip() {
        let gains = StaticGains::new(6.0, 0.2, 2.5).unwrap().gains().unwrap();

        assert_relative_eq!(gains.kp, 6.0);
        assert_relative_eq!(gains.ki, 0.2);
        assert_relative_eq!(gains.kd, 2.5);
    }

    #[test]
    fn negative_gain_is_rejected() {
        let err = StaticGains::new(6.0, -0.2, 2.5).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidGain { name: "ki", .. }));
    }

    #[test]
    fn non_finite_gain_is_rejected() {
        assert!(StaticGains::new(f32::NAN, 0., 0.).is_err());
        assert!(StaticGains::new(0., 0., f32::INFINITY).is_err());
    }
}
