use thiserror::Error;

use crate::config::ConfigError;
use crate::gains::{ControllerGains, GainsProvider};

/// Bound on the integral term. Accumulation stops here regardless of the
/// gains, so a persistent error cannot wind the command up without limit.
pub const INTEGRAL_LIMIT: f32 = 2.0;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The derivative and integral are undefined without a positive time
    /// step, so the tick is rejected before any arithmetic runs.
    #[error("time delta must be positive, got {0}")]
    TimeDelta(f32),
}

/// Per-tick tracking inputs.
///
/// Positions are lateral offsets from the lane reference in a z-up
/// right-handed frame: positive is to the robot's left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlInput {
    /// Linear speed, passed through to the output unchanged.
    pub forward_speed: f32,
    /// Target lateral position.
    pub target_position: f32,
    /// Estimated lateral position from localization.
    pub estimated_position: f32,
    /// Seconds since the previous tick. Must be positive.
    pub time_delta: f32,
}

/// Error state threaded between ticks.
///
/// The controller keeps no memory of its own: each call receives the state
/// returned by the previous one and hands back the next inside
/// [`ControlOutput`]. Every control loop owns exactly one of these;
/// [`ControlState::default`] is the starting point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlState {
    /// Lateral error at the previous tick.
    pub error: f32,
    /// Time integral of the error, within ±[`INTEGRAL_LIMIT`].
    pub integral: f32,
}

/// Steering command and the state to carry into the next tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlOutput {
    /// Echo of the input forward speed.
    pub forward_speed: f32,
    /// Steering command in radians per second. Positive turns left
    /// (counter-clockwise), matching a target left of the estimate.
    pub angular_velocity: f32,
    /// Becomes the previous state on the caller's next call.
    pub state: ControlState,
}

impl ControllerGains {
    /// PID law on the lateral offset.
    ///
    /// Computes `error = target - estimate`, accumulates the clamped
    /// integral, differentiates against the previous error, and weights
    /// the three terms into an angular velocity. The updated error pair
    /// rides along in the output.
    pub fn steering_control(
        &self,
        input: ControlInput,
        state: ControlState,
    ) -> Result<ControlOutput, Error> {
        if input.time_delta <= 0. {
            return Err(Error::TimeDelta(input.time_delta));
        }

        let error = input.target_position - input.estimated_position;
        let integral =
            (state.integral + error * input.time_delta).clamp(-INTEGRAL_LIMIT, INTEGRAL_LIMIT);
        let derivative = (error - state.error) / input.time_delta;

        let angular_velocity = self.kp * error + self.ki * integral + self.kd * derivative;

        Ok(ControlOutput {
            forward_speed: input.forward_speed,
            angular_velocity,
            state: ControlState { error, integral },
        })
    }
}

/// Lane-following steering controller.
///
/// Pairs the PID law with an injected gains source: the arithmetic lives
/// on [`ControllerGains::steering_control`], this wrapper only decides
/// where the gains come from on each tick.
///
/// ```
/// use lane_control::{ControlInput, ControlState, LateralController, StaticGains};
///
/// let controller = LateralController::new(StaticGains::new(6.0, 0.2, 2.5).unwrap());
/// let mut state = ControlState::default();
///
/// let output = controller
///     .steering_control(
///         ControlInput {
///             forward_speed: 0.35,
///             target_position: 0.0,
///             estimated_position: -0.04,
///             time_delta: 0.05,
///         },
///         state,
///     )
///     .unwrap();
/// state = output.state;
/// ```
pub struct LateralController<G> {
    gains: G,
}

impl<G: GainsProvider> LateralController<G> {
    pub fn new(gains: G) -> Self {
        Self { gains }
    }

    /// Compute the steering command for one tick.
    pub fn steering_control(
        &self,
        input: ControlInput,
        state: ControlState,
    ) -> Result<ControlOutput, Error> {
        let gains = self.gains.gains()?;
        gains.steering_control(input, state)
    }
}
