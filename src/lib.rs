//! # lane-control
//! Lateral lane-following control for ground robots
//!
//! [`LateralController`] turns the offset between a target and an
//! estimated lateral position into an angular velocity command with a PID
//! law. The controller keeps no memory between ticks: every call takes
//! the previous [`ControlState`] and returns the next one inside its
//! [`ControlOutput`], so independent control loops never share state.
//!
//! # Gains
//! Gains are supplied through a [`GainsProvider`] chosen by the caller:
//! [`StaticGains`] holds a fixed, validated set in memory, while
//! [`FileGains`] re-reads a TOML tuning file on every tick so gains can
//! be adjusted while the robot drives.
//!
//! # Conventions
//! Lateral offsets are in a z-up right-handed frame, positive to the
//! robot's left; a positive angular velocity turns left
//! (counter-clockwise).

mod config;
pub use config::{ConfigError, FileGains, DEFAULT_PATH};

mod gains;
pub use gains::{ControllerGains, GainsProvider, StaticGains};

mod lateral;
pub use lateral::{
    ControlInput, ControlOutput, ControlState, Error, LateralController, INTEGRAL_LIMIT,
};
