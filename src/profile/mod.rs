//! Normalized scalar motion profiles.
//!
//! Every profile here is a `Path<f64>` over `[0, 1]`. Position profiles map
//! `[0, 1]` onto `[0, 1]` with zero velocity at both ends and can be passed to
//! [`retime`](crate::retime) as a time warp. Velocity and acceleration
//! profiles describe the shape of the derivative signals.
//!
//! | Profile | Continuity of position | Parameters |
//! |---------|------------------------|------------|
//! | Trapezoidal | C¹ (acceleration jumps) | [`TrapezoidalConfig`](crate::TrapezoidalConfig) |
//! | S-curve | C² (jerk limited) | [`SCurveConfig`](crate::SCurveConfig) |
//! | Minimum jerk | C^∞ quintic | none |
//!
//! Piecewise profiles select their phase through an explicit phase enum with
//! precomputed boundaries ([`TrapezoidalPhase`], [`SCurvePhase`]).

mod minimum_jerk;
mod s_curve;
mod trapezoidal;

pub use minimum_jerk::{
    minimum_jerk, minimum_jerk_acceleration_path, minimum_jerk_path, minimum_jerk_velocity_path,
};
pub use s_curve::{
    SCurvePhase, SCurveProfile, s_curve_acceleration_path, s_curve_normalized_position_path,
    s_curve_position_path, s_curve_velocity_path,
};
pub use trapezoidal::{
    TrapezoidalPhase, TrapezoidalProfile, trapezoidal_acceleration_path, trapezoidal_position_path,
    trapezoidal_velocity_path,
};
