//! Composable paths and trajectories for robot motion.
//!
//! A [`Path`] is an immutable function over a closed scalar interval. Values
//! can be scalars, 2D/3D vectors, orientations (3×3 rotation matrices) or
//! poses (4×4 homogeneous transforms). Paths whose domain starts at 0 are
//! called *trajectories* and read their parameter as elapsed time.
//!
//! The crate provides:
//!
//! - **Builders**: [`linear_trajectory`], circular arcs
//!   ([`circular_arc_trajectory`]), Bézier and Hermite segments, splines
//!   ([`catmull_rom_path`], [`uniform_bspline_path`]) and keyframe slerp
//!   ([`slerp_trajectory`])
//! - **Combinators**: [`concatenate`], [`combine`] / [`split`],
//!   [`scale_speed`], [`synchronize`] and [`retime`]
//! - **Motion profiles**: trapezoidal, S-curve and minimum-jerk scalar paths
//!   in [`profile`]
//! - **Transforms**: numeric [`differentiated`] / [`integrated`] paths and
//!   [`arc_length_parametrize`]
//! - **Compound motions**: gripper retreats, dual-arm rotation and the
//!   [`circular_fold_trajectory`]
//!
//! # Example
//!
//! ```
//! use trajectory_types::{
//!     Matrix3, Vector3, combine, constant_trajectory, linear_trajectory, minimum_jerk_path,
//!     retime,
//! };
//!
//! // Position moves 0.5 m at 0.25 m/s, orientation stays fixed
//! let position = linear_trajectory(Vector3::zeros(), Vector3::new(0.5, 0.0, 0.0), 0.25).unwrap();
//! let orientation = constant_trajectory(Matrix3::identity(), position.duration()).unwrap();
//! let pose = combine(&orientation, &position).unwrap();
//! assert_eq!(pose.duration(), 2.0);
//!
//! // Same geometry, but starting and stopping smoothly over 3 s
//! let smooth = retime(&position, &minimum_jerk_path(), 3.0).unwrap();
//! assert_eq!(smooth.end(), position.end());
//! ```
//!
//! # Evaluation Policy
//!
//! [`Path::value_at`] clamps its parameter into the domain and never
//! extrapolates. [`Path::try_value_at`] is the strict variant.
//!
//! # Coordinate System
//!
//! Right-handed, Z up. Gripper orientations use local +Z as the forward
//! (approach) direction and local X as the opening direction.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for all configuration types

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::many_single_char_names,
    clippy::similar_names,
    clippy::cast_possible_truncation,
    clippy::too_many_lines,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::suboptimal_flops,
    clippy::missing_const_for_fn,
    clippy::cast_lossless,
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    clippy::module_name_repetitions,
    clippy::needless_pass_by_value,
    clippy::option_if_let_else,
    clippy::items_after_statements,
    clippy::uninlined_format_args,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::needless_range_loop,
    clippy::float_cmp,
    clippy::imprecise_flops,
    clippy::return_self_not_must_use
)]

mod arc;
mod arc_length;
mod bezier;
mod calculus;
mod config;
mod error;
mod geometry;
mod linear;
mod motion;
mod ops;
mod path;
pub mod profile;
mod slerp;
mod spline;
mod value;

// Re-export core types
pub use arc::{
    circular_arc_orientation_path, circular_arc_path, circular_arc_position_path,
    circular_arc_position_trajectory, circular_arc_trajectory,
};
pub use arc_length::{
    ArcLengthTable, arc_length_parametrize, arc_length_parametrize_with,
    create_arc_length_to_parameter_map, integrate_arc_length,
};
pub use bezier::{cubic_bezier_path, hermite_path, quadratic_bezier_path};
pub use calculus::{differentiated, integrated};
pub use config::{
    ArcLengthConfig, DifferentiationConfig, QuadratureConfig, SCurveConfig, TrapezoidalConfig,
};
pub use error::PathError;
pub use geometry::{
    ROTATION_TOLERANCE, distance_to_line, flat_orientation, orientation_of,
    pitch_gripper_orientation, pose_from_parts, position_of, project_point_on_line,
    rotate_orientation, rotate_point, rotate_pose, rotate_vector, top_down_orientation,
    validate_pose, validate_rotation,
};
pub use linear::{constant_trajectory, linear_path, linear_trajectory};
pub use motion::{
    FoldConfig, circular_fold_trajectory, linear_constant_orientation_trajectory,
    linear_slerp_trajectory, move_gripper_backwards_trajectory, rotate_pair_trajectories,
    slide_gripper_backwards_trajectory,
};
pub use ops::{combine, concatenate, retime, scale_speed, split, synchronize};
pub use path::Path;
pub use profile::{
    SCurvePhase, SCurveProfile, TrapezoidalPhase, TrapezoidalProfile, minimum_jerk,
    minimum_jerk_acceleration_path, minimum_jerk_path, minimum_jerk_velocity_path,
    s_curve_acceleration_path, s_curve_normalized_position_path, s_curve_position_path,
    s_curve_velocity_path, trapezoidal_acceleration_path, trapezoidal_position_path,
    trapezoidal_velocity_path,
};
pub use slerp::slerp_trajectory;
pub use spline::{bspline_path, cardinal_path, catmull_rom_path, uniform_bspline_path};
pub use value::VectorValue;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix3, Matrix4, Vector2, Vector3};

/// Result type for path operations.
pub type Result<T> = std::result::Result<T, PathError>;
