//! # Global Model
//!
//! Zero-dimensional kinetic model of a pulsed atmospheric-pressure humid
//! air discharge. The model owns flat species/reaction arenas addressed by
//! integer index, builds per-species source/loss incidence lists once, then
//! steps the density balance equations with a fixed explicit-Euler scheme
//! through a plasma pulse (Gaussian electron temperature excitation) and
//! the following afterglow, periodically appending samples to a CSV stream
//! that also serves as the restart checkpoint.

/// Model state, incidence construction, balance evaluation and the
/// explicit density update.
pub mod model;
/// Two-phase main loop, electron temperature profile, sample interval
/// policy and cooperative cancellation.
pub mod integrator;
/// Append-only sample stream and checkpoint restore.
pub mod sampling;
/// Background-thread execution handle (start / poll-sample / cancel / join).
pub mod runner;
mod model_tests;
