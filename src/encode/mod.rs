//! Output collaborators.
//!
//! Sinks consume a finished frame sequence in order and persist it.

/// Looping GIF output.
pub mod gif;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
