//! Local media player access
//!
//! Linux MPRIS players are reached through `playerctl`; each query is a separate
//! short-lived process bounded by a timeout.

pub mod playerctl;
pub mod process;

pub use playerctl::*;
pub use process::*;
