//! Ports (trait boundaries) between the core and its collaborators.
//!
//! The training driver, evaluation matches and interactive sessions talk to
//! move sources and event sinks only through these traits.

pub mod agent;
pub mod observer;

pub use agent::Agent;
pub use observer::Observer;
