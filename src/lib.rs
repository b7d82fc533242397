//! Jams terminal front end: configuration, logging and dependency wiring
//! around the signup wizard use cases.

pub mod bootstrap;
pub mod cli;
