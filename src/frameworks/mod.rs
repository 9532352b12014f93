// Frameworks: configuration, logging bootstrap and the command-line entry point.

pub mod cli;
pub mod config;
pub mod telemetry;
