//! Backend worker: owns the tokio runtime and the trip controller.

pub mod commands;
pub mod runtime;
pub mod view;
