//! UI layer for desktop GUI: the egui app shell and its three trip screens.

pub mod app;

pub use app::TaximeterApp;
