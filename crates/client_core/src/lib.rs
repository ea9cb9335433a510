//! Client side of the taximeter simulation: trip service access, the trip controller
//! and the rendering seam it drives.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod view;

pub use api::{HttpTripApi, TripApi};
pub use config::{load_settings, Settings};
pub use controller::{ControllerSnapshot, TripController, TripPhase};
pub use error::{ClientError, ClientResult};
pub use view::{ActionLabel, FinishSummary, HistoryRow, Screen, TripView};
