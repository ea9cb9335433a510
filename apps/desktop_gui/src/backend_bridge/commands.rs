//! Backend commands queued from UI to backend worker.

use shared::domain::{FareLevel, SurchargeOption};

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    SelectLevel(FareLevel),
    StartTrip { name: String },
    RestartSameUser,
    ToggleState,
    ToggleOption(SurchargeOption),
    FinishTrip,
    ResetApp,
    ShowHistory,
    CloseHistory,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectLevel(_) => "select_level",
            Self::StartTrip { .. } => "start_trip",
            Self::RestartSameUser => "restart_same_user",
            Self::ToggleState => "toggle_state",
            Self::ToggleOption(_) => "toggle_option",
            Self::FinishTrip => "finish_trip",
            Self::ResetApp => "reset_app",
            Self::ShowHistory => "show_history",
            Self::CloseHistory => "close_history",
        }
    }
}
