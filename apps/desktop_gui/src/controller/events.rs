//! UI/backend events and error modeling for desktop GUI controller.

use client_core::{ActionLabel, ClientError, FinishSummary, HistoryRow, Screen};
use shared::{
    domain::{FareLevel, SurchargeOption},
    protocol::LogEntry,
};

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Info(String),
    Error(UiError),
    Alert(String),
    LevelSelected(FareLevel),
    ScreenChanged(Screen),
    CustomerChanged(String),
    FareChanged(String),
    ActionLabelChanged(ActionLabel),
    LogsReplaced(Vec<LogEntry>),
    OptionHighlightChanged {
        option: SurchargeOption,
        active: bool,
    },
    FinishRendered(FinishSummary),
    HistoryVisibilityChanged(bool),
    HistoryRowsReplaced(Vec<HistoryRow>),
    TripCleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Server,
    Protocol,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    StartTrip,
    ToggleState,
    ToggleOption,
    FinishTrip,
    History,
}

impl UiErrorContext {
    fn action(self) -> &'static str {
        match self {
            Self::BackendStartup => "Startup",
            Self::StartTrip => "Starting the trip",
            Self::ToggleState => "Changing taxi state",
            Self::ToggleOption => "Changing surcharge option",
            Self::FinishTrip => "Finishing the trip",
            Self::History => "Loading trip history",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::Http(source) if source.is_status() => UiErrorCategory::Server,
            ClientError::Http(source) if source.is_decode() => UiErrorCategory::Protocol,
            ClientError::Http(_) => UiErrorCategory::Transport,
            ClientError::Decode(_) => UiErrorCategory::Protocol,
            ClientError::MissingCustomerName => UiErrorCategory::Validation,
        };

        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    /// The worker thread or its runtime could not be created.
    pub fn backend_startup(message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Unknown,
            context: UiErrorContext::BackendStartup,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-line status text shown in the footer.
    pub fn status_line(&self) -> String {
        let hint = match self.category {
            UiErrorCategory::Transport => "trip service unreachable; check the server URL",
            UiErrorCategory::Server => "trip service rejected the request",
            UiErrorCategory::Protocol => "trip service sent an unexpected response",
            UiErrorCategory::Validation => "invalid input",
            UiErrorCategory::Unknown => "unexpected failure",
        };
        format!("{} failed: {hint} ({})", self.context.action(), self.message)
    }
}
