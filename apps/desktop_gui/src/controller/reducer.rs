//! Folds backend events into the state the egui screens render from.

use client_core::{ActionLabel, FinishSummary, HistoryRow, Screen};
use shared::{domain::FareLevel, protocol::LogEntry};

use crate::controller::events::UiEvent;

#[derive(Debug, Clone, PartialEq)]
pub struct TripScreenState {
    pub screen: Screen,
    pub selected_level: FareLevel,
    pub name_input: String,
    pub customer: String,
    pub fare: String,
    pub action_label: ActionLabel,
    pub logs: Vec<LogEntry>,
    pub option_highlights: [bool; 2],
    pub finish: Option<FinishSummary>,
    pub history_visible: bool,
    pub history_rows: Vec<HistoryRow>,
    pub alert: Option<String>,
    pub status: String,
}

impl Default for TripScreenState {
    fn default() -> Self {
        Self {
            screen: Screen::Start,
            selected_level: FareLevel::default(),
            name_input: String::new(),
            customer: String::new(),
            fare: "0.00".to_string(),
            action_label: ActionLabel::Stop,
            logs: Vec::new(),
            option_highlights: [false; 2],
            finish: None,
            history_visible: false,
            history_rows: Vec::new(),
            alert: None,
            status: "Starting...".to_string(),
        }
    }
}

impl TripScreenState {
    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => self.status = message,
            UiEvent::Error(err) => self.status = err.status_line(),
            UiEvent::Alert(message) => self.alert = Some(message),
            UiEvent::LevelSelected(level) => self.selected_level = level,
            UiEvent::ScreenChanged(screen) => self.screen = screen,
            UiEvent::CustomerChanged(name) => self.customer = name,
            UiEvent::FareChanged(fare) => self.fare = fare,
            UiEvent::ActionLabelChanged(label) => self.action_label = label,
            UiEvent::LogsReplaced(logs) => self.logs = logs,
            UiEvent::OptionHighlightChanged { option, active } => {
                self.option_highlights[option.index()] = active;
            }
            UiEvent::FinishRendered(summary) => self.finish = Some(summary),
            UiEvent::HistoryVisibilityChanged(visible) => self.history_visible = visible,
            UiEvent::HistoryRowsReplaced(rows) => self.history_rows = rows,
            UiEvent::TripCleared => {
                let status = std::mem::take(&mut self.status);
                *self = Self {
                    status,
                    ..Self::default()
                };
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
