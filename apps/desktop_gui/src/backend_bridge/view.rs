//! `TripView` implementation that forwards every render call to the UI thread.

use client_core::{ActionLabel, FinishSummary, HistoryRow, Screen, TripView};
use crossbeam_channel::{Sender, TrySendError};
use shared::{
    domain::{FareLevel, SurchargeOption},
    protocol::LogEntry,
};

use crate::controller::events::UiEvent;

pub struct ChannelView {
    ui_tx: Sender<UiEvent>,
}

impl ChannelView {
    pub fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self { ui_tx }
    }

    fn emit(&self, event: UiEvent) {
        match self.ui_tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!("ui event queue is full; dropping render update")
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("ui event queue closed; render update ignored")
            }
        }
    }
}

impl TripView for ChannelView {
    fn show_selected_level(&self, level: FareLevel) {
        self.emit(UiEvent::LevelSelected(level));
    }

    fn switch_screen(&self, screen: Screen) {
        self.emit(UiEvent::ScreenChanged(screen));
    }

    fn set_trip_customer(&self, name: &str) {
        self.emit(UiEvent::CustomerChanged(name.to_string()));
    }

    fn set_fare(&self, fare: &str) {
        self.emit(UiEvent::FareChanged(fare.to_string()));
    }

    fn set_action_label(&self, label: ActionLabel) {
        self.emit(UiEvent::ActionLabelChanged(label));
    }

    fn set_logs(&self, logs: &[LogEntry]) {
        self.emit(UiEvent::LogsReplaced(logs.to_vec()));
    }

    fn set_option_highlight(&self, option: SurchargeOption, active: bool) {
        self.emit(UiEvent::OptionHighlightChanged { option, active });
    }

    fn render_finish(&self, summary: &FinishSummary) {
        self.emit(UiEvent::FinishRendered(summary.clone()));
    }

    fn set_history_visible(&self, visible: bool) {
        self.emit(UiEvent::HistoryVisibilityChanged(visible));
    }

    fn set_history_rows(&self, rows: &[HistoryRow]) {
        self.emit(UiEvent::HistoryRowsReplaced(rows.to_vec()));
    }

    fn alert(&self, message: &str) {
        self.emit(UiEvent::Alert(message.to_string()));
    }

    fn clear_trip(&self) {
        self.emit(UiEvent::TripCleared);
    }
}
