//! Rendering seam between the trip controller and whatever draws the screens.

use shared::{
    domain::{FareLevel, SurchargeOption, TripState},
    protocol::{HistoryRecord, LogEntry, TripMeta},
};

pub const PLACEHOLDER: &str = "-";
pub const CURRENCY_PREFIX: &str = "€";
pub const MISSING_NAME_ALERT: &str = "Please enter name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Start,
    Trip,
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionLabel {
    Stop,
    Move,
}

impl ActionLabel {
    pub fn for_state(state: TripState) -> Self {
        match state {
            TripState::Moving => Self::Stop,
            TripState::Stopped => Self::Move,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::Stop => "STOP",
            Self::Move => "MOVE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub date: String,
    pub name: String,
    pub fare: String,
}

impl From<&HistoryRecord> for HistoryRow {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            date: record.date.clone(),
            name: record.name.clone(),
            fare: format!("{CURRENCY_PREFIX} {}", record.fare),
        }
    }
}

/// Everything the finish screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishSummary {
    pub customer: String,
    pub fare: String,
    pub level: String,
    pub move_rate: String,
    pub stop_rate: String,
    pub options: Vec<String>,
}

impl FinishSummary {
    pub fn new(customer: &str, fare: f64, meta: Option<&TripMeta>) -> Self {
        match meta {
            Some(meta) => Self {
                customer: customer.to_string(),
                fare: format_fare(fare),
                level: meta.level.to_string(),
                move_rate: format_rate(meta.move_rate),
                stop_rate: format_rate(meta.stop_rate),
                options: meta.active_options.clone(),
            },
            None => Self {
                customer: customer.to_string(),
                fare: format_fare(fare),
                level: PLACEHOLDER.to_string(),
                move_rate: PLACEHOLDER.to_string(),
                stop_rate: PLACEHOLDER.to_string(),
                options: Vec::new(),
            },
        }
    }

    /// Active options one per line, or the placeholder when none were active.
    pub fn options_text(&self) -> String {
        if self.options.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            self.options.join("\n")
        }
    }
}

pub fn format_fare(fare: f64) -> String {
    format!("{fare:.2}")
}

pub fn format_rate(rate: f64) -> String {
    format!("{rate:.3}")
}

/// Display surface driven by [`crate::TripController`].
///
/// Calls arrive in the order state changes happen and each call replaces what the
/// corresponding element showed before.
pub trait TripView: Send + Sync {
    /// Exactly one level control is selected afterwards.
    fn show_selected_level(&self, level: FareLevel);
    /// Exactly one screen is active afterwards.
    fn switch_screen(&self, screen: Screen);
    fn set_trip_customer(&self, name: &str);
    fn set_fare(&self, fare: &str);
    fn set_action_label(&self, label: ActionLabel);
    fn set_logs(&self, logs: &[LogEntry]);
    fn set_option_highlight(&self, option: SurchargeOption, active: bool);
    fn render_finish(&self, summary: &FinishSummary);
    fn set_history_visible(&self, visible: bool);
    fn set_history_rows(&self, rows: &[HistoryRow]);
    fn alert(&self, message: &str);
    /// Blank trip and finish fields, used when the application is reset.
    fn clear_trip(&self);
}
