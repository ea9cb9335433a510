//! Trip lifecycle, polling loop and view synchronisation.

use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use shared::{
    domain::{FareLevel, SurchargeOption, TripState},
    protocol::{LiveSnapshot, TripMeta},
};
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{
    api::TripApi,
    config::DEFAULT_POLL_INTERVAL_MS,
    error::{ClientError, ClientResult},
    view::{
        format_fare, ActionLabel, FinishSummary, HistoryRow, Screen, TripView,
        MISSING_NAME_ALERT,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TripPhase {
    #[default]
    Idle,
    TripActive,
    Finished,
}

/// Read-only copy of the controller state.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSnapshot {
    pub phase: TripPhase,
    pub screen: Screen,
    pub level: FareLevel,
    pub customer_name: String,
    pub trip_state: TripState,
    pub last_meta: Option<TripMeta>,
    pub option_highlights: [bool; 2],
    pub history_visible: bool,
    pub polling: bool,
    pub generation: u64,
}

#[derive(Default)]
struct ControllerState {
    phase: TripPhase,
    screen: Screen,
    level: FareLevel,
    customer_name: String,
    trip_state: TripState,
    last_meta: Option<TripMeta>,
    option_highlights: [bool; 2],
    /// Bumped on every trip transition; responses issued under an older value are dropped.
    generation: u64,
    history_visible: bool,
    poll_task: Option<JoinHandle<()>>,
}

impl ControllerState {
    fn cancel_polling(&mut self) {
        if let Some(task) = self.poll_task.take() {
            task.abort();
        }
    }

    fn replace_poll_task(&mut self, inner: &Arc<ControllerInner>, interval: Duration) {
        self.cancel_polling();
        self.poll_task = Some(tokio::spawn(poll_loop(Arc::downgrade(inner), interval)));
        debug!(interval_ms = interval.as_millis() as u64, "poll loop started");
    }
}

struct ControllerInner {
    api: Arc<dyn TripApi>,
    view: Arc<dyn TripView>,
    poll_interval: Duration,
    state: Mutex<ControllerState>,
}

/// Drives one trip UI. Cloning yields another handle to the same controller.
#[derive(Clone)]
pub struct TripController {
    inner: Arc<ControllerInner>,
}

impl TripController {
    pub fn new(api: Arc<dyn TripApi>, view: Arc<dyn TripView>, poll_interval: Duration) -> Self {
        let poll_interval = if poll_interval.is_zero() {
            Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
        } else {
            poll_interval
        };
        Self {
            inner: Arc::new(ControllerInner {
                api,
                view,
                poll_interval,
                state: Mutex::new(ControllerState::default()),
            }),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.inner.poll_interval
    }

    pub async fn snapshot(&self) -> ControllerSnapshot {
        let state = self.inner.state.lock().await;
        ControllerSnapshot {
            phase: state.phase,
            screen: state.screen,
            level: state.level,
            customer_name: state.customer_name.clone(),
            trip_state: state.trip_state,
            last_meta: state.last_meta.clone(),
            option_highlights: state.option_highlights,
            history_visible: state.history_visible,
            polling: state
                .poll_task
                .as_ref()
                .is_some_and(|task| !task.is_finished()),
            generation: state.generation,
        }
    }

    pub async fn select_level(&self, level: FareLevel) {
        let mut state = self.inner.state.lock().await;
        state.level = level;
        self.inner.view.show_selected_level(level);
    }

    pub async fn switch_screen(&self, screen: Screen) {
        let mut state = self.inner.state.lock().await;
        state.screen = screen;
        self.inner.view.switch_screen(screen);
    }

    pub async fn start_trip(&self, name: &str) -> ClientResult<()> {
        let name = name.trim();
        if name.is_empty() {
            self.inner.view.alert(MISSING_NAME_ALERT);
            return Err(ClientError::MissingCustomerName);
        }

        let level = {
            let mut state = self.inner.state.lock().await;
            state.customer_name = name.to_string();
            state.level
        };
        self.initiate_trip(name, level).await
    }

    /// Starts a new level 1 trip for the customer of the previous one.
    pub async fn restart_same_user(&self) -> ClientResult<()> {
        let (name, level) = {
            let mut state = self.inner.state.lock().await;
            state.level = FareLevel::default();
            self.inner.view.show_selected_level(state.level);
            (state.customer_name.clone(), state.level)
        };
        self.initiate_trip(&name, level).await
    }

    async fn initiate_trip(&self, name: &str, level: FareLevel) -> ClientResult<()> {
        self.inner.api.start_trip(name, level).await?;
        info!(customer = name, level = level.get(), "trip started");

        {
            let mut state = self.inner.state.lock().await;
            state.generation += 1;
            state.phase = TripPhase::TripActive;
            state.screen = Screen::Trip;
            state.trip_state = TripState::Moving;
            state.last_meta = None;
            state.option_highlights = [false; 2];

            let view = &self.inner.view;
            view.switch_screen(Screen::Trip);
            view.set_trip_customer(name);
            view.set_action_label(ActionLabel::Stop);
            view.set_fare(&format_fare(0.0));
            view.set_logs(&[]);
            for option in SurchargeOption::ALL {
                view.set_option_highlight(option, false);
            }
            state.replace_poll_task(&self.inner, self.inner.poll_interval);
        }

        self.fetch_data().await;
        Ok(())
    }

    /// Replaces any running poll loop: one poll now, then one every `interval`.
    pub async fn start_update_loop(&self, interval: Duration) {
        let interval = if interval.is_zero() {
            self.inner.poll_interval
        } else {
            interval
        };

        self.inner
            .state
            .lock()
            .await
            .replace_poll_task(&self.inner, interval);
        self.fetch_data().await;
    }

    /// Polls once. Failures are logged and leave the view untouched.
    pub async fn fetch_data(&self) {
        let generation = self.inner.state.lock().await.generation;

        match self.inner.api.fetch_update().await {
            Ok(snapshot) => self.apply_snapshot(generation, snapshot).await,
            Err(err) => warn!("update error: {err}"),
        }
    }

    async fn apply_snapshot(&self, generation: u64, snapshot: LiveSnapshot) {
        let mut state = self.inner.state.lock().await;
        if state.generation != generation {
            debug!(
                issued = generation,
                current = state.generation,
                "discarding stale trip update"
            );
            return;
        }

        let view = &self.inner.view;
        view.set_fare(&format_fare(snapshot.fare));
        view.set_logs(&snapshot.logs);
        view.set_action_label(ActionLabel::for_state(snapshot.state));
        state.trip_state = snapshot.state;
        // Meta is only rendered at finish; option highlights stay as the client requested them.
        if let Some(meta) = snapshot.meta {
            state.last_meta = Some(meta);
        }
    }

    pub async fn toggle_state(&self) -> ClientResult<()> {
        self.inner.api.toggle_state().await?;
        self.fetch_data().await;
        Ok(())
    }

    /// Flips the option highlight right away, then asks the service to match it.
    pub async fn toggle_option(&self, option: SurchargeOption) -> ClientResult<()> {
        let idx = option.index();
        let (active, generation) = {
            let mut state = self.inner.state.lock().await;
            let active = !state.option_highlights[idx];
            state.option_highlights[idx] = active;
            self.inner.view.set_option_highlight(option, active);
            (active, state.generation)
        };

        let result = self.inner.api.toggle_option(option, active).await;

        if let Err(err) = &result {
            let mut state = self.inner.state.lock().await;
            if state.generation == generation && state.option_highlights[idx] == active {
                warn!(option = option.wire_name(), "option toggle failed, reverting: {err}");
                state.option_highlights[idx] = !active;
                self.inner.view.set_option_highlight(option, !active);
            }
        }

        result?;
        self.fetch_data().await;
        Ok(())
    }

    pub async fn finish_trip(&self) -> ClientResult<FinishSummary> {
        let generation = {
            let mut state = self.inner.state.lock().await;
            state.cancel_polling();
            state.generation += 1;
            state.generation
        };

        let fare = self.inner.api.stop_trip().await?;

        let mut state = self.inner.state.lock().await;
        let summary = FinishSummary::new(&state.customer_name, fare, state.last_meta.as_ref());
        if state.generation != generation {
            debug!("trip was reset while stopping; finish screen not shown");
            return Ok(summary);
        }
        if state.last_meta.is_none() {
            warn!("no trip statistics received before finish; showing placeholders");
        }

        state.phase = TripPhase::Finished;
        state.screen = Screen::Finish;
        self.inner.view.render_finish(&summary);
        self.inner.view.switch_screen(Screen::Finish);
        info!(customer = %summary.customer, fare = %summary.fare, "trip finished");
        Ok(summary)
    }

    /// Drops every piece of client state and returns to the start screen.
    pub async fn reset_app(&self) {
        let mut state = self.inner.state.lock().await;
        state.cancel_polling();
        let generation = state.generation + 1;
        *state = ControllerState {
            generation,
            ..ControllerState::default()
        };

        let view = &self.inner.view;
        view.clear_trip();
        view.show_selected_level(state.level);
        for option in SurchargeOption::ALL {
            view.set_option_highlight(option, false);
        }
        view.set_history_visible(false);
        view.switch_screen(Screen::Start);
        info!("application reset");
    }

    pub async fn show_history(&self) -> ClientResult<Vec<HistoryRow>> {
        {
            let mut state = self.inner.state.lock().await;
            state.history_visible = true;
            self.inner.view.set_history_visible(true);
        }

        let records = self.inner.api.history().await?;
        let rows: Vec<HistoryRow> = records.iter().map(HistoryRow::from).collect();
        self.inner.view.set_history_rows(&rows);
        Ok(rows)
    }

    pub async fn close_history(&self) {
        let mut state = self.inner.state.lock().await;
        state.history_visible = false;
        self.inner.view.set_history_visible(false);
    }

    /// Stops polling. The controller stays usable; a later trip start polls again.
    pub async fn shutdown(&self) {
        self.inner.state.lock().await.cancel_polling();
    }
}

async fn poll_loop(controller: Weak<ControllerInner>, interval: Duration) {
    let mut ticker = interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let Some(inner) = controller.upgrade() else {
            break;
        };
        TripController { inner }.fetch_data().await;
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
