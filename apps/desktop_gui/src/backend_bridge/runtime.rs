//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{ClientError, HttpTripApi, Settings, TripController};
use crossbeam_channel::{Receiver, Sender};

use crate::{
    backend_bridge::{commands::BackendCommand, view::ChannelView},
    controller::events::{UiError, UiErrorContext, UiEvent},
};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    let startup_tx = ui_tx.clone();
    let spawned = thread::Builder::new()
        .name("taximeter-backend".into())
        .spawn(move || run_backend(cmd_rx, ui_tx, settings));
    if let Err(err) = spawned {
        tracing::error!("failed to spawn backend worker thread: {err}");
        let _ = startup_tx.try_send(UiEvent::Error(UiError::backend_startup(format!(
            "failed to spawn backend worker: {err}"
        ))));
    }
}

fn run_backend(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::backend_startup(format!(
                "failed to build runtime: {err}"
            ))));
            tracing::error!("failed to build backend runtime: {err}");
            return;
        }
    };

    runtime.block_on(async move {
        let api = match HttpTripApi::new(&settings.server_url, settings.request_timeout()) {
            Ok(api) => api,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_client_error(
                    UiErrorContext::BackendStartup,
                    &err,
                )));
                tracing::error!("failed to build trip service client: {err}");
                return;
            }
        };

        let view = Arc::new(ChannelView::new(ui_tx.clone()));
        let controller = TripController::new(Arc::new(api), view, settings.poll_interval());
        tracing::info!(
            server_url = %settings.server_url,
            poll_interval_ms = settings.poll_interval_ms,
            "backend worker ready"
        );
        let _ = ui_tx.try_send(UiEvent::Info(format!(
            "Backend worker ready ({})",
            settings.server_url
        )));

        // One command at a time: user actions never interleave with each other.
        while let Ok(cmd) = cmd_rx.recv() {
            handle_command(&controller, &ui_tx, cmd).await;
        }

        controller.shutdown().await;
        tracing::info!("ui command queue closed; backend worker stopping");
    });
}

async fn handle_command(controller: &TripController, ui_tx: &Sender<UiEvent>, cmd: BackendCommand) {
    tracing::debug!(command = cmd.name(), "backend: handling command");
    match cmd {
        BackendCommand::SelectLevel(level) => controller.select_level(level).await,
        BackendCommand::StartTrip { name } => report(
            ui_tx,
            UiErrorContext::StartTrip,
            controller.start_trip(&name).await,
        ),
        BackendCommand::RestartSameUser => report(
            ui_tx,
            UiErrorContext::StartTrip,
            controller.restart_same_user().await,
        ),
        BackendCommand::ToggleState => report(
            ui_tx,
            UiErrorContext::ToggleState,
            controller.toggle_state().await,
        ),
        BackendCommand::ToggleOption(option) => report(
            ui_tx,
            UiErrorContext::ToggleOption,
            controller.toggle_option(option).await,
        ),
        BackendCommand::FinishTrip => report(
            ui_tx,
            UiErrorContext::FinishTrip,
            controller.finish_trip().await.map(|_| ()),
        ),
        BackendCommand::ResetApp => controller.reset_app().await,
        BackendCommand::ShowHistory => report(
            ui_tx,
            UiErrorContext::History,
            controller.show_history().await.map(|_| ()),
        ),
        BackendCommand::CloseHistory => controller.close_history().await,
    }
}

fn report(ui_tx: &Sender<UiEvent>, context: UiErrorContext, result: Result<(), ClientError>) {
    let Err(err) = result else {
        return;
    };
    if err.is_validation() {
        return;
    }
    tracing::error!(context = ?context, "backend: command failed: {err}");
    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_client_error(context, &err)));
}
