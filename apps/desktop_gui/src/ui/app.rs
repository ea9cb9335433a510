use std::time::Duration;

use client_core::Screen;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{FareLevel, SurchargeOption};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        events::UiEvent, orchestration::dispatch_backend_command, reducer::TripScreenState,
    },
};

const MAX_EVENTS_PER_FRAME: usize = 512;

pub struct TaximeterApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: TripScreenState,
    server_url: String,
}

impl TaximeterApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        server_url: impl Into<String>,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            state: TripScreenState::default(),
            server_url: server_url.into(),
        }
    }

    fn process_ui_events(&mut self) {
        for _ in 0..MAX_EVENTS_PER_FRAME {
            match self.ui_rx.try_recv() {
                Ok(event) => self.state.apply(event),
                Err(_) => break,
            }
        }
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.state.status);
    }

    fn show_start_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.heading("Digital Taximeter");
                ui.weak(format!("Trip service: {}", self.server_url));
                ui.add_space(16.0);

                let name_resp = ui.add(
                    egui::TextEdit::singleline(&mut self.state.name_input)
                        .hint_text("Customer name")
                        .desired_width(260.0),
                );

                ui.add_space(12.0);
                ui.label("Fare level");
                let mut selected = None;
                ui.horizontal(|ui| {
                    for level in FareLevel::ALL {
                        let is_selected = self.state.selected_level == level;
                        if ui
                            .selectable_label(is_selected, format!("Lv.{level}"))
                            .clicked()
                            && !is_selected
                        {
                            selected = Some(level);
                        }
                    }
                });
                if let Some(level) = selected {
                    self.dispatch(BackendCommand::SelectLevel(level));
                }

                ui.add_space(16.0);
                let enter_pressed =
                    name_resp.lost_focus() && ctx.input(|i| i.key_pressed(egui::Key::Enter));
                let start_btn = egui::Button::new(egui::RichText::new("Start trip").strong())
                    .min_size(egui::vec2(260.0, 40.0));
                if ui.add(start_btn).clicked() || enter_pressed {
                    let name = self.state.name_input.clone();
                    self.dispatch(BackendCommand::StartTrip { name });
                }

                ui.add_space(8.0);
                if ui.button("Trip history").clicked() {
                    self.dispatch(BackendCommand::ShowHistory);
                }
            });
        });
    }

    fn show_trip_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.label(egui::RichText::new(&self.state.customer).strong().size(18.0));
                ui.label(
                    egui::RichText::new(format!("€ {}", self.state.fare))
                        .monospace()
                        .size(48.0),
                );

                ui.add_space(8.0);
                let action_btn =
                    egui::Button::new(egui::RichText::new(self.state.action_label.text()).strong())
                        .min_size(egui::vec2(200.0, 44.0));
                if ui.add(action_btn).clicked() {
                    self.dispatch(BackendCommand::ToggleState);
                }

                ui.add_space(8.0);
                let mut toggled = None;
                ui.horizontal(|ui| {
                    for option in SurchargeOption::ALL {
                        let active = self.state.option_highlights[option.index()];
                        if ui.selectable_label(active, option.label()).clicked() {
                            toggled = Some(option);
                        }
                    }
                });
                if let Some(option) = toggled {
                    self.dispatch(BackendCommand::ToggleOption(option));
                }

                ui.add_space(8.0);
                if ui.button("Arrive (finish trip)").clicked() {
                    self.dispatch(BackendCommand::FinishTrip);
                }
            });

            ui.separator();
            ui.label(egui::RichText::new("Trip log").strong());
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .max_height(260.0)
                .show(ui, |ui| {
                    for log in &self.state.logs {
                        ui.horizontal(|ui| {
                            ui.monospace(&log.time);
                            ui.label(&log.msg);
                        });
                    }
                });
        });
    }

    fn show_finish_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.heading("Trip finished");
                if let Some(summary) = &self.state.finish {
                    ui.label(egui::RichText::new(&summary.customer).strong().size(18.0));
                    ui.label(
                        egui::RichText::new(format!("€ {}", summary.fare))
                            .monospace()
                            .size(44.0),
                    );
                    ui.add_space(8.0);
                    egui::Grid::new("finish_info")
                        .num_columns(2)
                        .spacing(egui::vec2(16.0, 6.0))
                        .show(ui, |ui| {
                            ui.label("Level");
                            ui.label(&summary.level);
                            ui.end_row();
                            ui.label("Move rate (€/s)");
                            ui.label(&summary.move_rate);
                            ui.end_row();
                            ui.label("Stop rate (€/s)");
                            ui.label(&summary.stop_rate);
                            ui.end_row();
                            ui.label("Options");
                            ui.label(summary.options_text());
                            ui.end_row();
                        });
                }

                ui.add_space(16.0);
                if ui.button("New trip, same customer").clicked() {
                    self.dispatch(BackendCommand::RestartSameUser);
                }
                if ui.button("Trip history").clicked() {
                    self.dispatch(BackendCommand::ShowHistory);
                }
                if ui.button("Reset").clicked() {
                    self.dispatch(BackendCommand::ResetApp);
                }
            });
        });
    }

    fn show_history_window(&mut self, ctx: &egui::Context) {
        if !self.state.history_visible {
            return;
        }

        let mut open = true;
        let mut close_requested = false;
        egui::Window::new("Trip history")
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_width(420.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .max_height(360.0)
                    .show(ui, |ui| {
                        egui::Grid::new("history_table")
                            .num_columns(3)
                            .striped(true)
                            .spacing(egui::vec2(18.0, 4.0))
                            .show(ui, |ui| {
                                ui.strong("Date");
                                ui.strong("Name");
                                ui.strong("Fare");
                                ui.end_row();
                                for row in &self.state.history_rows {
                                    ui.label(&row.date);
                                    ui.label(&row.name);
                                    ui.label(&row.fare);
                                    ui.end_row();
                                }
                            });
                    });
                ui.separator();
                if ui.button("Close").clicked() {
                    close_requested = true;
                }
            });

        if !open || close_requested {
            self.dispatch(BackendCommand::CloseHistory);
            // Hide right away; the backend confirms with the same visibility event.
            self.state.history_visible = false;
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.state.alert.clone() else {
            return;
        };
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    self.state.alert = None;
                }
            });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.state.status).weak());
            });
        });
    }
}

impl eframe::App for TaximeterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_status_bar(ctx);
        match self.state.screen {
            Screen::Start => self.show_start_screen(ctx),
            Screen::Trip => self.show_trip_screen(ctx),
            Screen::Finish => self.show_finish_screen(ctx),
        }
        self.show_history_window(ctx);
        self.show_alert(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
