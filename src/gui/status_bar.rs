//! Status bar component for the GUI
//!
//! Renders the run state and the start/stop/clear/copy controls.

use eframe::egui::{self, RichText};

use super::app::LauncherApp;
use super::theme::{run_state_color, BG_SECONDARY, TEXT_DIM, TEXT_MUTED};
use crate::RunState;

impl LauncherApp {
    pub(crate) fn render_status_bar(&mut self, ctx: &egui::Context) {
        let state = self.session.run_state();

        egui::TopBottomPanel::bottom("status_bar")
            .frame(egui::Frame::NONE.fill(BG_SECONDARY).inner_margin(6.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let status =
                        status_label(state, self.session.is_stopping(), self.session.pid());
                    ui.label(RichText::new(status).monospace().color(run_state_color(state)));

                    if state == RunState::Stopped {
                        if let Some(exit) = self.session.last_exit() {
                            let text = match exit {
                                Some(code) => format!("код завершения: {}", code),
                                None => "код завершения неизвестен".to_string(),
                            };
                            ui.label(RichText::new(text).small().color(TEXT_MUTED));
                        }
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let can_stop = state.is_active() && !self.session.is_stopping();
                        if ui.add_enabled(can_stop, egui::Button::new("Остановить")).clicked() {
                            self.session.request_stop();
                        }
                        if ui
                            .add_enabled(state == RunState::Stopped, egui::Button::new("Запустить"))
                            .clicked()
                        {
                            let launch = self.launch.clone();
                            self.session.request_start(&launch);
                        }

                        ui.separator();

                        let has_output = !self.session.output().is_empty();
                        if ui.add_enabled(has_output, egui::Button::new("Копировать")).clicked() {
                            self.copy_output();
                        }
                        if ui.add_enabled(has_output, egui::Button::new("Очистить")).clicked() {
                            self.session.clear_output();
                        }
                        ui.label(
                            RichText::new(format!(
                                "{}/{}",
                                self.session.output().len(),
                                self.session.output().capacity()
                            ))
                            .small()
                            .color(TEXT_DIM),
                        );
                    });
                });
            });
    }
}

/// Text of the run state indicator
fn status_label(state: RunState, stopping: bool, pid: Option<u32>) -> String {
    match state {
        RunState::Stopped => "● Остановлен".to_string(),
        _ if stopping => "● Остановка…".to_string(),
        RunState::Starting => "● Запуск…".to_string(),
        RunState::Running => match pid {
            Some(pid) => format!("● Запущен (PID {})", pid),
            None => "● Запущен".to_string(),
        },
    }
}
