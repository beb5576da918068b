//! Top panel: executable path, API key and save button

use eframe::egui::{self, RichText};

use super::app::LauncherApp;
use super::theme::{ACCENT_CYAN, BG_SECONDARY, TEXT_MUTED, TEXT_PRIMARY};

const LABEL_WIDTH: f32 = 150.0;

impl LauncherApp {
    pub(crate) fn render_settings_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("launch_settings")
            .frame(egui::Frame::NONE.fill(BG_SECONDARY).inner_margin(12.0))
            .show(ctx, |ui| {
                ui.label(RichText::new("TradingStar 3").strong().color(ACCENT_CYAN));
                ui.add_space(6.0);

                let field_width = (ui.available_width() - LABEL_WIDTH - 120.0).max(200.0);

                ui.horizontal(|ui| {
                    ui.add_sized(
                        [LABEL_WIDTH, 20.0],
                        egui::Label::new(RichText::new("Путь к приложению").color(TEXT_MUTED)),
                    );
                    ui.add(
                        egui::TextEdit::singleline(&mut self.launch.executable_path)
                            .font(egui::TextStyle::Monospace)
                            .text_color(TEXT_PRIMARY)
                            .hint_text("/path/to/TradingStar3")
                            .desired_width(field_width),
                    );
                    if ui.button("Обзор…").clicked() {
                        self.browse_executable();
                    }
                });

                ui.horizontal(|ui| {
                    ui.add_sized(
                        [LABEL_WIDTH, 20.0],
                        egui::Label::new(RichText::new("API ключ").color(TEXT_MUTED)),
                    );
                    ui.add(
                        egui::TextEdit::singleline(&mut self.launch.api_key)
                            .font(egui::TextStyle::Monospace)
                            .text_color(TEXT_PRIMARY)
                            .password(!self.show_api_key)
                            .desired_width(field_width),
                    );
                    let toggle = if self.show_api_key { "Скрыть" } else { "Показать" };
                    if ui.button(toggle).clicked() {
                        self.show_api_key = !self.show_api_key;
                    }
                });

                ui.add_space(4.0);
                let dirty = self.launch != self.config.launch_config();
                let label = if dirty { "Сохранить *" } else { "Сохранить" };
                if ui.button(label).clicked() {
                    self.save_settings();
                }
            });
    }
}
