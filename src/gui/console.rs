//! Console view of the app's output

use eframe::egui::{self, RichText, ScrollArea};

use super::app::LauncherApp;
use super::theme::{ACCENT_RED, BG_CONSOLE, TEXT_MUTED, TEXT_PRIMARY};

impl LauncherApp {
    pub(crate) fn render_console(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(BG_CONSOLE).inner_margin(8.0))
            .show(ctx, |ui| {
                let output = self.session.output();
                if output.is_empty() {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new("Нет вывода").color(TEXT_MUTED));
                    });
                    return;
                }

                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in output.lines() {
                            let text = line.display_text();
                            let color = if line.is_error() { ACCENT_RED } else { TEXT_PRIMARY };
                            ui.label(
                                RichText::new(text.trim_end_matches(['\r', '\n']))
                                    .monospace()
                                    .color(color),
                            );
                        }
                    });
            });
    }
}
