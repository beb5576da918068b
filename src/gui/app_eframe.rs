//! eframe::App implementation for LauncherApp
//!
//! Contains the main update loop that runs every frame.

use std::time::Duration;

use eframe::egui;

use super::app::LauncherApp;

impl eframe::App for LauncherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply controller acknowledgements and process events
        self.session.poll();
        for notice in self.session.take_notices() {
            self.push_toast(notice);
        }

        self.render_settings_panel(ctx);
        self.render_status_bar(ctx);
        self.render_console(ctx);
        self.render_toast(ctx);

        // Events arrive off the UI thread, keep polling while something can happen
        let interval = if self.session.run_state().is_active() || self.current_toast.is_some() {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(500)
        };
        ctx.request_repaint_after(interval);
    }
}
