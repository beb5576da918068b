//! Toast notifications for session notices
//!
//! Shows one notice at a time in the top right corner.

use std::time::{Duration, Instant};

use eframe::egui::{self, Align2, Color32, Id, RichText, Vec2};

use super::app::LauncherApp;
use super::theme::{notice_color, BG_SECONDARY};

/// How long a toast is displayed
const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Fade in/out duration in seconds
const FADE_DURATION: f32 = 0.3;

impl LauncherApp {
    pub(crate) fn render_toast(&mut self, ctx: &egui::Context) {
        if self.current_toast.is_none() {
            if let Some(notice) = self.pending_toasts.pop_front() {
                self.current_toast = Some((notice, Instant::now()));
            }
        }

        let Some((notice, start_time)) = &self.current_toast else {
            return;
        };

        let elapsed = start_time.elapsed();
        if elapsed > TOAST_DURATION {
            self.current_toast = None;
            ctx.request_repaint();
            return;
        }

        let progress = elapsed.as_secs_f32();
        let alpha = if progress < FADE_DURATION {
            progress / FADE_DURATION
        } else if progress > TOAST_DURATION.as_secs_f32() - FADE_DURATION {
            (TOAST_DURATION.as_secs_f32() - progress) / FADE_DURATION
        } else {
            1.0
        };

        let accent = notice_color(notice.level);
        let message = notice.message.clone();

        egui::Area::new(Id::new("notice_toast"))
            .anchor(Align2::RIGHT_TOP, Vec2::new(-20.0, 20.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let bg_color = Color32::from_rgba_unmultiplied(
                    BG_SECONDARY.r(),
                    BG_SECONDARY.g(),
                    BG_SECONDARY.b(),
                    (alpha * 240.0) as u8,
                );

                egui::Frame::NONE
                    .fill(bg_color)
                    .stroke(egui::Stroke::new(1.0, accent.gamma_multiply(alpha)))
                    .corner_radius(6.0)
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.set_max_width(360.0);
                        ui.label(RichText::new(message).color(accent.gamma_multiply(alpha)));
                    });
            });

        ctx.request_repaint();
    }
}
