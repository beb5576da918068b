//! GUI runner - launches the launcher window

use anyhow::Result;
use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::info;

use super::app::LauncherApp;
use super::theme;
use crate::config::Config;
use crate::controller::ProcessController;
use crate::session::SessionState;

/// Run the launcher window until it is closed.
///
/// Controller tasks run on `runtime`; the window itself blocks the calling thread.
pub fn run_gui(config_path: PathBuf, runtime: Handle) -> Result<()> {
    let config = Config::load_or_default(&config_path);

    let controller = Arc::new(ProcessController::new(runtime.clone()));
    let session = SessionState::new(controller, runtime, config.session);

    info!("Opening launcher window (config: {})", config_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("TradingStar 3 Launcher")
            .with_inner_size([1000.0, 600.0])
            .with_min_inner_size([640.0, 360.0])
            .with_decorations(true)
            .with_resizable(true),
        centered: true,
        ..Default::default()
    };

    let app = LauncherApp::new(config_path, config, session);

    eframe::run_native(
        "ts-launcher",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(theme::launcher_visuals());
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))?;

    Ok(())
}
