//! Launcher application state

use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Instant;

use crate::LaunchConfig;
use crate::config::Config;
use crate::session::{Notice, SessionState};

/// Main application state for the launcher window
pub struct LauncherApp {
    /// Where settings are persisted
    pub(super) config_path: PathBuf,
    pub(super) config: Config,
    /// Session tracking the trading app process
    pub(super) session: SessionState,
    /// Launch parameters as currently typed in the form
    pub(super) launch: LaunchConfig,
    /// Reveal the API key in the form
    pub(super) show_api_key: bool,
    /// Notices waiting to be shown as toasts
    pub(super) pending_toasts: VecDeque<Notice>,
    pub(super) current_toast: Option<(Notice, Instant)>,
}

impl LauncherApp {
    pub fn new(config_path: PathBuf, config: Config, session: SessionState) -> Self {
        let launch = config.launch_config();
        Self {
            config_path,
            config,
            session,
            launch,
            show_api_key: false,
            pending_toasts: VecDeque::new(),
            current_toast: None,
        }
    }

    pub(super) fn push_toast(&mut self, notice: Notice) {
        self.pending_toasts.push_back(notice);
    }

    /// Persist the form values as the last used launch parameters
    pub(super) fn save_settings(&mut self) {
        self.config.set_launch_config(&self.launch);
        match self.config.save_to_file(&self.config_path) {
            Ok(()) => self.push_toast(Notice::positive("Настройки сохранены.")),
            Err(e) => {
                tracing::error!("Failed to save settings: {:#}", e);
                self.push_toast(Notice::error(format!("Ошибка сохранения: {}", e)));
            }
        }
    }

    /// Open the native file picker for the executable
    pub(super) fn browse_executable(&mut self) {
        if let Some(path) = pick_executable() {
            tracing::info!("Executable selected: {}", path.display());
            self.launch.executable_path = path.display().to_string();
        }
    }

    /// Copy the console contents to the system clipboard
    pub(super) fn copy_output(&mut self) {
        let content = self.session.output().to_display_string();
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(content)) {
            Ok(()) => self.push_toast(Notice::info("Вывод скопирован в буфер обмена.")),
            Err(e) => {
                tracing::warn!("Clipboard unavailable: {}", e);
                self.push_toast(Notice::error(format!("Не удалось скопировать: {}", e)));
            }
        }
    }
}

#[cfg(target_os = "windows")]
fn pick_executable() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Выберите исполняемый файл TradingStar 3")
        .add_filter("Исполняемые файлы", &["exe"])
        .add_filter("Все файлы", &["*"])
        .pick_file()
}

#[cfg(target_os = "macos")]
fn pick_executable() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Выберите приложение TradingStar 3")
        .pick_file()
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn pick_executable() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Выберите исполняемый файл TradingStar 3")
        .pick_file()
}
