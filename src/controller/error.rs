//! Launch failures reported synchronously by `start`

/// Why the controller refused or failed to start the process
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LaunchError {
    /// A process handle is already held
    #[error("Приложение уже запущено.")]
    AlreadyRunning,

    #[error("Путь к приложению не указан.")]
    MissingPath,

    /// The OS refused to create the process
    #[error("Ошибка запуска команды: {0}")]
    SpawnFailed(String),
}
