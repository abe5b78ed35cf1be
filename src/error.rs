use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ForgeError>;

#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum ForgeError {
    #[error("Файл шаблона не найден: {}", .0.display())]
    MissingTemplate(PathBuf),

    #[error("Нет прав доступа: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("Утилита '{0}' не найдена. Установите OpenSSH и проверьте PATH.")]
    KeygenMissing(String),

    #[error("Генерация ключа завершилась с ошибкой: {0}")]
    KeygenFailed(String),

    #[error("Повреждённый конфигурационный файл {}: {reason}", .path.display())]
    MalformedConfig { path: PathBuf, reason: String },

    #[error("Недопустимое имя аккаунта: '{0}'")]
    InvalidAccountName(String),

    #[error("Неизвестный провайдер: '{0}'")]
    UnknownProvider(String),

    #[error("Провайдер '{0}' требует указания организации")]
    OrganizationRequired(String),

    #[error("Не удалось определить домашнюю директорию")]
    HomeDirNotFound,

    #[error("Операция отменена пользователем")]
    Cancelled,

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ошибка JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}
