//! Работа с файловой системой: каталоги, файлы, права доступа

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{ForgeError, Result};

/// Права приватного SSH-ключа
pub const MODE_PRIVATE_KEY: u32 = 0o600;
/// Права публичного SSH-ключа
pub const MODE_PUBLIC_KEY: u32 = 0o644;
/// Права ~/.ssh/config
pub const MODE_SSH_CONFIG: u32 = 0o600;
/// Права ~/.gitconfig
pub const MODE_GIT_CONFIG: u32 = 0o644;

const SRC_DIR: &str = "src";
const SSH_DIR: &str = ".ssh";

/// Раскладка целевых путей относительно домашней директории
#[derive(Debug, Clone)]
pub struct Layout {
    pub home: PathBuf,
}

impl Layout {
    /// Определить домашнюю директорию текущего пользователя
    pub fn discover() -> Result<Self> {
        let home = dirs::home_dir().ok_or(ForgeError::HomeDirNotFound)?;
        Ok(Self { home })
    }

    /// Use an explicit home directory (tests)
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// ~/src - корень дерева исходников
    pub fn src_root(&self) -> PathBuf {
        self.home.join(SRC_DIR)
    }

    /// ~/.ssh - корень ключей
    pub fn ssh_root(&self) -> PathBuf {
        self.home.join(SSH_DIR)
    }

    /// ~/.ssh/config
    pub fn ssh_config_path(&self) -> PathBuf {
        self.ssh_root().join("config")
    }

    /// ~/.gitconfig
    pub fn git_config_path(&self) -> PathBuf {
        self.home.join(".gitconfig")
    }
}

/// Создать директорию вместе с родителями
///
/// Returns true when the directory was created, false when it already
/// existed. Отсутствие прав - фатальная ошибка для текущего аккаунта.
pub fn ensure_dir(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }

    fs::create_dir_all(path).map_err(|e| map_io(path, e))?;
    Ok(true)
}

/// Записать файл и выставить права доступа
pub fn write_file(path: &Path, contents: &str, mode: u32) -> Result<()> {
    let mut file = File::create(path).map_err(|e| map_io(path, e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| map_io(path, e))?;
    file.sync_all().map_err(|e| map_io(path, e))?;

    set_mode(path, mode)
}

/// Выставить права доступа на существующий файл
///
/// На не-Unix платформах POSIX-биты не применимы, операция пустая.
pub fn set_mode(path: &Path, mode: u32) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
            .map_err(|e| map_io(path, e))?;
    }

    #[cfg(not(unix))]
    {
        let _ = (path, mode);
    }

    Ok(())
}

/// Прочитать файл, отсутствующий файл считается пустым
pub fn read_or_empty(path: &Path) -> Result<String> {
    if !path.exists() {
        return Ok(String::new());
    }

    fs::read_to_string(path).map_err(|e| map_io(path, e))
}

fn map_io(path: &Path, e: io::Error) -> ForgeError {
    if e.kind() == io::ErrorKind::PermissionDenied {
        ForgeError::PermissionDenied(path.to_path_buf())
    } else {
        ForgeError::Io(e)
    }
}
