//! Рендеринг шаблонов конфигурации
//!
//! Шаблоны - обычные текстовые файлы с плейсхолдерами вида {account}.
//! Каталог templates/ ищется рядом с исполняемым файлом, с фолбэком на
//! текущую директорию (удобно при запуске через cargo run).

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ForgeError, Result};

/// SSH host block template
pub const TPL_SSH_HOST: &str = "ssh_host.tmpl";
/// Global gitconfig includeIf block template
pub const TPL_GIT_INCLUDE: &str = "git_include.tmpl";
/// Per-account gitconfig identity template
pub const TPL_GIT_IDENTITY: &str = "git_identity.tmpl";

const TEMPLATE_DIR: &str = "templates";

/// Набор шаблонов в одном каталоге
pub struct TemplateSet {
    dir: PathBuf,
}

impl TemplateSet {
    /// Найти каталог шаблонов: рядом с исполняемым файлом, иначе в cwd
    pub fn locate() -> Result<Self> {
        let exe_dir = get_exe_dir()?;
        let candidate = exe_dir.join(TEMPLATE_DIR);
        if candidate.is_dir() {
            return Ok(Self { dir: candidate });
        }

        Ok(Self {
            dir: PathBuf::from(TEMPLATE_DIR),
        })
    }

    /// Use an explicit template directory
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of a template file inside the set
    pub fn path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Render a template from the set
    pub fn render(&self, file_name: &str, vars: &[(&str, &str)]) -> Result<String> {
        render_file(&self.path(file_name), vars)
    }
}

/// Получить директорию исполняемого файла
fn get_exe_dir() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().map_err(ForgeError::Io)?;

    exe_path
        .parent()
        .map(|p| p.to_path_buf())
        .ok_or_else(|| {
            ForgeError::Other("Не удалось определить директорию исполняемого файла".into())
        })
}

/// Render a template file with the given placeholder mapping
///
/// Fails with [`ForgeError::MissingTemplate`] when the file is absent.
pub fn render_file(path: &Path, vars: &[(&str, &str)]) -> Result<String> {
    if !path.exists() {
        return Err(ForgeError::MissingTemplate(path.to_path_buf()));
    }

    let template = fs::read_to_string(path)?;
    Ok(render_str(&template, vars))
}

/// Substitute {name} placeholders in a template string
///
/// Неизвестные плейсхолдеры остаются как есть.
pub fn render_str(template: &str, vars: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (key, value) in vars {
        rendered = rendered.replace(&format!("{{{}}}", key), value);
    }
    rendered
}
