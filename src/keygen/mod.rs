//! Обёртка над внешним ssh-keygen

use std::io;
use std::path::Path;
use std::process::Command;

use crate::error::{ForgeError, Result};

const DEFAULT_PROGRAM: &str = "ssh-keygen";
const DEFAULT_ALGORITHM: &str = "rsa";
const DEFAULT_BITS: u32 = 4096;

/// Генератор ключевых пар
///
/// Программа, алгоритм и размер ключа - поля, а не константы, чтобы тесты
/// могли подставить заглушку вместо настоящего ssh-keygen.
#[derive(Debug, Clone)]
pub struct Keygen {
    program: String,
    algorithm: String,
    bits: u32,
}

impl Default for Keygen {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            algorithm: DEFAULT_ALGORITHM.to_string(),
            bits: DEFAULT_BITS,
        }
    }
}

impl Keygen {
    /// Override the key generation binary
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Override algorithm and key size
    #[allow(dead_code)]
    pub fn with_algorithm(mut self, algorithm: impl Into<String>, bits: u32) -> Self {
        self.algorithm = algorithm.into();
        self.bits = bits;
        self
    }

    /// Командная строка для вывода пользователю при ошибке
    pub fn describe(&self, key_path: &Path) -> String {
        format!(
            "{} -t {} -b {} -f {}",
            self.program,
            self.algorithm,
            self.bits,
            key_path.display()
        )
    }

    /// Сгенерировать ключевую пару <key_path> и <key_path>.pub
    ///
    /// Существующая пара не перезаписывается (returns false). Passphrase
    /// пустая, ключ генерируется без интерактивного ввода.
    pub fn generate(&self, key_path: &Path, comment: &str) -> Result<bool> {
        if key_path.exists() {
            return Ok(false);
        }

        let output = Command::new(&self.program)
            .arg("-t")
            .arg(&self.algorithm)
            .arg("-b")
            .arg(self.bits.to_string())
            .arg("-f")
            .arg(key_path)
            .arg("-C")
            .arg(comment)
            .arg("-N")
            .arg("")
            .arg("-q")
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => ForgeError::KeygenMissing(self.program.clone()),
                _ => ForgeError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let reason = if stderr.is_empty() {
                format!("код возврата {}", output.status)
            } else {
                stderr
            };
            return Err(ForgeError::KeygenFailed(format!(
                "{}\n  Команда: {}",
                reason,
                self.describe(key_path)
            )));
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn stub_keygen(dir: &Path, script: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-keygen");
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    #[cfg(unix)]
    const OK_SCRIPT: &str = "#!/bin/sh\n\
        while [ $# -gt 0 ]; do\n\
          if [ \"$1\" = \"-f\" ]; then KEY=\"$2\"; fi\n\
          shift\n\
        done\n\
        touch \"$KEY\" \"$KEY.pub\"\n";

    #[cfg(unix)]
    #[test]
    fn test_generate_creates_key_pair() {
        let dir = tempfile::tempdir().unwrap();
        let keygen = Keygen::default().with_program(stub_keygen(dir.path(), OK_SCRIPT));
        let key_path = dir.path().join("alice_rsa");

        assert!(keygen.generate(&key_path, "alice").unwrap());
        assert!(key_path.exists());
        assert!(dir.path().join("alice_rsa.pub").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_generate_skips_existing_key() {
        let dir = tempfile::tempdir().unwrap();
        let keygen = Keygen::default().with_program(stub_keygen(dir.path(), OK_SCRIPT));
        let key_path = dir.path().join("alice_rsa");

        assert!(keygen.generate(&key_path, "alice").unwrap());
        assert!(!keygen.generate(&key_path, "alice").unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_generate_reports_stderr_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let keygen = Keygen::default().with_program(stub_keygen(
            dir.path(),
            "#!/bin/sh\necho 'Too few arguments.' >&2\nexit 1\n",
        ));

        let err = keygen.generate(&dir.path().join("k"), "alice").unwrap_err();
        match err {
            ForgeError::KeygenFailed(reason) => assert!(reason.contains("Too few arguments")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_generate_missing_binary() {
        let dir = tempfile::tempdir().unwrap();
        let keygen = Keygen::default().with_program("profile-forge-no-such-keygen");

        let err = keygen.generate(&dir.path().join("k"), "alice").unwrap_err();
        assert!(matches!(err, ForgeError::KeygenMissing(_)));
    }

    #[test]
    fn test_describe_command_line() {
        let keygen = Keygen::default();
        let line = keygen.describe(Path::new("/home/u/.ssh/github.com/alice/alice_rsa"));
        assert_eq!(
            line,
            "ssh-keygen -t rsa -b 4096 -f /home/u/.ssh/github.com/alice/alice_rsa"
        );
    }
}
