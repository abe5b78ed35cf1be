//! Provider table structures

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ForgeError, Result};

/// A single version-control hosting provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Display name (e.g., "GitHub")
    pub name: String,
    /// Primary host, also the directory name under ~/src and ~/.ssh
    pub host: String,
    /// Host used for SSH connections when it differs from `host`
    /// (Azure DevOps serves SSH from ssh.dev.azure.com)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_host: Option<String>,
    /// Whether accounts must be scoped to an organization
    #[serde(default)]
    pub requires_org: bool,
}

impl Provider {
    /// Create a provider with matching primary and SSH hosts
    pub fn new(name: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            ssh_host: None,
            requires_org: false,
        }
    }

    /// Override the SSH host
    pub fn with_ssh_host(mut self, ssh_host: impl Into<String>) -> Self {
        self.ssh_host = Some(ssh_host.into());
        self
    }

    /// Mark the provider as requiring an organization
    pub fn with_required_org(mut self) -> Self {
        self.requires_org = true;
        self
    }

    /// Host to put into the HostName directive of an SSH config block
    pub fn ssh_hostname(&self) -> &str {
        self.ssh_host.as_deref().unwrap_or(&self.host)
    }
}

/// Таблица поддерживаемых провайдеров
///
/// Передаётся в оркестратор явно, порядок стабилен. Может быть загружена
/// из JSON-файла вместо встроенной.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderTable {
    pub providers: Vec<Provider>,
}

impl Default for ProviderTable {
    fn default() -> Self {
        Self {
            providers: vec![
                Provider::new("Bitbucket", "bitbucket.org"),
                Provider::new("Azure DevOps", "dev.azure.com")
                    .with_ssh_host("ssh.dev.azure.com")
                    .with_required_org(),
                Provider::new("GitHub", "github.com"),
                Provider::new("GitLab", "gitlab.com"),
                Provider::new("SourceForge", "sourceforge.net"),
            ],
        }
    }
}

impl ProviderTable {
    /// Загрузить таблицу из JSON-файла
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let table: ProviderTable = serde_json::from_str(&content)?;
        if table.providers.is_empty() {
            return Err(ForgeError::Other(format!(
                "Таблица провайдеров пуста: {}",
                path.display()
            )));
        }
        Ok(table)
    }

    /// Find a provider by display name or host (case-insensitive)
    pub fn get(&self, name_or_host: &str) -> Option<&Provider> {
        let needle = name_or_host.trim().to_lowercase();
        self.providers
            .iter()
            .find(|p| p.name.to_lowercase() == needle || p.host.to_lowercase() == needle)
    }

    /// Find a provider or fail with UnknownProvider
    #[allow(dead_code)]
    pub fn resolve(&self, name_or_host: &str) -> Result<&Provider> {
        self.get(name_or_host)
            .ok_or_else(|| ForgeError::UnknownProvider(name_or_host.to_string()))
    }

    /// Check if the table is empty
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Get the number of providers
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Iterate over providers in table order
    pub fn iter(&self) -> impl Iterator<Item = &Provider> {
        self.providers.iter()
    }
}
