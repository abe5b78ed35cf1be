//! Account structures and path derivation

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ForgeError, Result};

use super::Provider;

/// Максимальная длина имени аккаунта (и организации)
pub const MAX_NAME_LEN: usize = 32;

/// An identity scoped to a provider and optional organization
///
/// All paths and config identifiers are derived from here, so the
/// (provider, org, account) triple maps to exactly one config key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Account name as used by the provider (e.g., "alice")
    pub name: String,
    /// Provider this account belongs to
    pub provider: Provider,
    /// Optional organization scoping the account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    /// Email for the git identity
    #[serde(default)]
    pub email: String,
}

impl Account {
    /// Create a new account, validating names against filesystem rules
    pub fn new(provider: &Provider, name: &str, org: Option<&str>) -> Result<Self> {
        let name = sanitize_name(name)?;
        let org = match org {
            Some(o) if !o.trim().is_empty() => Some(sanitize_name(o)?),
            _ => None,
        };

        if provider.requires_org && org.is_none() {
            return Err(ForgeError::OrganizationRequired(provider.name.clone()));
        }

        Ok(Self {
            name,
            provider: provider.clone(),
            org,
            email: String::new(),
        })
    }

    /// Set the git identity email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Email to put into the git identity, with a host-derived fallback
    pub fn git_email(&self) -> String {
        if self.email.is_empty() {
            format!("{}@{}", self.name, self.provider.host)
        } else {
            self.email.clone()
        }
    }

    /// Host alias for the SSH config block
    ///
    /// Обычный вид: <аккаунт>.<хост>. Для провайдеров с обязательной
    /// организацией (Azure DevOps): <организация>.<аккаунт>.<хост>.
    pub fn host_alias(&self) -> String {
        match (&self.org, self.provider.requires_org) {
            (Some(org), true) => format!("{}.{}.{}", org, self.name, self.provider.host),
            _ => format!("{}.{}", self.name, self.provider.host),
        }
    }

    /// Composite key identifying this account's config blocks
    #[allow(dead_code)]
    pub fn config_key(&self) -> String {
        self.host_alias()
    }

    /// Key file name without extension (e.g., "alice_rsa")
    pub fn key_file_name(&self) -> String {
        format!("{}_rsa", self.name)
    }

    /// Directory holding the key pair: <ssh_root>/<host>/<account>
    pub fn key_dir(&self, ssh_root: &Path) -> PathBuf {
        ssh_root.join(&self.provider.host).join(&self.name)
    }

    /// Private key path: <ssh_root>/<host>/<account>/<account>_rsa
    pub fn private_key_path(&self, ssh_root: &Path) -> PathBuf {
        self.key_dir(ssh_root).join(self.key_file_name())
    }

    /// Public key path: <ssh_root>/<host>/<account>/<account>_rsa.pub
    pub fn public_key_path(&self, ssh_root: &Path) -> PathBuf {
        self.key_dir(ssh_root).join(format!("{}.pub", self.key_file_name()))
    }

    /// IdentityFile value for the SSH config (always tilde-relative,
    /// чтобы конфиг оставался переносимым между машинами)
    pub fn identity_file(&self) -> String {
        format!(
            "~/.ssh/{}/{}/{}",
            self.provider.host,
            self.name,
            self.key_file_name()
        )
    }

    /// Source directory: <src_root>/<host>/[<org>/]<account>
    pub fn src_dir(&self, src_root: &Path) -> PathBuf {
        let mut path = src_root.join(&self.provider.host);
        if let Some(org) = &self.org {
            path = path.join(org);
        }
        path.join(&self.name)
    }

    /// Tilde-relative source directory for gitconfig includeIf rules
    pub fn src_dir_tilde(&self) -> String {
        match &self.org {
            Some(org) => format!("~/src/{}/{}/{}", self.provider.host, org, self.name),
            None => format!("~/src/{}/{}", self.provider.host, self.name),
        }
    }

    /// Human-readable label: <host>[/<org>]/<account>
    pub fn label(&self) -> String {
        match &self.org {
            Some(org) => format!("{}/{}/{}", self.provider.host, org, self.name),
            None => format!("{}/{}", self.provider.host, self.name),
        }
    }
}

/// Привести имя аккаунта/организации к допустимому виду
///
/// Trims whitespace, caps the length at [`MAX_NAME_LEN`] characters and
/// strips everything outside `[A-Za-z0-9._-]`. An empty result is an error.
pub fn sanitize_name(raw: &str) -> Result<String> {
    let name: String = raw
        .trim()
        .chars()
        .take(MAX_NAME_LEN)
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect();

    if name.is_empty() || name.chars().all(|c| c == '.') {
        return Err(ForgeError::InvalidAccountName(raw.trim().to_string()));
    }

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderTable;

    fn provider(host: &str) -> Provider {
        ProviderTable::default().get(host).unwrap().clone()
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("  alice  ").unwrap(), "alice");
        assert_eq!(sanitize_name("john doe!").unwrap(), "johndoe");
        assert_eq!(sanitize_name("john-doe_42.dev").unwrap(), "john-doe_42.dev");
    }

    #[test]
    fn test_sanitize_name_caps_length() {
        let long = "a".repeat(100);
        assert_eq!(sanitize_name(&long).unwrap().len(), MAX_NAME_LEN);
    }

    #[test]
    fn test_sanitize_name_rejects_empty() {
        assert!(sanitize_name("   ").is_err());
        assert!(sanitize_name("!!!").is_err());
        assert!(sanitize_name("..").is_err());
    }

    #[test]
    fn test_github_account_paths() {
        let account = Account::new(&provider("github.com"), "alice", None).unwrap();

        assert_eq!(account.host_alias(), "alice.github.com");
        assert_eq!(account.provider.ssh_hostname(), "github.com");
        assert_eq!(
            account.identity_file(),
            "~/.ssh/github.com/alice/alice_rsa"
        );
        assert_eq!(account.src_dir_tilde(), "~/src/github.com/alice");

        let ssh_root = Path::new("/home/u/.ssh");
        assert_eq!(
            account.private_key_path(ssh_root),
            Path::new("/home/u/.ssh/github.com/alice/alice_rsa")
        );
        assert_eq!(
            account.public_key_path(ssh_root),
            Path::new("/home/u/.ssh/github.com/alice/alice_rsa.pub")
        );
    }

    #[test]
    fn test_azure_devops_alias() {
        let account =
            Account::new(&provider("dev.azure.com"), "john-doe", Some("contoso")).unwrap();

        assert_eq!(account.host_alias(), "contoso.john-doe.dev.azure.com");
        assert_eq!(account.provider.ssh_hostname(), "ssh.dev.azure.com");
        assert_eq!(
            account.src_dir(Path::new("/home/u/src")),
            Path::new("/home/u/src/dev.azure.com/contoso/john-doe")
        );
    }

    #[test]
    fn test_azure_devops_requires_org() {
        let err = Account::new(&provider("dev.azure.com"), "john-doe", None).unwrap_err();
        assert!(matches!(err, ForgeError::OrganizationRequired(_)));

        let err = Account::new(&provider("dev.azure.com"), "john-doe", Some("  ")).unwrap_err();
        assert!(matches!(err, ForgeError::OrganizationRequired(_)));
    }

    #[test]
    fn test_org_is_optional_for_github() {
        let account =
            Account::new(&provider("github.com"), "alice", Some("prayer-clan")).unwrap();

        // организация влияет на дерево src, но не на SSH-алиас
        assert_eq!(account.host_alias(), "alice.github.com");
        assert_eq!(
            account.src_dir_tilde(),
            "~/src/github.com/prayer-clan/alice"
        );
    }

    #[test]
    fn test_git_email_fallback() {
        let account = Account::new(&provider("github.com"), "alice", None).unwrap();
        assert_eq!(account.git_email(), "alice@github.com");

        let account = account.with_email("alice@example.com");
        assert_eq!(account.git_email(), "alice@example.com");
    }
}
