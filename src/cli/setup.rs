//! Интерактивная настройка окружения
//!
//! Сценарий - небольшой конечный автомат: выбор провайдера, опциональная
//! организация, аккаунты, подтверждение. Ошибка при разворачивании одного
//! аккаунта не прерывает весь сценарий.

use std::path::Path;

use colored::Colorize;

use crate::error::Result;
use crate::keygen::Keygen;
use crate::merge::{merge_git_block, merge_ssh_block};
use crate::provider::{Account, Provider, ProviderTable};
use crate::provision::{
    self, Layout, MODE_GIT_CONFIG, MODE_PRIVATE_KEY, MODE_PUBLIC_KEY, MODE_SSH_CONFIG,
};
use crate::template::{TemplateSet, TPL_GIT_IDENTITY, TPL_GIT_INCLUDE, TPL_SSH_HOST};

use super::{confirm, prompt, prompt_default, select};

/// Состояния интерактивного сценария
enum SetupState {
    SelectProvider,
    SelectOrg {
        provider: Provider,
    },
    SelectAccount {
        provider: Provider,
        org: Option<String>,
    },
    Confirm {
        account: Account,
    },
    Done,
}

pub fn run(table: &ProviderTable) -> Result<()> {
    let layout = Layout::discover()?;
    let templates = TemplateSet::locate()?;
    let keygen = Keygen::default();

    println!("{}", "=== Настройка окружения разработчика ===".cyan().bold());
    println!();
    println!("Домашняя директория: {}", layout.home.display().to_string().cyan());
    println!();

    let mut state = SetupState::SelectProvider;
    let mut provisioned = 0usize;

    loop {
        state = match state {
            SetupState::SelectProvider => {
                let items: Vec<String> = table
                    .iter()
                    .map(|p| format!("{} ({})", p.name, p.host))
                    .collect();

                match select("Выберите провайдера", &items)? {
                    Some(i) => SetupState::SelectOrg {
                        provider: table.providers[i].clone(),
                    },
                    None => SetupState::Done,
                }
            }

            SetupState::SelectOrg { provider } => {
                let org = if provider.requires_org {
                    loop {
                        let input =
                            prompt(&format!("Организация для {}", provider.name))?;
                        if input.is_empty() {
                            println!(
                                "{} {} требует указания организации",
                                "Ошибка:".red(),
                                provider.name
                            );
                            continue;
                        }
                        break Some(input);
                    }
                } else {
                    let input = prompt(&format!(
                        "Организация для {} (Enter - без организации)",
                        provider.name
                    ))?;
                    if input.is_empty() {
                        None
                    } else {
                        Some(input)
                    }
                };

                SetupState::SelectAccount { provider, org }
            }

            SetupState::SelectAccount { provider, org } => {
                let name = prompt(&format!("Имя аккаунта для [{}]", provider.host))?;

                match Account::new(&provider, &name, org.as_deref()) {
                    Ok(account) => {
                        let email = prompt_default(
                            "Email для git",
                            &format!("{}@{}", account.name, provider.host),
                        )?;
                        SetupState::Confirm {
                            account: account.with_email(email),
                        }
                    }
                    Err(e) => {
                        println!("{} {}", "Ошибка:".red(), e);
                        SetupState::SelectAccount { provider, org }
                    }
                }
            }

            SetupState::Confirm { account } => {
                println!();
                println!("{}", format!("=== {} ===", account.label()).cyan().bold());
                println!("  Исходники:  {}", account.src_dir_tilde());
                println!("  SSH-ключ:   {}", account.identity_file());
                println!("  SSH-алиас:  {}", account.host_alias());
                println!("  Email:      {}", account.git_email());
                println!();

                if confirm("Продолжить?") {
                    match provision_account(&layout, &templates, &keygen, &account) {
                        Ok(()) => {
                            provisioned += 1;
                            println!(
                                "{} Аккаунт {} настроен",
                                "Успех:".green().bold(),
                                account.label()
                            );
                        }
                        // не прерываем сценарий: остальные аккаунты ещё можно настроить
                        Err(e) => println!("{} {}", "Ошибка:".red().bold(), e),
                    }
                } else {
                    println!("Пропущено.");
                }
                println!();

                if confirm(&format!(
                    "Добавить ещё один аккаунт для [{}]?",
                    account.provider.host
                )) {
                    SetupState::SelectAccount {
                        provider: account.provider,
                        org: account.org,
                    }
                } else {
                    SetupState::SelectProvider
                }
            }

            SetupState::Done => break,
        };
    }

    println!();
    if provisioned == 0 {
        println!("Ничего не настроено.");
    } else {
        println!(
            "{} Настроено аккаунтов: {}",
            "Готово.".green().bold(),
            provisioned
        );
        println!(
            "Публичные ключи добавьте в настройки SSH соответствующих провайдеров."
        );
    }

    Ok(())
}

/// Развернуть один аккаунт: каталоги, ключи, конфиги, права доступа
pub fn provision_account(
    layout: &Layout,
    templates: &TemplateSet,
    keygen: &Keygen,
    account: &Account,
) -> Result<()> {
    let ssh_root = layout.ssh_root();

    // дерево исходников
    let src_dir = account.src_dir(&layout.src_root());
    report_dir(&src_dir, provision::ensure_dir(&src_dir)?);

    // директория ключей
    let key_dir = account.key_dir(&ssh_root);
    report_dir(&key_dir, provision::ensure_dir(&key_dir)?);

    // ключевая пара
    let key_path = account.private_key_path(&ssh_root);
    print!("{}", "Генерация SSH-ключа... ".cyan());
    std::io::Write::flush(&mut std::io::stdout())?;
    if keygen.generate(&key_path, &account.name)? {
        println!("{}", "готово".green());
    } else {
        println!("{}", "уже существует, пропущена".yellow());
    }

    provision::set_mode(&key_path, MODE_PRIVATE_KEY)?;
    let pub_path = account.public_key_path(&ssh_root);
    if pub_path.exists() {
        provision::set_mode(&pub_path, MODE_PUBLIC_KEY)?;
    }

    let alias = account.host_alias();
    let org = account.org.clone().unwrap_or_default();
    let identity_file = account.identity_file();
    let src_dir_tilde = account.src_dir_tilde();
    let email = account.git_email();
    let vars: Vec<(&str, &str)> = vec![
        ("vcs", account.provider.name.as_str()),
        ("org", org.as_str()),
        ("account", account.name.as_str()),
        ("alias", alias.as_str()),
        ("hostname", account.provider.ssh_hostname()),
        ("identity_file", identity_file.as_str()),
        ("src_dir", src_dir_tilde.as_str()),
        ("email", email.as_str()),
    ];

    // ~/.ssh/config
    let ssh_config = layout.ssh_config_path();
    let rendered = templates.render(TPL_SSH_HOST, &vars)?;
    let existing = provision::read_or_empty(&ssh_config)?;
    let merged = merge_ssh_block(&existing, &rendered, &ssh_config)?;
    provision::write_file(&ssh_config, &merged, MODE_SSH_CONFIG)?;

    // ~/.gitconfig
    let git_config = layout.git_config_path();
    let rendered = templates.render(TPL_GIT_INCLUDE, &vars)?;
    let existing = provision::read_or_empty(&git_config)?;
    let merged = merge_git_block(&existing, &rendered, &git_config)?;
    provision::write_file(&git_config, &merged, MODE_GIT_CONFIG)?;

    // .gitconfig аккаунта с git-идентичностью
    let identity = templates.render(TPL_GIT_IDENTITY, &vars)?;
    provision::write_file(&src_dir.join(".gitconfig"), &identity, MODE_GIT_CONFIG)?;

    Ok(())
}

fn report_dir(path: &Path, created: bool) {
    if created {
        println!("Создана директория: {}", path.display().to_string().cyan());
    } else {
        println!(
            "Директория уже существует: {}",
            path.display().to_string().dimmed()
        );
    }
}
