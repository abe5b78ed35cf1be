//! Вывод таблицы поддерживаемых провайдеров

use colored::Colorize;

use crate::error::Result;
use crate::provider::ProviderTable;

pub fn run(table: &ProviderTable, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(table)?);
        return Ok(());
    }

    println!("{}", "=== Поддерживаемые провайдеры ===".cyan().bold());
    println!();
    println!(
        "{:<15} {:<20} {:<20} {}",
        "ИМЯ".bold(),
        "ХОСТ".bold(),
        "SSH-ХОСТ".bold(),
        "ОРГАНИЗАЦИЯ".bold()
    );
    println!("{}", "─".repeat(70).dimmed());

    for provider in table.iter() {
        println!(
            "{:<15} {:<20} {:<20} {}",
            provider.name,
            provider.host,
            provider.ssh_hostname(),
            if provider.requires_org {
                "обязательна"
            } else {
                "-"
            }
        );
    }

    println!();
    Ok(())
}
