//! Реализация CLI команд

pub mod providers;
pub mod setup;

use std::io::{self, Write};

use colored::Colorize;

use crate::error::Result;

/// Запросить строку у пользователя
pub fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Запросить строку со значением по умолчанию
pub fn prompt_default(label: &str, default: &str) -> Result<String> {
    print!("{} [{}]: ", label, default);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input.to_string())
    }
}

/// Запросить подтверждение да/нет
pub fn confirm(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    io::stdout().flush().ok();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false;
    }

    matches!(input.trim().to_lowercase().as_str(), "y" | "yes" | "д" | "да")
}

/// Выбор из нумерованного списка
///
/// Enter без ввода - отказ от выбора (None).
pub fn select(title: &str, items: &[String]) -> Result<Option<usize>> {
    println!("{}", title.cyan().bold());
    for (i, item) in items.iter().enumerate() {
        println!("  {}. {}", i + 1, item);
    }

    loop {
        print!("Номер (Enter - завершить): ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            return Ok(None);
        }

        match input.parse::<usize>() {
            Ok(n) if n >= 1 && n <= items.len() => return Ok(Some(n - 1)),
            _ => {
                println!(
                    "{} Введите число от 1 до {}",
                    "Ошибка:".red(),
                    items.len()
                );
            }
        }
    }
}
