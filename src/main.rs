use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;

mod cli;
mod error;
mod keygen;
mod merge;
mod provider;
mod provision;
mod template;

use error::Result;
use provider::ProviderTable;

#[derive(Parser)]
#[command(name = "profile-forge")]
#[command(author = "Oleg")]
#[command(version = "0.1.0")]
#[command(about = "Разворачивание локального окружения разработчика: каталоги, SSH-ключи, конфиги", long_about = None)]
struct Cli {
    /// JSON-файл с таблицей провайдеров (вместо встроенной)
    #[arg(long, value_name = "FILE")]
    providers: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Интерактивная настройка окружения (по умолчанию)
    Setup,

    /// Показать таблицу поддерживаемых провайдеров
    Providers {
        /// Вывести таблицу в формате JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Ошибка:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let table = match &cli.providers {
        Some(path) => ProviderTable::load(path)?,
        None => ProviderTable::default(),
    };

    match cli.command.unwrap_or(Commands::Setup) {
        Commands::Setup => cli::setup::run(&table),
        Commands::Providers { json } => cli::providers::run(&table, json),
    }
}
