//! Таблица провайдеров и аккаунты
//!
//! Handles the data model of the tool:
//! - Supported hosting providers (explicit table, not a global constant)
//! - Accounts scoped to a provider and optional organization

mod account;
mod table;

pub use account::{sanitize_name, Account};
pub use table::{Provider, ProviderTable};
