//! Profile Forge - разворачивание локального окружения разработчика
//!
//! Этот инструмент:
//! - Создаёт дерево каталогов ~/src/<хост>/[<организация>/]<аккаунт>
//! - Генерирует SSH-ключи через внешний ssh-keygen
//! - Идемпотентно дописывает блоки в ~/.ssh/config и ~/.gitconfig
//! - Выставляет права доступа (приватный ключ 600, публичный 644)

pub mod cli;
pub mod error;
pub mod keygen;
pub mod merge;
pub mod provider;
pub mod provision;
pub mod template;

pub use error::{ForgeError, Result};
