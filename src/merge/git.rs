//! Разбор и слияние секций ~/.gitconfig

use std::path::Path;

use crate::error::{ForgeError, Result};

use super::{Builder, Document};

/// Parse gitconfig content into comment preamble and `[section]` blocks
///
/// Имя секции нормализуется к нижнему регистру (git сравнивает его без
/// учёта регистра), подсекция в кавычках остаётся как есть.
pub fn parse_git_config(content: &str, path: &Path) -> Result<Document> {
    let mut builder = Builder::default();

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') {
            let key = section_key(trimmed, path)?;
            builder.start_block(key, line);
        } else if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            builder.push_pending(line);
        } else if builder.in_block() {
            builder.push_line(line);
        } else {
            // значение вне секции git не принимает
            return Err(ForgeError::MalformedConfig {
                path: path.to_path_buf(),
                reason: format!("значение вне секции: '{}'", trimmed),
            });
        }
    }

    Ok(builder.finish())
}

/// Merge rendered gitconfig sections into existing content
///
/// Каждая секция из rendered вставляется по своему ключу; повторное
/// слияние не меняет результат.
pub fn merge_git_block(existing: &str, rendered: &str, path: &Path) -> Result<String> {
    let mut doc = parse_git_config(existing, path)?;
    let update = parse_git_config(rendered, path)?;

    if update.blocks.is_empty() {
        return Err(ForgeError::MalformedConfig {
            path: path.to_path_buf(),
            reason: "отрендеренный шаблон не содержит секций".into(),
        });
    }

    for block in update.blocks {
        doc.upsert(block);
    }

    Ok(doc.render())
}

/// Normalized key of a `[section]` or `[section "subsection"]` header
fn section_key(header: &str, path: &Path) -> Result<String> {
    let malformed = |reason: &str| ForgeError::MalformedConfig {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let inner = header
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| malformed(&format!("незакрытый заголовок секции: '{}'", header)))?
        .trim();

    if inner.is_empty() {
        return Err(malformed("пустой заголовок секции"));
    }

    match inner.split_once(char::is_whitespace) {
        Some((name, sub)) => Ok(format!("{} {}", name.to_lowercase(), sub.trim())),
        None => Ok(inner.to_lowercase()),
    }
}
