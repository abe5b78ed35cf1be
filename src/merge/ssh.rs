//! Разбор и слияние блоков ~/.ssh/config

use std::path::Path;

use crate::error::{ForgeError, Result};

use super::{Builder, Document};

/// Parse SSH config content into preamble and Host/Match blocks
///
/// Глобальные опции до первого Host - валидная преамбула, сохраняется
/// как есть. Комментарии непосредственно над Host относятся к его блоку.
pub fn parse_ssh_config(content: &str, path: &Path) -> Result<Document> {
    let mut builder = Builder::default();

    for line in content.lines() {
        let trimmed = line.trim_start();

        if let Some(rest) = keyword_arg(trimmed, "Host") {
            let alias = rest.split_whitespace().next().ok_or_else(|| {
                ForgeError::MalformedConfig {
                    path: path.to_path_buf(),
                    reason: "директива Host без шаблона хоста".into(),
                }
            })?;
            builder.start_block(alias.to_string(), line);
        } else if keyword_arg(trimmed, "Match").is_some() {
            // Match-блоки не наши, но их опции нельзя приклеивать к
            // предыдущему Host
            builder.start_block(trimmed.to_string(), line);
        } else if trimmed.is_empty() || trimmed.starts_with('#') {
            builder.push_pending(line);
        } else {
            builder.push_line(line);
        }
    }

    Ok(builder.finish())
}

/// Merge a rendered Host block into existing SSH config content
///
/// Returns the new file content. Повторное слияние того же блока даёт
/// байт-в-байт тот же результат.
pub fn merge_ssh_block(existing: &str, rendered: &str, path: &Path) -> Result<String> {
    let mut doc = parse_ssh_config(existing, path)?;
    let update = parse_ssh_config(rendered, path)?;

    if update.blocks.is_empty() {
        return Err(ForgeError::MalformedConfig {
            path: path.to_path_buf(),
            reason: "отрендеренный шаблон не содержит блока Host".into(),
        });
    }

    for block in update.blocks {
        doc.upsert(block);
    }

    Ok(doc.render())
}

/// Match `Keyword arg...` allowing both space and tab separators
fn keyword_arg<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if rest.starts_with(' ') || rest.starts_with('\t') {
        Some(rest.trim_start())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: &str = "/home/u/.ssh/config";

    fn path() -> &'static Path {
        Path::new(PATH)
    }

    const EXISTING: &str = "\
# global defaults
ServerAliveInterval 60

# Primary Personal GitHub - john.doe@personal.com
Host personal.github.com
    HostName github.com
    User git
    IdentityFile ~/.ssh/github.com/personal/personal_rsa
";

    fn alice_block(identity: &str) -> String {
        format!(
            "# GitHub - alice\n\
             Host alice.github.com\n    \
             HostName github.com\n    \
             User git\n    \
             IdentityFile {}\n",
            identity
        )
    }

    #[test]
    fn test_parse_preserves_preamble() {
        let doc = parse_ssh_config(EXISTING, path()).unwrap();

        assert_eq!(doc.preamble, vec!["# global defaults", "ServerAliveInterval 60"]);
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(doc.blocks[0].key, "personal.github.com");
        // комментарий над Host принадлежит блоку
        assert!(doc.blocks[0].lines[0].starts_with("# Primary Personal"));
    }

    #[test]
    fn test_merge_appends_new_block() {
        let merged =
            merge_ssh_block(EXISTING, &alice_block("~/.ssh/github.com/alice/alice_rsa"), path())
                .unwrap();

        assert!(merged.contains("Host personal.github.com"));
        assert!(merged.contains("Host alice.github.com"));
        assert!(merged.contains("# global defaults"));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let block = alice_block("~/.ssh/github.com/alice/alice_rsa");

        let once = merge_ssh_block(EXISTING, &block, path()).unwrap();
        let twice = merge_ssh_block(&once, &block, path()).unwrap();

        assert_eq!(once, twice);
        assert_eq!(once.matches("Host alice.github.com").count(), 1);
    }

    #[test]
    fn test_merge_replaces_block_in_place() {
        let old = alice_block("~/.ssh/github.com/alice/alice_rsa");
        let new = alice_block("~/.ssh/github.com/alice/alice_ed25519");

        let merged = merge_ssh_block(EXISTING, &old, path()).unwrap();
        let merged = merge_ssh_block(&merged, &new, path()).unwrap();

        assert!(!merged.contains("alice_rsa"));
        assert!(merged.contains("alice_ed25519"));
        assert_eq!(merged.matches("Host alice.github.com").count(), 1);
        // старый блок заменён на месте, личный остался первым
        let personal = merged.find("personal.github.com").unwrap();
        let alice = merged.find("alice.github.com").unwrap();
        assert!(personal < alice);
    }

    #[test]
    fn test_merge_into_empty_file() {
        let block = alice_block("~/.ssh/github.com/alice/alice_rsa");
        let merged = merge_ssh_block("", &block, path()).unwrap();

        assert_eq!(merged, block);
    }

    #[test]
    fn test_detached_comment_stays_in_preamble() {
        let content = "# file header\n\nHost a\n    User git\n";
        let doc = parse_ssh_config(content, path()).unwrap();

        assert_eq!(doc.preamble, vec!["# file header"]);
        assert_eq!(doc.blocks[0].lines[0], "Host a");
    }

    #[test]
    fn test_match_block_is_kept_separate() {
        let content = "Host a\n    User git\nMatch exec \"true\"\n    User hg\n";
        let doc = parse_ssh_config(content, path()).unwrap();

        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(doc.blocks[0].lines, vec!["Host a", "    User git"]);
    }

    #[test]
    fn test_host_without_pattern_is_malformed() {
        let err = parse_ssh_config("Host \n    User git\n", path()).unwrap_err();
        assert!(matches!(err, ForgeError::MalformedConfig { .. }));
    }
}
