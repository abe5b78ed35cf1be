//! Идемпотентное слияние конфигурационных файлов
//!
//! Оба формата (~/.ssh/config и ~/.gitconfig) разбираются в один и тот же
//! вид: преамбула + последовательность блоков с составным ключом. Вставка
//! блока с уже существующим ключом заменяет старый блок на месте, поэтому
//! повторные запуски не плодят дубликатов.

mod git;
mod ssh;

pub use git::{merge_git_block, parse_git_config};
pub use ssh::{merge_ssh_block, parse_ssh_config};

/// A keyed block of config lines (leading comments included)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Composite key: SSH host alias or normalized gitconfig section header
    pub key: String,
    /// Verbatim lines of the block, header included
    pub lines: Vec<String>,
}

/// A parsed config file: preamble lines plus keyed blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Lines before the first block, preserved verbatim
    pub preamble: Vec<String>,
    pub blocks: Vec<Block>,
}

impl Document {
    /// Check whether a block with the given key exists
    #[allow(dead_code)]
    pub fn contains(&self, key: &str) -> bool {
        self.blocks.iter().any(|b| b.key == key)
    }

    /// Insert a block, replacing an existing block with the same key
    ///
    /// Returns true when an existing block was replaced.
    pub fn upsert(&mut self, block: Block) -> bool {
        if let Some(existing) = self.blocks.iter_mut().find(|b| b.key == block.key) {
            *existing = block;
            true
        } else {
            self.blocks.push(block);
            false
        }
    }

    /// Render back to file content, blocks separated by a blank line
    pub fn render(&self) -> String {
        let mut out = String::new();

        for line in &self.preamble {
            out.push_str(line);
            out.push('\n');
        }

        for block in &self.blocks {
            if !out.is_empty() {
                out.push('\n');
            }
            for line in &block.lines {
                out.push_str(line);
                out.push('\n');
            }
        }

        out
    }
}

/// Убрать хвостовые пустые строки (разделители восстановит render)
fn strip_trailing_blanks(lines: &mut Vec<String>) {
    while matches!(lines.last(), Some(l) if l.trim().is_empty()) {
        lines.pop();
    }
}

/// Split pending lines into (rest, comment run directly above the header)
fn split_lead_comments(mut pending: Vec<String>) -> (Vec<String>, Vec<String>) {
    let mut lead = Vec::new();
    while matches!(pending.last(), Some(l) if l.trim_start().starts_with('#')) {
        lead.push(pending.pop().unwrap());
    }
    lead.reverse();
    strip_trailing_blanks(&mut pending);
    (pending, lead)
}

/// Внутреннее состояние построителя документа, общее для обоих парсеров
#[derive(Default)]
struct Builder {
    doc: Document,
    current: Option<Block>,
    /// Comment/blank lines not yet assigned to a block
    pending: Vec<String>,
}

impl Builder {
    fn in_block(&self) -> bool {
        self.current.is_some()
    }

    fn push_pending(&mut self, line: &str) {
        self.pending.push(line.to_string());
    }

    /// A regular content line: flush pending and append to the open scope
    fn push_line(&mut self, line: &str) {
        let pending = std::mem::take(&mut self.pending);
        match &mut self.current {
            Some(block) => {
                block.lines.extend(pending);
                block.lines.push(line.to_string());
            }
            None => {
                self.doc.preamble.extend(pending);
                self.doc.preamble.push(line.to_string());
            }
        }
    }

    /// Start a new block at a header line
    fn start_block(&mut self, key: String, header: &str) {
        let (rest, lead) = split_lead_comments(std::mem::take(&mut self.pending));

        if !rest.is_empty() {
            match &mut self.current {
                Some(block) => block.lines.extend(rest),
                None => self.doc.preamble.extend(rest),
            }
        }

        if let Some(block) = self.current.take() {
            self.doc.blocks.push(block);
        }

        let mut lines = lead;
        lines.push(header.to_string());
        self.current = Some(Block { key, lines });
    }

    fn finish(mut self) -> Document {
        let mut pending = std::mem::take(&mut self.pending);
        strip_trailing_blanks(&mut pending);

        match &mut self.current {
            Some(block) => block.lines.extend(pending),
            None => self.doc.preamble.extend(pending),
        }

        if let Some(block) = self.current.take() {
            self.doc.blocks.push(block);
        }

        self.doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(key: &str, lines: &[&str]) -> Block {
        Block {
            key: key.to_string(),
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_upsert_appends_then_replaces() {
        let mut doc = Document::default();

        assert!(!doc.upsert(block("a", &["Host a", "    User git"])));
        assert!(!doc.upsert(block("b", &["Host b"])));
        assert!(doc.upsert(block("a", &["Host a", "    User hg"])));

        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(doc.blocks[0].lines[1], "    User hg");
    }

    #[test]
    fn test_render_separates_blocks() {
        let mut doc = Document {
            preamble: vec!["# managed".to_string()],
            blocks: Vec::new(),
        };
        doc.upsert(block("a", &["Host a"]));
        doc.upsert(block("b", &["Host b"]));

        assert_eq!(doc.render(), "# managed\n\nHost a\n\nHost b\n");
    }

    #[test]
    fn test_render_empty_document() {
        assert_eq!(Document::default().render(), "");
    }
}
