//! Flat keyword-form lexer: splits a configuration file into bracketed
//! `[Keyword]` blocks, each carrying header arguments (tokens trailing the
//! closing bracket on the same line) and a body of logical lines. A line
//! beginning with `+` is a continuation of the previous body line rather
//! than a new one (spec §6, "continuation marker is a leading `+`").
//!
//! Include directives (`[Include] path`) are spliced at the block level by
//! [`load_blocks`], recursively re-tokenizing the referenced file in place.

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};

/// One `[Keyword]` block of the flat form.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Bracketed keyword, case preserved as written.
    pub keyword: String,
    /// Whitespace-split tokens trailing the closing bracket on the header
    /// line, e.g. `[Component] MyPart` -> `["MyPart"]`.
    pub header_args: Vec<String>,
    /// Body lines, continuation-merged; each inner `Vec` is one logical
    /// line's whitespace-split tokens.
    pub body: Vec<Vec<String>>,
    /// 1-based source line number of the opening bracket, for diagnostics.
    pub line: usize,
}

impl Block {
    pub fn keyword_eq(&self, other: &str) -> bool {
        self.keyword.eq_ignore_ascii_case(other)
    }

    /// First token of the first body line, if any — the common case of a
    /// single scalar value under a keyword.
    pub fn first_token(&self) -> Option<&str> {
        self.body.first().and_then(|line| line.first()).map(|s| s.as_str())
    }

    /// All body lines joined with spaces, preserving intra-line spacing
    /// loosely — used for free-text fields like `[Manufacturer]`.
    pub fn body_text(&self) -> String {
        self.body
            .iter()
            .map(|line| line.join(" "))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Strip an inline `!`-comment, if present, from a single line.
fn strip_comment(line: &str) -> &str {
    match line.find('!') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Tokenize already-spliced text (no include resolution) into blocks.
pub fn tokenize(text: &str) -> ConfigResult<Vec<Block>> {
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let stripped = strip_comment(raw_line);
        let trimmed = stripped.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('[') {
            let close = rest.find(']').ok_or_else(|| ConfigError::Syntax {
                line: line_no,
                message: "unterminated bracketed keyword".to_string(),
            })?;
            let keyword = rest[..close].trim().to_string();
            let header_args: Vec<String> = rest[close + 1..]
                .split_whitespace()
                .map(|s| s.to_string())
                .collect();

            if let Some(block) = current.take() {
                blocks.push(block);
            }
            current = Some(Block {
                keyword,
                header_args,
                body: Vec::new(),
                line: line_no,
            });
            continue;
        }

        let block = current.as_mut().ok_or_else(|| ConfigError::Syntax {
            line: line_no,
            message: "body line outside any [Keyword] block".to_string(),
        })?;

        if let Some(cont) = trimmed.strip_prefix('+') {
            let tokens: Vec<String> = cont.split_whitespace().map(|s| s.to_string()).collect();
            match block.body.last_mut() {
                Some(last) => last.extend(tokens),
                None => block.body.push(tokens),
            }
        } else {
            let tokens: Vec<String> = trimmed.split_whitespace().map(|s| s.to_string()).collect();
            block.body.push(tokens);
        }
    }

    if let Some(block) = current.take() {
        blocks.push(block);
    }

    Ok(blocks)
}

/// Tokenize `path`, recursively splicing `[Include]` blocks in place
/// (spec §6: "Include directives splice external files at parse time").
pub fn load_blocks(path: &Path) -> ConfigResult<Vec<Block>> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_blocks_from_text(&text, path.parent().unwrap_or_else(|| Path::new(".")))
}

fn load_blocks_from_text(text: &str, base_dir: &Path) -> ConfigResult<Vec<Block>> {
    let raw_blocks = tokenize(text)?;
    let mut out = Vec::with_capacity(raw_blocks.len());
    for block in raw_blocks {
        if block.keyword_eq("Include") {
            let inc_path = block
                .header_args
                .first()
                .cloned()
                .or_else(|| block.first_token().map(str::to_string))
                .ok_or_else(|| ConfigError::Syntax {
                    line: block.line,
                    message: "[Include] missing a path".to_string(),
                })?;
            let resolved = base_dir.join(&inc_path);
            out.extend(load_blocks(&resolved)?);
        } else {
            out.push(block);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_args_and_body_split() {
        let text = "[Component] MyPart\n1 vdd VDD POWER\n2 net7 SIG driver\n";
        let blocks = tokenize(text).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].keyword, "Component");
        assert_eq!(blocks[0].header_args, vec!["MyPart"]);
        assert_eq!(blocks[0].body.len(), 2);
        assert_eq!(blocks[0].body[1], vec!["2", "net7", "SIG", "driver"]);
    }

    #[test]
    fn continuation_lines_extend_previous_body_line() {
        let text = "[Notes]\nfirst part\n+ second part\n";
        let blocks = tokenize(text).unwrap();
        assert_eq!(blocks[0].body.len(), 1);
        assert_eq!(blocks[0].body[0], vec!["first", "part", "second", "part"]);
    }

    #[test]
    fn inline_comments_are_stripped() {
        let text = "[Voltage Range] ! corner-valued scalar\n3.3 3.0 3.6 ! typ min max\n";
        let blocks = tokenize(text).unwrap();
        assert_eq!(blocks[0].header_args, Vec::<String>::new());
        assert_eq!(blocks[0].body[0], vec!["3.3", "3.0", "3.6"]);
    }

    #[test]
    fn blank_body_line_outside_block_is_an_error() {
        let text = "stray line\n[Model] x\n";
        assert!(tokenize(text).is_err());
    }
}
