use crate::model::Block;

use super::inline::tokenize;

/// Deepest heading level most block hosts expose.
pub const DEFAULT_HEADING_CAP: u8 = 3;

/// Classifies one non-blank line into a typed block.
///
/// The heading cap is host policy: marker runs deeper than the cap still
/// classify as headings but their level is clamped to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineClassifier {
    pub heading_cap: u8,
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self {
            heading_cap: DEFAULT_HEADING_CAP,
        }
    }
}

impl LineClassifier {
    pub fn new(heading_cap: u8) -> Self {
        Self { heading_cap }
    }

    /// Classify a single line. First matching rule wins; anything that is
    /// not a well-formed heading or list marker is a paragraph, so every
    /// non-blank line maps to exactly one block.
    ///
    /// Callers filter blank lines before classification; the returned block
    /// carries an unassigned id.
    pub fn classify(&self, line: &str) -> Block {
        let line = line.trim();

        if let Some((level, rest)) = heading_rule(line) {
            return Block::heading(level.min(self.heading_cap), tokenize(rest));
        }
        if let Some(rest) = bullet_rule(line) {
            return Block::bullet_item(tokenize(rest));
        }
        if let Some(rest) = numbered_rule(line) {
            return Block::numbered_item(tokenize(rest));
        }
        Block::paragraph(tokenize(line))
    }

    /// Classify a whole generation blob: one block per non-blank line.
    pub fn parse_blob(&self, blob: &str) -> Vec<Block> {
        blob.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| self.classify(line))
            .collect()
    }
}

/// `#{1,6}` + whitespace + non-empty remainder. Seven or more hashes, a
/// missing space, or an empty remainder are not a heading.
fn heading_rule(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    marked_remainder(&line[hashes..]).map(|rest| (hashes as u8, rest))
}

/// `*` or `-` + whitespace + non-empty remainder.
fn bullet_rule(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(['*', '-'])?;
    marked_remainder(rest)
}

/// Digits + `.` + whitespace + non-empty remainder. The numeral itself is
/// discarded; rendering order is positional.
fn numbered_rule(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    marked_remainder(rest)
}

/// The marker must be followed by whitespace and the content must be
/// non-empty, otherwise the line degrades to a paragraph.
fn marked_remainder(rest: &str) -> Option<&str> {
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let content = rest.trim_start();
    (!content.is_empty()).then_some(content)
}
