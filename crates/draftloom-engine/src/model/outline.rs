use crate::model::{BlockKind, Snapshot};

/// One heading in a document snapshot: its level, rendered text, and
/// zero-based position in the block sequence the analysis ran over.
///
/// Positions shift on every insertion, so entries must never outlive the
/// snapshot they were derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingEntry {
    pub level: u8,
    pub text: String,
    pub position: usize,
}

/// The heading structure of a document snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outline {
    pub entries: Vec<HeadingEntry>,
    pub has_structure: bool,
}

impl Outline {
    /// Walk the snapshot in order and collect an entry for every heading
    /// block with non-empty rendered text.
    ///
    /// Two headings with identical text stay distinct entries keyed by
    /// position; they are never merged.
    pub fn analyze(snapshot: &Snapshot) -> Self {
        let mut entries = Vec::new();
        for (position, block) in snapshot.iter().enumerate() {
            if let BlockKind::Heading { level } = block.kind {
                let text = block.text();
                if !text.trim().is_empty() {
                    entries.push(HeadingEntry {
                        level,
                        text,
                        position,
                    });
                }
            }
        }
        let has_structure = !entries.is_empty();
        Self {
            entries,
            has_structure,
        }
    }

    /// The heading whose subtree contains the given position: the nearest
    /// entry at or before it. `None` when no heading precedes the position.
    pub fn governing_heading(&self, position: usize) -> Option<&HeadingEntry> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.position <= position)
    }

    /// Text of the first level-1 heading, if any.
    pub fn main_title(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.level == 1)
            .map(|e| e.text.as_str())
    }

    /// All level-2 entries, in document order.
    pub fn chapters(&self) -> impl Iterator<Item = &HeadingEntry> {
        self.entries.iter().filter(|e| e.level == 2)
    }

    /// All level-3 entries, in document order.
    pub fn sub_chapters(&self) -> impl Iterator<Item = &HeadingEntry> {
        self.entries.iter().filter(|e| e.level == 3)
    }

    /// Entries no deeper than `depth`, in document order.
    pub fn targets_up_to(&self, depth: u8) -> Vec<&HeadingEntry> {
        self.entries.iter().filter(|e| e.level <= depth).collect()
    }

    /// The whole outline as `#`-prefixed lines, one heading per line.
    /// Used to hand the existing structure to the generation service.
    pub fn serialize_structure(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{} {}", "#".repeat(e.level as usize), e.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Markdown-like re-rendering of the subtree under `entry`: every block
/// strictly between the heading and the next heading of equal-or-shallower
/// level (or the document end).
///
/// Nested headings keep their `#`-repeated prefixes; numbered items are
/// renumbered positionally.
pub fn content_under(snapshot: &Snapshot, entry: &HeadingEntry) -> String {
    let mut lines = Vec::new();
    let mut numbered_counter = 0usize;

    for block in snapshot.iter().skip(entry.position + 1) {
        if let Some(level) = block.heading_level()
            && level <= entry.level
        {
            break;
        }

        if !matches!(block.kind, BlockKind::NumberedItem) {
            numbered_counter = 0;
        }

        match block.kind {
            BlockKind::Heading { level } => {
                lines.push(format!("{} {}", "#".repeat(level as usize), block.text()));
            }
            BlockKind::Paragraph => lines.push(block.text()),
            BlockKind::BulletItem => lines.push(format!("- {}", block.text())),
            BlockKind::NumberedItem => {
                numbered_counter += 1;
                lines.push(format!("{numbered_counter}. {}", block.text()));
            }
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, TextSpan};
    use pretty_assertions::assert_eq;

    fn heading(level: u8, text: &str) -> Block {
        Block::heading(level, vec![TextSpan::plain(text)])
    }

    fn paragraph(text: &str) -> Block {
        Block::paragraph(vec![TextSpan::plain(text)])
    }

    fn sample_snapshot() -> Snapshot {
        Snapshot::new(vec![
            heading(1, "Title"),
            paragraph("Intro text."),
            heading(2, "First"),
            paragraph("Body one."),
            heading(3, "Nested"),
            paragraph("Body two."),
            heading(2, "Second"),
            paragraph("Body three."),
        ])
    }

    #[test]
    fn analyze_collects_headings_in_order() {
        let outline = Outline::analyze(&sample_snapshot());

        assert!(outline.has_structure);
        assert_eq!(outline.entries.len(), 4);
        assert_eq!(outline.entries[0].text, "Title");
        assert_eq!(outline.entries[0].position, 0);
        assert_eq!(outline.entries[2].text, "Nested");
        assert_eq!(outline.entries[2].position, 4);
    }

    #[test]
    fn analyze_skips_headings_with_empty_text() {
        let snapshot = Snapshot::new(vec![heading(1, "  "), paragraph("p")]);
        let outline = Outline::analyze(&snapshot);

        assert!(!outline.has_structure);
        assert!(outline.entries.is_empty());
    }

    #[test]
    fn duplicate_heading_texts_stay_distinct() {
        let snapshot = Snapshot::new(vec![heading(2, "Same"), paragraph("p"), heading(2, "Same")]);
        let outline = Outline::analyze(&snapshot);

        assert_eq!(outline.entries.len(), 2);
        assert_eq!(outline.entries[0].position, 0);
        assert_eq!(outline.entries[1].position, 2);
    }

    #[test]
    fn governing_heading_scans_backward() {
        let outline = Outline::analyze(&sample_snapshot());

        // Position 3 sits under "First"
        assert_eq!(outline.governing_heading(3).unwrap().text, "First");
        // A heading governs its own position
        assert_eq!(outline.governing_heading(4).unwrap().text, "Nested");
        // Past the last heading
        assert_eq!(outline.governing_heading(7).unwrap().text, "Second");
    }

    #[test]
    fn governing_heading_none_before_first_heading() {
        let snapshot = Snapshot::new(vec![paragraph("lead"), heading(1, "Title")]);
        let outline = Outline::analyze(&snapshot);

        assert!(outline.governing_heading(0).is_none());
    }

    #[test]
    fn content_under_stops_at_equal_or_shallower_heading() {
        let snapshot = sample_snapshot();
        let outline = Outline::analyze(&snapshot);

        let first = &outline.entries[1];
        assert_eq!(first.text, "First");
        assert_eq!(
            content_under(&snapshot, first),
            "Body one.\n### Nested\nBody two."
        );
    }

    #[test]
    fn content_under_runs_to_document_end() {
        let snapshot = sample_snapshot();
        let outline = Outline::analyze(&snapshot);

        let second = &outline.entries[3];
        assert_eq!(content_under(&snapshot, second), "Body three.");
    }

    #[test]
    fn content_under_renumbers_numbered_items_positionally() {
        let snapshot = Snapshot::new(vec![
            heading(2, "Steps"),
            Block::numbered_item(vec![TextSpan::plain("first")]),
            Block::numbered_item(vec![TextSpan::plain("second")]),
            Block::bullet_item(vec![TextSpan::plain("aside")]),
        ]);
        let outline = Outline::analyze(&snapshot);

        assert_eq!(
            content_under(&snapshot, &outline.entries[0]),
            "1. first\n2. second\n- aside"
        );
    }

    #[test]
    fn title_chapter_and_sub_chapter_views() {
        let outline = Outline::analyze(&sample_snapshot());

        assert_eq!(outline.main_title(), Some("Title"));
        let chapters: Vec<_> = outline.chapters().map(|e| e.text.as_str()).collect();
        assert_eq!(chapters, vec!["First", "Second"]);
        let subs: Vec<_> = outline.sub_chapters().map(|e| e.text.as_str()).collect();
        assert_eq!(subs, vec!["Nested"]);
    }

    #[test]
    fn serialize_structure_renders_hash_prefixes() {
        let outline = Outline::analyze(&sample_snapshot());
        let serialized = outline.serialize_structure();

        assert!(serialized.starts_with("# Title\n"));
        assert!(serialized.contains("\n### Nested\n"));
    }

    #[test]
    fn targets_up_to_applies_depth_cutoff() {
        let snapshot = Snapshot::new(vec![heading(1, "a"), heading(3, "b"), heading(4, "c")]);
        let outline = Outline::analyze(&snapshot);

        let targets: Vec<_> = outline
            .targets_up_to(3)
            .into_iter()
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(targets, vec!["a", "b"]);
    }
}
