use std::sync::OnceLock;

use regex::Regex;

use crate::editing::host::{CursorEdge, DocumentHost, HostError};
use crate::model::{Block, BlockId, ContentSection, HeadingEntry, Outline, Snapshot};
use crate::parsing::{split_sections, tokenize};

/// Policy knobs for targeted merges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergePolicy {
    /// When the caller names no target headings, every heading up to this
    /// level is a target.
    pub target_depth_cutoff: u8,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            target_depth_cutoff: 3,
        }
    }
}

/// Outcome of one merge operation. Partially fulfilled merges are normal:
/// headings without a matching section are listed in `skipped_headings`,
/// never reported as an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergeReport {
    /// Number of blocks inserted into the host.
    pub inserted_blocks: usize,
    /// Headings that received content, in document order.
    pub filled_headings: Vec<String>,
    /// Targeted headings that received nothing.
    pub skipped_headings: Vec<String>,
    /// First block inserted under the first filled heading.
    pub first_inserted: Option<BlockId>,
}

/// Discard the whole document and adopt `blocks` in its place. The cursor
/// moves to the start of the new document.
pub fn replace_document<H: DocumentHost>(
    host: &mut H,
    blocks: Vec<Block>,
) -> Result<MergeReport, HostError> {
    let ids = host.replace_all(blocks)?;
    if let Some(first) = ids.first() {
        host.set_cursor(first, CursorEdge::Start)?;
    }
    Ok(MergeReport {
        inserted_blocks: ids.len(),
        first_inserted: ids.into_iter().next(),
        ..MergeReport::default()
    })
}

/// Insert `blocks` after the last existing block (or adopt them outright
/// when the document is empty). The cursor moves to the end of the last
/// inserted block.
pub fn append_blocks<H: DocumentHost>(
    host: &mut H,
    blocks: Vec<Block>,
) -> Result<MergeReport, HostError> {
    let snapshot = host.enumerate();
    let Some(last) = snapshot.last() else {
        return replace_document(host, blocks);
    };

    let last_id = last.id.clone();
    let ids = host.insert_after(&last_id, blocks)?;
    if let Some(last_inserted) = ids.last() {
        host.set_cursor(last_inserted, CursorEdge::End)?;
    }
    Ok(MergeReport {
        inserted_blocks: ids.len(),
        first_inserted: ids.into_iter().next(),
        ..MergeReport::default()
    })
}

/// Merge a sectioned generation blob into the document under its existing
/// headings.
///
/// The heading outline is derived from a fresh snapshot; `targets` restricts
/// it to specific heading texts, otherwise every heading up to the policy's
/// depth cutoff is targeted. The blob is split on its section markers and
/// each targeted heading (in document order) gets the body of the first
/// unconsumed section whose name matches it. Section bodies are
/// deliberately non-structural: each non-blank line becomes one tokenized
/// paragraph block, so heading markers inside a body stay literal text.
///
/// Insertions address blocks by id, so position shifts caused by earlier
/// insertions cannot corrupt later ones. A host that rejects a single
/// insertion (the block vanished under a concurrent edit) only loses that
/// step: it is logged and skipped, the remaining headings still merge.
///
/// With no parseable sections at all, the whole blob degrades to flat
/// paragraphs inserted after the first targeted heading.
pub fn targeted_merge<H: DocumentHost>(
    host: &mut H,
    blob: &str,
    targets: Option<&[String]>,
    policy: &MergePolicy,
) -> MergeReport {
    let snapshot = host.enumerate();
    let outline = Outline::analyze(&snapshot);

    let targeted: Vec<HeadingEntry> = match targets {
        Some(names) if !names.is_empty() => outline
            .entries
            .iter()
            .filter(|e| names.contains(&e.text))
            .cloned()
            .collect(),
        _ => outline
            .targets_up_to(policy.target_depth_cutoff)
            .into_iter()
            .cloned()
            .collect(),
    };

    let mut report = MergeReport::default();
    if targeted.is_empty() {
        tracing::debug!("targeted merge found no headings to fill");
        return report;
    }

    let sections = split_sections(blob);
    if sections.is_empty() {
        merge_flat_fallback(host, &snapshot, blob, &targeted, &mut report);
        relocate_cursor(host, &report);
        return report;
    }

    let mut consumed = vec![false; sections.len()];
    for entry in &targeted {
        let Some(index) = find_section_for(&sections, &consumed, &entry.text) else {
            report.skipped_headings.push(entry.text.clone());
            continue;
        };

        let blocks = body_to_paragraphs(&sections[index].body);
        if blocks.is_empty() {
            report.skipped_headings.push(entry.text.clone());
            continue;
        }
        consumed[index] = true;

        insert_under(host, &snapshot, entry, blocks, &mut report);
    }

    relocate_cursor(host, &report);
    report
}

/// Insert flat paragraph content after the block the cursor sits in, one
/// block per non-blank line. Used for "continue writing here" results that
/// carry no section markers. The cursor moves to the end of the insertion.
pub fn continue_at_cursor<H: DocumentHost>(
    host: &mut H,
    blob: &str,
) -> Result<MergeReport, HostError> {
    let cursor = host.cursor_position()?;
    let blocks = body_to_paragraphs(blob);
    if blocks.is_empty() {
        return Ok(MergeReport::default());
    }

    let ids = host.insert_after(&cursor.block_id, blocks)?;
    if let Some(last) = ids.last() {
        host.set_cursor(last, CursorEdge::End)?;
    }
    Ok(MergeReport {
        inserted_blocks: ids.len(),
        first_inserted: ids.into_iter().next(),
        ..MergeReport::default()
    })
}

/// One tokenized paragraph block per non-blank line. Bodies never go
/// through the line classifier, so structural markers stay literal.
pub fn body_to_paragraphs(body: &str) -> Vec<Block> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| Block::paragraph(tokenize(line)))
        .collect()
}

/// Degraded path for a blob with no section markers: everything lands
/// after the first targeted heading only.
fn merge_flat_fallback<H: DocumentHost>(
    host: &mut H,
    snapshot: &Snapshot,
    blob: &str,
    targeted: &[HeadingEntry],
    report: &mut MergeReport,
) {
    tracing::debug!("no sections in generation blob, inserting flat content");
    let first = &targeted[0];
    let blocks = body_to_paragraphs(blob);
    if blocks.is_empty() {
        report.skipped_headings.push(first.text.clone());
        return;
    }
    insert_under(host, snapshot, first, blocks, report);
    for entry in &targeted[1..] {
        report.skipped_headings.push(entry.text.clone());
    }
}

fn insert_under<H: DocumentHost>(
    host: &mut H,
    snapshot: &Snapshot,
    entry: &HeadingEntry,
    blocks: Vec<Block>,
    report: &mut MergeReport,
) {
    // Address the heading by the id captured at analysis time: ids are
    // stable across our own insertions, positions are not.
    let Some(target) = snapshot.get(entry.position) else {
        tracing::warn!(heading = %entry.text, "heading position no longer in snapshot");
        report.skipped_headings.push(entry.text.clone());
        return;
    };

    match host.insert_after(&target.id, blocks) {
        Ok(ids) => {
            report.inserted_blocks += ids.len();
            if report.first_inserted.is_none() {
                report.first_inserted = ids.into_iter().next();
            }
            report.filled_headings.push(entry.text.clone());
        }
        Err(err) => {
            tracing::warn!(heading = %entry.text, error = %err, "insertion step skipped");
            report.skipped_headings.push(entry.text.clone());
        }
    }
}

fn relocate_cursor<H: DocumentHost>(host: &mut H, report: &MergeReport) {
    if let Some(first) = &report.first_inserted
        && let Err(err) = host.set_cursor(first, CursorEdge::Start)
    {
        tracing::warn!(error = %err, "could not relocate cursor after merge");
    }
}

/// Find the first unconsumed section matching a heading text: exact name
/// equality first, then the loose fallback for generators that do not echo
/// headings verbatim: the section name must contain the heading text with
/// its conventional numbering prefix stripped.
fn find_section_for(
    sections: &[ContentSection],
    consumed: &[bool],
    heading_text: &str,
) -> Option<usize> {
    let exact = sections
        .iter()
        .enumerate()
        .find(|(i, s)| !consumed[*i] && s.heading_name == heading_text)
        .map(|(i, _)| i);
    if exact.is_some() {
        return exact;
    }

    let stripped = strip_numbering_prefix(heading_text);
    if stripped.is_empty() {
        return None;
    }
    sections
        .iter()
        .enumerate()
        .find(|(i, s)| !consumed[*i] && s.heading_name.contains(stripped))
        .map(|(i, _)| i)
}

/// Strip a `Bab N:` / `Sub Bab N.M:` chapter-numbering prefix.
fn strip_numbering_prefix(heading_text: &str) -> &str {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    let prefix = PREFIX.get_or_init(|| {
        Regex::new(r"^(Bab|Sub Bab)\s*\d+(\.\d+)?:\s*").expect("invalid numbering prefix regex")
    });
    match prefix.find(heading_text) {
        Some(m) => heading_text[m.end()..].trim(),
        None => heading_text.trim(),
    }
}
