use std::sync::OnceLock;

use regex::Regex;

use crate::model::ContentSection;

/// A marker line naming the section that follows it, e.g. `===[Intro]===`.
fn marker_regex() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"^===\[(.+)\]===$").expect("invalid section marker regex"))
}

/// Render the marker line for a section name. Shared with the prompt
/// templates so the generation contract and the splitter cannot drift.
pub fn marker_line(name: &str) -> String {
    format!("===[{name}]===")
}

/// Split a generation blob into named sections.
///
/// A marker line opens a new section and closes the previous one; the final
/// section closes at end of input, no closing marker exists. Non-blank lines
/// accumulate into the open section's body joined by newlines. Lines before
/// the first marker have no section and are dropped.
///
/// A blob without markers yields no sections; callers fall back to treating
/// the whole blob as flat content.
pub fn split_sections(blob: &str) -> Vec<ContentSection> {
    let mut sections = Vec::new();
    let mut current: Option<ContentSection> = None;

    for line in blob.lines() {
        let trimmed = line.trim();

        if let Some(captures) = marker_regex().captures(trimmed) {
            if let Some(finished) = current.take() {
                sections.push(finished);
            }
            current = Some(ContentSection::new(&captures[1], ""));
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        if let Some(section) = current.as_mut() {
            if !section.body.is_empty() {
                section.body.push('\n');
            }
            section.body.push_str(trimmed);
        }
    }

    if let Some(finished) = current.take() {
        sections.push(finished);
    }

    sections
}
