//! Instruction templates for the generation service.
//!
//! The templates pin down the only two output contracts the parsers rely
//! on: markdown heading lines for structure generation, and
//! `===[Section]===` marker lines for targeted content generation. Body
//! prose is left entirely to the model.

use crate::model::{HeadingEntry, Outline};
use crate::parsing::marker_line;

/// Ask for a fresh chapter/sub-chapter outline on a topic. Output is plain
/// markdown headings, nothing else.
pub fn structure_prompt(topic: &str) -> String {
    format!(
        "Create a complete outline with chapters and sub-chapters for the topic: {topic}\n\
         \n\
         Required format:\n\
         # Main Title\n\
         \n\
         ## Chapter 1: [chapter name]\n\
         ### Sub-chapter 1.1: [sub-chapter name]\n\
         ### Sub-chapter 1.2: [sub-chapter name]\n\
         \n\
         ## Chapter 2: [chapter name]\n\
         ### Sub-chapter 2.1: [sub-chapter name]\n\
         \n\
         Important:\n\
         - Produce the outline only, no body content\n\
         - Use markdown heading markers (# ## ###) exactly as shown\n\
         - At least 3 chapters with 2-3 sub-chapters each\n\
         - Chapter and sub-chapter names must be specific and descriptive\n\
         - Keep chapters and sub-chapters in sequential order"
    )
}

/// Ask for body content for specific headings of an existing outline,
/// delimited by section markers so the merge engine can route each body to
/// its heading.
pub fn content_prompt(outline: &Outline, targets: &[String], focus: Option<&str>) -> String {
    let structure = outline.serialize_structure();
    let target_list = if targets.is_empty() {
        "All chapters and sub-chapters listed above".to_string()
    } else {
        targets
            .iter()
            .enumerate()
            .map(|(i, t)| format!("{}. {t}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let focus_line = match focus {
        Some(focus) if !focus.trim().is_empty() => format!(" Focus on: {}.", focus.trim()),
        _ => String::new(),
    };
    let example_open = marker_line("Chapter 1: Introduction");
    let example_sub = marker_line("Sub-chapter 1.1: Basic Concepts");

    format!(
        "I have a document with this existing structure:\n\
         \n\
         {structure}\n\
         \n\
         Sections to fill in:\n\
         {target_list}\n\
         \n\
         Task: write detailed body content for each listed section.{focus_line}\n\
         \n\
         Expected format:\n\
         - Separate each section's content with a marker line naming it\n\
         - After the marker, write 2-4 substantial paragraphs\n\
         - Do NOT repeat the markdown headings; they already exist in the document\n\
         \n\
         Example:\n\
         {example_open}\n\
         First paragraph for this chapter...\n\
         \n\
         Second paragraph for this chapter...\n\
         \n\
         {example_sub}\n\
         First paragraph for this sub-chapter...\n\
         \n\
         Important: use ONLY the marker lines to separate sections and keep\n\
         the marker text identical to the section names listed above."
    )
}

/// Ask for freeform detailed content when the document has no heading
/// structure to target.
pub fn freeform_content_prompt(topic: &str) -> String {
    format!(
        "Write detailed content about: {topic}\n\
         \n\
         - Full paragraphs with depth, examples, and practical guidance\n\
         - No markdown headings, body text only\n\
         - Keep the writing engaging and concrete"
    )
}

/// Ask for a continuation of the prose under one heading, given what is
/// already written there.
pub fn continue_prompt(heading: &HeadingEntry, existing_content: &str) -> String {
    format!(
        "Continue writing the section \"{}\" of a document. The section\n\
         currently contains:\n\
         \n\
         {}\n\
         \n\
         Write the next few paragraphs, continuing seamlessly from the text\n\
         above. Plain paragraphs only: no headings, no lists, no markers.",
        heading.text, existing_content
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Snapshot, TextSpan};

    fn sample_outline() -> Outline {
        Outline::analyze(&Snapshot::new(vec![
            Block::heading(1, vec![TextSpan::plain("Guide")]),
            Block::heading(2, vec![TextSpan::plain("Getting Started")]),
        ]))
    }

    #[test]
    fn structure_prompt_embeds_the_topic() {
        let prompt = structure_prompt("career changes");
        assert!(prompt.contains("career changes"));
        assert!(prompt.contains("## Chapter 1"));
    }

    #[test]
    fn content_prompt_lists_targets_and_structure() {
        let prompt = content_prompt(
            &sample_outline(),
            &["Getting Started".to_string()],
            Some("practical steps"),
        );

        assert!(prompt.contains("# Guide"));
        assert!(prompt.contains("## Getting Started"));
        assert!(prompt.contains("1. Getting Started"));
        assert!(prompt.contains("Focus on: practical steps."));
        assert!(prompt.contains("===[Chapter 1: Introduction]==="));
    }

    #[test]
    fn content_prompt_without_targets_addresses_all_sections() {
        let prompt = content_prompt(&sample_outline(), &[], None);
        assert!(prompt.contains("All chapters and sub-chapters"));
        assert!(!prompt.contains("Focus on:"));
    }

    #[test]
    fn continue_prompt_carries_heading_and_context() {
        let heading = HeadingEntry {
            level: 2,
            text: "Getting Started".to_string(),
            position: 1,
        };
        let prompt = continue_prompt(&heading, "Existing paragraph.");
        assert!(prompt.contains("\"Getting Started\""));
        assert!(prompt.contains("Existing paragraph."));
    }
}
