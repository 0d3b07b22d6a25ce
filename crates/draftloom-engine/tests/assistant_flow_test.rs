//! End-to-end flow through the assistant: generate an outline, fill its
//! sections, then continue writing under a heading, all against the
//! in-memory reference host with a scripted generation service.

use draftloom_engine::assist::{Assistant, GenerationError, GenerationParams, GenerationService};
use draftloom_engine::editing::{CursorEdge, DocumentHost, MemoryHost};
use draftloom_engine::model::BlockKind;
use draftloom_engine::{StructurePlacement, ensure_heading_ids};

/// Pops one scripted response per call, failing the test when the script
/// runs dry.
struct ScriptedService {
    responses: Vec<String>,
}

impl ScriptedService {
    fn new(responses: &[&str]) -> Self {
        Self {
            responses: responses.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GenerationService for ScriptedService {
    fn generate(
        &mut self,
        _instruction: &str,
        _params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        if self.responses.is_empty() {
            return Err(GenerationError::RequestFailed(
                "script exhausted".to_string(),
            ));
        }
        Ok(self.responses.remove(0))
    }
}

fn texts(host: &MemoryHost) -> Vec<String> {
    host.enumerate().iter().map(|b| b.text()).collect()
}

#[test]
fn structure_then_fill_then_continue() {
    let structure_blob = "\
# Career Guide

## Bab 1: Pengenalan
### Sub Bab 1.1: Konsep Dasar

## Bab 2: Persiapan
";
    let content_blob = "\
===[Bab 1: Pengenalan]===
Opening paragraph.

Second paragraph.

===[Persiapan]===
Preparation paragraph.
";
    let continue_blob = "Continued paragraph.";

    let mut host = MemoryHost::new();
    let mut assistant = Assistant::new(ScriptedService::new(&[
        structure_blob,
        content_blob,
        continue_blob,
    ]));

    // 1. Fresh outline replaces the (empty) document.
    let report = assistant
        .generate_structure(&mut host, "starting a tech career", StructurePlacement::Replace)
        .unwrap();
    assert_eq!(report.inserted_blocks, 4);
    assert_eq!(
        texts(&host),
        vec![
            "Career Guide",
            "Bab 1: Pengenalan",
            "Sub Bab 1.1: Konsep Dasar",
            "Bab 2: Persiapan",
        ]
    );

    // 2. Fill content under the generated headings. The first section name
    // echoes its heading exactly; the second only survives the loose match
    // ("Bab 2: " stripped from the heading, name contained in the section).
    let report = assistant.fill_content(&mut host, None, None).unwrap();
    assert_eq!(
        report.filled_headings,
        vec!["Bab 1: Pengenalan", "Bab 2: Persiapan"]
    );
    // The title and the sub-chapter have no matching section.
    assert_eq!(
        report.skipped_headings,
        vec!["Career Guide", "Sub Bab 1.1: Konsep Dasar"]
    );
    assert_eq!(
        texts(&host),
        vec![
            "Career Guide",
            "Bab 1: Pengenalan",
            "Opening paragraph.",
            "Second paragraph.",
            "Sub Bab 1.1: Konsep Dasar",
            "Bab 2: Persiapan",
            "Preparation paragraph.",
        ]
    );

    // Section bodies stay paragraphs even though the outline around them is
    // made of headings.
    let snapshot = host.enumerate();
    assert_eq!(snapshot.blocks()[2].kind, BlockKind::Paragraph);

    // 3. Continue writing from inside the first chapter.
    let cursor_block = snapshot.blocks()[3].id.clone();
    host.set_cursor(&cursor_block, CursorEdge::End).unwrap();

    let report = assistant.continue_writing(&mut host).unwrap();
    assert_eq!(report.inserted_blocks, 1);
    assert_eq!(host.enumerate().blocks()[4].text(), "Continued paragraph.");
}

#[test]
fn heading_ids_survive_repeated_repair_passes() {
    let structure_blob = "# Title\n## One\n## Two";
    let mut host = MemoryHost::new();
    let mut assistant = Assistant::new(ScriptedService::new(&[structure_blob]));
    assistant
        .generate_structure(&mut host, "ids", StructurePlacement::Replace)
        .unwrap();

    // The host assigned ids at adoption; the repair pass must agree.
    let mut blocks = host.enumerate().blocks().to_vec();
    let before: Vec<String> = blocks.iter().map(|b| b.id.to_string()).collect();

    assert_eq!(ensure_heading_ids(&mut blocks), 0);
    assert_eq!(ensure_heading_ids(&mut blocks), 0);

    let after: Vec<String> = blocks.iter().map(|b| b.id.to_string()).collect();
    assert_eq!(before, after);
}

#[test]
fn failed_generation_mid_flow_preserves_the_document() {
    let mut host = MemoryHost::new();
    let mut assistant = Assistant::new(ScriptedService::new(&["# Only Outline\n## Part"]));

    assistant
        .generate_structure(&mut host, "topic", StructurePlacement::Replace)
        .unwrap();
    let before = texts(&host);

    // The script is exhausted, so the next call fails at the service.
    let result = assistant.fill_content(&mut host, None, None);
    assert!(result.is_err());
    assert_eq!(texts(&host), before);
    assert!(!assistant.is_busy());
}
