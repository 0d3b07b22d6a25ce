use std::collections::HashSet;

use crate::model::{Block, BlockId};

/// Enforce the heading-identifier policy over a whole document: every
/// heading block ends up with a non-empty id that is unique across all
/// blocks. Headings with a missing or duplicate id get a fresh one;
/// everything else is left untouched.
///
/// The pass is idempotent: on a compliant document it changes nothing, so
/// running it twice yields identical identifiers the second time. Heading
/// navigation relies on this.
///
/// Returns the number of headings that were repaired.
pub fn ensure_heading_ids(blocks: &mut [Block]) -> usize {
    // Ids already claimed by non-heading blocks count against uniqueness.
    let mut seen: HashSet<String> = blocks
        .iter()
        .filter(|b| !b.is_heading() && b.id.is_assigned())
        .map(|b| b.id.as_str().to_string())
        .collect();

    let mut repaired = 0;
    for block in blocks.iter_mut().filter(|b| b.is_heading()) {
        if block.id.is_assigned() && seen.insert(block.id.as_str().to_string()) {
            continue;
        }
        block.id = BlockId::fresh();
        seen.insert(block.id.as_str().to_string());
        repaired += 1;
    }
    repaired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextSpan;

    fn heading(text: &str) -> Block {
        Block::heading(2, vec![TextSpan::plain(text)])
    }

    fn heading_with_id(text: &str, id: &str) -> Block {
        heading(text).with_id(BlockId::from(id))
    }

    #[test]
    fn missing_heading_ids_are_assigned() {
        let mut blocks = vec![heading("a"), heading("b")];
        let repaired = ensure_heading_ids(&mut blocks);

        assert_eq!(repaired, 2);
        assert!(blocks.iter().all(|b| b.id.is_assigned()));
        assert_ne!(blocks[0].id, blocks[1].id);
    }

    #[test]
    fn duplicate_heading_ids_are_repaired_keeping_the_first() {
        let mut blocks = vec![heading_with_id("a", "dup"), heading_with_id("b", "dup")];
        let repaired = ensure_heading_ids(&mut blocks);

        assert_eq!(repaired, 1);
        assert_eq!(blocks[0].id.as_str(), "dup");
        assert_ne!(blocks[1].id.as_str(), "dup");
    }

    #[test]
    fn heading_colliding_with_paragraph_id_is_repaired() {
        let mut blocks = vec![
            Block::paragraph(vec![TextSpan::plain("p")]).with_id(BlockId::from("shared")),
            heading_with_id("h", "shared"),
        ];
        let repaired = ensure_heading_ids(&mut blocks);

        assert_eq!(repaired, 1);
        assert_eq!(blocks[0].id.as_str(), "shared");
        assert_ne!(blocks[1].id.as_str(), "shared");
    }

    #[test]
    fn assignment_is_idempotent() {
        let mut blocks = vec![heading("a"), heading_with_id("b", "kept"), heading("c")];
        ensure_heading_ids(&mut blocks);
        let first_pass: Vec<BlockId> = blocks.iter().map(|b| b.id.clone()).collect();

        let repaired = ensure_heading_ids(&mut blocks);
        let second_pass: Vec<BlockId> = blocks.iter().map(|b| b.id.clone()).collect();

        assert_eq!(repaired, 0);
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn non_heading_blocks_are_never_touched() {
        let mut blocks = vec![Block::paragraph(vec![TextSpan::plain("p")])];
        let repaired = ensure_heading_ids(&mut blocks);

        assert_eq!(repaired, 0);
        assert!(!blocks[0].id.is_assigned());
    }
}
