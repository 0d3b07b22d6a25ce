use crate::model::{Block, BlockId};

/// Immutable, insertion-ordered view of a document's blocks.
///
/// A snapshot is valid only for the host state it was taken from: every host
/// mutation shifts positions, so derived analyses must be recomputed from a
/// fresh snapshot rather than cached across edits.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    blocks: Vec<Block>,
}

impl Snapshot {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Block> {
        self.blocks.get(position)
    }

    pub fn last(&self) -> Option<&Block> {
        self.blocks.last()
    }

    /// Position of the block with the given id, if present.
    pub fn index_of(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }
}

impl From<Vec<Block>> for Snapshot {
    fn from(blocks: Vec<Block>) -> Self {
        Self::new(blocks)
    }
}
