use crate::editing::ids::ensure_heading_ids;
use crate::model::{Block, BlockId, Snapshot};

/// Which edge of a block the cursor lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorEdge {
    Start,
    End,
}

/// The cursor as the host reports it: the block it sits in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorPosition {
    pub block_id: BlockId,
}

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("unknown block id: {0}")]
    UnknownBlock(BlockId),
    #[error("no cursor position available")]
    NoCursor,
}

/// The ordered, mutable block store the engine reads from and writes to.
///
/// The host exclusively owns block identity and ordering: insertion
/// primitives assign fresh ids to the adopted blocks and return them in
/// order, and an id is never reassigned afterwards. The engine only reads
/// snapshots and issues these commands; it keeps no reference into host
/// internals.
pub trait DocumentHost {
    /// Current blocks, in order. The returned snapshot is a copy and goes
    /// stale on the next mutation.
    fn enumerate(&self) -> Snapshot;

    /// Insert blocks immediately after `target`, returning the assigned ids.
    fn insert_after(
        &mut self,
        target: &BlockId,
        blocks: Vec<Block>,
    ) -> Result<Vec<BlockId>, HostError>;

    /// Discard the whole document and adopt `blocks` in its place.
    fn replace_all(&mut self, blocks: Vec<Block>) -> Result<Vec<BlockId>, HostError>;

    /// Replace the content of an existing block. The id is preserved.
    fn update_block(&mut self, id: &BlockId, block: Block) -> Result<(), HostError>;

    /// Remove the given blocks. Unknown ids are ignored.
    fn remove_blocks(&mut self, ids: &[BlockId]) -> Result<(), HostError>;

    fn cursor_position(&self) -> Result<CursorPosition, HostError>;

    fn set_cursor(&mut self, id: &BlockId, edge: CursorEdge) -> Result<(), HostError>;
}

/// Reference host backed by a `Vec<Block>`.
///
/// Used by the test suite and by embedders without a native block store.
/// Ids are assigned at adoption; documents adopted wholesale additionally
/// get the heading-identifier repair pass so navigation by heading id works
/// on foreign input.
#[derive(Debug, Default)]
pub struct MemoryHost {
    blocks: Vec<Block>,
    cursor: Option<(BlockId, CursorEdge)>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt an existing document. Blocks without an assigned id get a
    /// fresh one; heading ids are made unique.
    pub fn from_blocks(mut blocks: Vec<Block>) -> Self {
        for block in &mut blocks {
            if !block.id.is_assigned() {
                block.id = BlockId::fresh();
            }
        }
        ensure_heading_ids(&mut blocks);
        Self {
            blocks,
            cursor: None,
        }
    }

    pub fn cursor(&self) -> Option<&(BlockId, CursorEdge)> {
        self.cursor.as_ref()
    }

    fn adopt(blocks: Vec<Block>) -> (Vec<Block>, Vec<BlockId>) {
        let adopted: Vec<Block> = blocks
            .into_iter()
            .map(|b| {
                let id = BlockId::fresh();
                b.with_id(id)
            })
            .collect();
        let ids = adopted.iter().map(|b| b.id.clone()).collect();
        (adopted, ids)
    }

    fn position_of(&self, id: &BlockId) -> Result<usize, HostError> {
        self.blocks
            .iter()
            .position(|b| &b.id == id)
            .ok_or_else(|| HostError::UnknownBlock(id.clone()))
    }
}

impl DocumentHost for MemoryHost {
    fn enumerate(&self) -> Snapshot {
        Snapshot::new(self.blocks.clone())
    }

    fn insert_after(
        &mut self,
        target: &BlockId,
        blocks: Vec<Block>,
    ) -> Result<Vec<BlockId>, HostError> {
        let at = self.position_of(target)?;
        let (adopted, ids) = Self::adopt(blocks);
        self.blocks.splice(at + 1..at + 1, adopted);
        Ok(ids)
    }

    fn replace_all(&mut self, blocks: Vec<Block>) -> Result<Vec<BlockId>, HostError> {
        let (adopted, ids) = Self::adopt(blocks);
        self.blocks = adopted;
        self.cursor = None;
        Ok(ids)
    }

    fn update_block(&mut self, id: &BlockId, block: Block) -> Result<(), HostError> {
        let at = self.position_of(id)?;
        self.blocks[at] = block.with_id(id.clone());
        Ok(())
    }

    fn remove_blocks(&mut self, ids: &[BlockId]) -> Result<(), HostError> {
        self.blocks.retain(|b| !ids.contains(&b.id));
        if let Some((cursor_id, _)) = &self.cursor
            && ids.contains(cursor_id)
        {
            self.cursor = None;
        }
        Ok(())
    }

    fn cursor_position(&self) -> Result<CursorPosition, HostError> {
        match &self.cursor {
            Some((block_id, _)) => Ok(CursorPosition {
                block_id: block_id.clone(),
            }),
            None => Err(HostError::NoCursor),
        }
    }

    fn set_cursor(&mut self, id: &BlockId, edge: CursorEdge) -> Result<(), HostError> {
        self.position_of(id)?;
        self.cursor = Some((id.clone(), edge));
        Ok(())
    }
}
