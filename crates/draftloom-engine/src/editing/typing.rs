use std::collections::VecDeque;

use crate::editing::host::{CursorEdge, DocumentHost, HostError};
use crate::model::{Block, BlockId, TextSpan};

/// Progress of one typing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingStep {
    /// Characters were typed into the current block.
    Typed,
    /// The current block reached its full content.
    BlockFinished,
    /// Nothing left to do (all blocks placed, or the session was canceled).
    Finished,
}

struct ActiveBlock {
    id: BlockId,
    block: Block,
    /// Characters of the rendered text already typed.
    typed_chars: usize,
    total_chars: usize,
}

/// Character-by-character insertion of a block sequence.
///
/// The embedder drives the session by calling [`step`](Self::step) at its
/// chosen interval; the session never sleeps. Each block is adopted by the
/// host empty, grown by whole-character prefixes (kept as a single plain
/// span while typing), and finalized with its real span list once complete.
///
/// Cancellation is safe at any time but only ever leaves whole blocks in
/// the document: the block being typed keeps exactly the text typed so far
/// as a valid plain span, and blocks not yet started are never adopted.
pub struct TypingSession {
    queue: VecDeque<Block>,
    active: Option<ActiveBlock>,
    /// Insertion point: the last fully placed block.
    after: BlockId,
    chars_per_step: usize,
    canceled: bool,
}

impl TypingSession {
    /// Type `blocks` one after another, starting after the block `after`.
    pub fn new(after: BlockId, blocks: Vec<Block>, chars_per_step: usize) -> Self {
        Self {
            queue: blocks.into(),
            active: None,
            after,
            chars_per_step: chars_per_step.max(1),
            canceled: false,
        }
    }

    /// Request cancellation. Takes effect on the next step; the document is
    /// left with whole blocks only.
    pub fn cancel(&mut self) {
        self.canceled = true;
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty() && self.active.is_none()
    }

    /// Advance the session by one tick.
    pub fn step<H: DocumentHost>(&mut self, host: &mut H) -> Result<TypingStep, HostError> {
        if self.canceled {
            // The partially typed block (if any) stays as typed so far; it
            // is already a valid plain-span block in the host.
            self.active = None;
            self.queue.clear();
            return Ok(TypingStep::Finished);
        }

        if self.active.is_none() {
            let Some(block) = self.queue.pop_front() else {
                return Ok(TypingStep::Finished);
            };
            let total_chars = block.text().chars().count();
            let shell = Block::new(block.kind, Vec::new());
            let ids = host.insert_after(&self.after, vec![shell])?;
            let id = ids
                .into_iter()
                .next()
                .ok_or_else(|| HostError::UnknownBlock(self.after.clone()))?;
            self.active = Some(ActiveBlock {
                id,
                block,
                typed_chars: 0,
                total_chars,
            });
        }

        let active = self.active.as_mut().expect("active block was just set");
        active.typed_chars = (active.typed_chars + self.chars_per_step).min(active.total_chars);

        if active.typed_chars >= active.total_chars {
            // Final update swaps the plain scratch text for the real spans.
            let finished = self.active.take().expect("active block present");
            let final_block = Block::new(finished.block.kind, finished.block.spans);
            host.update_block(&finished.id, final_block)?;
            host.set_cursor(&finished.id, CursorEdge::End)?;
            self.after = finished.id;
            return Ok(TypingStep::BlockFinished);
        }

        let prefix: String = active.block.text().chars().take(active.typed_chars).collect();
        let partial = Block::new(active.block.kind, vec![TextSpan::plain(prefix)]);
        host.update_block(&active.id, partial)?;
        Ok(TypingStep::Typed)
    }

    /// Drive the session to completion in one call. Useful when the
    /// embedder disables the animation.
    pub fn run_to_end<H: DocumentHost>(&mut self, host: &mut H) -> Result<(), HostError> {
        loop {
            if let TypingStep::Finished = self.step(host)? {
                return Ok(());
            }
        }
    }
}
