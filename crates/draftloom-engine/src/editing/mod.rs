//! Document mutation through the host boundary: the merge engine, the
//! heading-identifier policy, cooperative typing, and change debouncing.
//!
//! Everything here is stateless over host snapshots: analyses are
//! re-derived fresh per operation and insertions address blocks by their
//! stable ids, never by positions carried across mutations.

pub mod host;
pub mod ids;
pub mod merge;
pub mod notify;
pub mod typing;

pub use host::{CursorEdge, CursorPosition, DocumentHost, HostError, MemoryHost};
pub use ids::ensure_heading_ids;
pub use merge::{
    MergePolicy, MergeReport, append_blocks, body_to_paragraphs, continue_at_cursor,
    replace_document, targeted_merge,
};
pub use notify::ChangeNotifier;
pub use typing::{TypingSession, TypingStep};
