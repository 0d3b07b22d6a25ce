//! Structural core for an AI-assisted block editor.
//!
//! The engine turns generation-service output into typed blocks
//! (classify-then-tokenize), understands the heading outline of the live
//! document, and merges new content into the right place through an
//! abstract [`DocumentHost`] boundary. It owns no rendering, no transport,
//! and no persistence; it is a library consumed by a UI layer.

pub mod assist;
pub mod editing;
pub mod model;
pub mod parsing;

// Re-export key types for easier usage
pub use assist::{
    AssistError, AssistOptions, Assistant, GenerationError, GenerationParams, GenerationService,
    StructurePlacement,
};
pub use editing::{
    ChangeNotifier, CursorEdge, CursorPosition, DocumentHost, HostError, MemoryHost, MergePolicy,
    MergeReport, TypingSession, TypingStep, ensure_heading_ids,
};
pub use model::{
    Block, BlockId, BlockKind, ContentSection, HeadingEntry, Outline, Snapshot, SpanStyles,
    TextSpan,
};
pub use parsing::{DEFAULT_HEADING_CAP, LineClassifier, split_sections, tokenize};
