pub mod block;
pub mod outline;
pub mod section;
pub mod snapshot;

pub use block::{Block, BlockId, BlockKind, SpanStyles, TextSpan, normalize_spans};
pub use outline::{HeadingEntry, Outline, content_under};
pub use section::ContentSection;
pub use snapshot::Snapshot;
