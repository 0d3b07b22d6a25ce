//! Two-stage parsing of generation output: classify each line into a typed
//! block, then tokenize its content into styled spans. The section splitter
//! handles the marker-delimited form used for targeted merges.

pub mod classify;
pub mod inline;
pub mod sections;

pub use classify::{DEFAULT_HEADING_CAP, LineClassifier};
pub use inline::tokenize;
pub use sections::{marker_line, split_sections};
