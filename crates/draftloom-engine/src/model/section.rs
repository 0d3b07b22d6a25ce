/// A named body of generated text, produced by splitting a generation blob
/// on its section marker lines.
///
/// Sections exist only for the duration of one merge operation; they are
/// matched against heading texts and then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSection {
    pub heading_name: String,
    pub body: String,
}

impl ContentSection {
    pub fn new(heading_name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading_name: heading_name.into(),
            body: body.into(),
        }
    }
}
