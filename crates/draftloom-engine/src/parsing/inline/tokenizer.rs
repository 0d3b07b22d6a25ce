use crate::model::{TextSpan, normalize_spans};

use super::{cursor::Cursor, kinds::DELIMITERS};

/// Splits one line of text into styled spans.
///
/// A single forward scan: at each position the delimiters are tried in
/// priority order, and the first one that both opens and closes wins. Input
/// consumed by an accepted match is never revisited, so overlapping
/// candidates further right are discarded by construction. A delimiter with
/// no closing partner is literal text.
///
/// There is no error path: malformed markup degrades to plain spans, and an
/// empty line yields a single empty plain span.
pub fn tokenize(line: &str) -> Vec<TextSpan> {
    if line.is_empty() {
        return vec![TextSpan::plain("")];
    }

    let mut cur = Cursor::new(line);
    let mut out = Vec::new();
    let mut text_start = 0;

    while !cur.eof() {
        if let Some((span, end)) = try_delimited(&cur) {
            flush_plain(&mut out, line, text_start, cur.pos());
            out.push(span);
            cur.seek(end);
            text_start = end;
            continue;
        }
        cur.bump();
    }

    flush_plain(&mut out, line, text_start, cur.pos());
    normalize_spans(out)
}

/// Attempts to read a delimited span starting at the cursor.
///
/// Returns the styled span and the byte offset just past its closing
/// delimiter. The cursor itself is not advanced.
fn try_delimited(cur: &Cursor<'_>) -> Option<(TextSpan, usize)> {
    for (delim, styles) in DELIMITERS {
        if !cur.starts_with(delim) {
            continue;
        }
        let mut inner = cur.clone();
        inner.bump_n(delim.len());
        let Some(close) = inner.find(delim) else {
            // Unterminated: fall through to the next, shorter delimiter.
            continue;
        };
        let text = &cur.s[inner.pos()..close];
        return Some((TextSpan::styled(text, styles), close + delim.len()));
    }
    None
}

fn flush_plain(out: &mut Vec<TextSpan>, line: &str, start: usize, end: usize) {
    if end > start {
        out.push(TextSpan::plain(&line[start..end]));
    }
}
