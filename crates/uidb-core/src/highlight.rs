// ── Match highlighting ──
//
// Splits display text into matched/unmatched runs so a renderer can color
// the parts of a product name that equal the search term. Matching is
// literal and folds case per character (Unicode simple lowercase, so "Ü"
// matches "ü" but "ß" does not expand to "ss"). It is purely cosmetic and
// independent of how the text index decides what matches.

/// A contiguous run of the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

impl<'a> Segment<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            matched: false,
        }
    }

    fn hit(text: &'a str) -> Self {
        Self {
            text,
            matched: true,
        }
    }
}

fn fold_eq(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Byte length of the match of `term` at the start of `text`, if any. The
/// length is measured in `text`, which may differ from `term.len()`.
fn match_len(text: &str, term: &str) -> Option<usize> {
    let mut chars = text.chars();
    let mut len = 0;
    for t in term.chars() {
        let c = chars.next().filter(|&c| fold_eq(c, t))?;
        len += c.len_utf8();
    }
    Some(len)
}

/// Split `text` around every non-overlapping occurrence of `term`.
///
/// Concatenating the segment texts always reproduces `text`. A blank term
/// yields one unmatched segment.
pub fn highlight<'a>(text: &'a str, term: &str) -> Vec<Segment<'a>> {
    let term = term.trim();
    if term.is_empty() || text.is_empty() {
        return vec![Segment::plain(text)];
    }

    let mut segments = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < text.len() {
        if let Some(len) = match_len(&text[i..], term) {
            if start < i {
                segments.push(Segment::plain(&text[start..i]));
            }
            segments.push(Segment::hit(&text[i..i + len]));
            i += len;
            start = i;
        } else {
            i += text[i..].chars().next().map_or(1, char::len_utf8);
        }
    }
    if start < text.len() {
        segments.push(Segment::plain(&text[start..]));
    }
    segments
}
