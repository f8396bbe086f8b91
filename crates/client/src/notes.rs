//! Codec for the inline tag-reference syntax embedded in note text.
//!
//! The upstream service stores tag references inside note text as literal
//! markers of the form `<{{|t|TAG_ID|}}>` (and `<{{|m|ID|}}>` for
//! mentions). This module converts that wire syntax into a readable
//! `#key` / `@key` form for display, and appends well-formed markers when
//! writing notes back.
//!
//! Decoding is display-only and must always succeed: malformed markers
//! are left verbatim, never raised as errors. Raw note text is carried
//! alongside the decoded form everywhere, so the raw syntax round-trips
//! bit-for-bit into updates.

use crate::types::Note;

const MARKER_OPEN: &str = "<{{|";
const MARKER_CLOSE: &str = "|}}>";

/// Kind of inline reference a marker carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerKind {
    Tag,
    Mention,
}

impl MarkerKind {
    fn sigil(self) -> char {
        match self {
            MarkerKind::Tag => '#',
            MarkerKind::Mention => '@',
        }
    }
}

/// Scan `text` and replace every well-formed marker using `resolve`.
/// Everything that is not a well-formed marker is copied through
/// untouched, including partial or malformed marker-like sequences.
fn rewrite_markers(text: &str, mut resolve: impl FnMut(MarkerKind, &str) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(MARKER_OPEN) {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];

        match parse_marker(candidate) {
            Some((kind, id, consumed)) => {
                out.push_str(&resolve(kind, id));
                rest = &candidate[consumed..];
            }
            None => {
                // Not a marker. Emit one char and rescan so an overlapping
                // well-formed marker is still found.
                out.push('<');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Try to parse a marker at the start of `input` (which begins with
/// `<{{|`). Returns the kind, the inner identifier, and the number of
/// bytes consumed.
fn parse_marker(input: &str) -> Option<(MarkerKind, &str, usize)> {
    let body = input.strip_prefix(MARKER_OPEN)?;

    let kind = match body.as_bytes().first()? {
        b't' => MarkerKind::Tag,
        b'm' => MarkerKind::Mention,
        _ => return None,
    };
    let body = body[1..].strip_prefix('|')?;

    let end = body.find(MARKER_CLOSE)?;
    let id = &body[..end];

    // An extra delimiter inside the id means the delimiter count is off;
    // treat the whole thing as malformed.
    if id.is_empty() || id.contains('|') || id.contains(MARKER_OPEN) {
        return None;
    }

    let consumed = MARKER_OPEN.len() + 2 + end + MARKER_CLOSE.len();
    Some((kind, id, consumed))
}

/// Replace every well-formed tag marker with `#ID` and every mention
/// marker with `@ID`. Order-preserving; non-marker text is untouched;
/// never fails.
pub fn decode(text: &str) -> String {
    rewrite_markers(text, |kind, id| format!("{}{}", kind.sigil(), id))
}

/// Decode a note object for display, resolving marker ids to the
/// human-readable keys the API embeds alongside the text. Ids with no
/// matching tag or mention fall back to the raw id.
pub fn decode_note(note: &Note) -> String {
    rewrite_markers(&note.text, |kind, id| {
        let key = match kind {
            MarkerKind::Tag => note
                .tags
                .iter()
                .find(|t| t.id.to_string() == id)
                .map(|t| t.key.as_str()),
            MarkerKind::Mention => note
                .mentions
                .iter()
                .find(|m| m.id.to_string() == id)
                .map(|m| m.key.as_str()),
        };
        format!("{}{}", kind.sigil(), key.unwrap_or(id))
    })
    .trim()
    .to_string()
}

/// Append the raw marker for `tag_id` to note text.
///
/// Idempotent: if the exact marker is already present the text is
/// returned unchanged, so repeated encoding never silently duplicates.
pub fn encode(text: &str, tag_id: &str) -> String {
    let marker = format!("<{{{{|t|{tag_id}|}}}}>");
    if text.contains(&marker) {
        return text.to_string();
    }
    if text.is_empty() {
        marker
    } else {
        format!("{text} {marker}")
    }
}
