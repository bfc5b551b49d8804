//! Line-level pre-pass run before block reconstruction.
//!
//! Two kinds of physical line are removed here:
//! - lines carrying a media placeholder (counted into `media_count`)
//! - lines ending in `": null"`, the exporter's marker for unrenderable content
//!
//! The extractor repeats the null check on whole block bodies; either check
//! may fire first depending on where the `null` sits.

use tracing::trace;

/// Default marker the exporter writes in place of attachments.
pub const DEFAULT_MEDIA_MARKER: &str = "<Media omitted>";

/// Physical lines that survived the pre-pass, with their original line
/// numbers (1-indexed), plus what was removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredLines<'a> {
    /// Surviving `(line number, line)` pairs in input order.
    pub lines: Vec<(usize, &'a str)>,
    /// Lines removed because they contained a media marker.
    pub media_lines: usize,
    /// Lines removed because they ended in `": null"`.
    pub null_lines: usize,
}

/// Whether a line carries the exporter's `null` body.
#[must_use]
pub fn is_null_line(line: &str) -> bool {
    line.trim().ends_with(": null")
}

/// Run the pre-pass over `content`, split on conventional line separators.
#[must_use]
pub fn prefilter_lines<'a, S: AsRef<str>>(content: &'a str, media_markers: &[S]) -> FilteredLines<'a> {
    let mut out = FilteredLines::default();

    for (idx, line) in content.lines().enumerate() {
        let line_num = idx + 1;

        if media_markers.iter().any(|m| line.contains(m.as_ref())) {
            trace!(line = line_num, "Dropping media placeholder line");
            out.media_lines += 1;
            continue;
        }
        if is_null_line(line) {
            trace!(line = line_num, "Dropping null line");
            out.null_lines += 1;
            continue;
        }
        out.lines.push((line_num, line));
    }

    out
}
