//! Emphasis resolution with the delimiter stack algorithm.
//!
//! The scanner records each `*`/`_` run as an [`Inline::Delimiter`] along
//! with its flanking-derived open/close potential. Once a scope has been
//! scanned, [`resolve_emphasis`] matches closers against openers
//! left-to-right and nests the matched ranges into `EMPHASIS` nodes.
//!
//! - Rule of 3s: if either side can both open and close, the summed run
//!   lengths may not be a multiple of 3 unless both are.
//! - Delimiters only match their own character.
//! - Delimiters strictly between a matched pair become inactive.

use crate::syntax::SyntaxKind;

use super::Inline;

/// A run of `*` or `_` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DelimiterRun {
    pub(crate) ch: char,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) can_open: bool,
    pub(crate) can_close: bool,
}

#[derive(Debug, Clone)]
struct Delimiter {
    ch: char,
    /// Unconsumed part of the run. Openers give up characters from the
    /// end, closers from the front.
    start: usize,
    end: usize,
    original_count: usize,
    can_open: bool,
    can_close: bool,
    active: bool,
}

impl Delimiter {
    fn count(&self) -> usize {
        self.end - self.start
    }
}

/// A matched emphasis span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EmphasisMatch {
    start: usize,
    end: usize,
    content_start: usize,
    content_end: usize,
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || (!c.is_ascii() && !c.is_alphanumeric() && !c.is_whitespace())
}

/// Determine if a delimiter run can open/close emphasis based on flanking
/// rules. Underscores additionally refuse to open or close inside words.
pub(crate) fn analyze_delimiter_run(
    text: &str,
    run_start: usize,
    run_char: char,
    run_count: usize,
) -> (bool, bool) {
    let run_end = run_start + run_count;
    let char_before = text[..run_start].chars().next_back();
    let char_after = text[run_end..].chars().next();

    let followed_by_whitespace = char_after.is_none_or(char::is_whitespace);
    let followed_by_punctuation = char_after.is_some_and(is_punctuation);
    let preceded_by_whitespace = char_before.is_none_or(char::is_whitespace);
    let preceded_by_punctuation = char_before.is_some_and(is_punctuation);

    let left_flanking = !followed_by_whitespace
        && (!followed_by_punctuation || preceded_by_whitespace || preceded_by_punctuation);
    let right_flanking = !preceded_by_whitespace
        && (!preceded_by_punctuation || followed_by_whitespace || followed_by_punctuation);

    if run_char == '_' {
        let can_open = left_flanking && (!right_flanking || preceded_by_punctuation);
        let can_close = right_flanking && (!left_flanking || followed_by_punctuation);
        (can_open, can_close)
    } else {
        (left_flanking, right_flanking)
    }
}

/// How many delimiters a match consumes from each side.
fn use_count(opener: usize, closer: usize) -> usize {
    match opener.min(closer) {
        1 => 1,
        2 => 2,
        n if n % 2 == 1 => 1,
        _ => 2,
    }
}

fn process_emphasis(delimiters: &mut [Delimiter]) -> Vec<EmphasisMatch> {
    let mut matches = Vec::new();

    let mut closer_idx = 0;
    while closer_idx < delimiters.len() {
        let closer = &delimiters[closer_idx];
        if !closer.can_close || !closer.active || closer.count() == 0 {
            closer_idx += 1;
            continue;
        }

        let opener_idx = (0..closer_idx).rev().find(|&j| {
            let opener = &delimiters[j];
            if !opener.active
                || opener.count() == 0
                || !opener.can_open
                || opener.ch != closer.ch
            {
                return false;
            }
            let opener_both = opener.can_open && opener.can_close;
            let closer_both = closer.can_open && closer.can_close;
            if opener_both || closer_both {
                let sum = opener.original_count + closer.original_count;
                if sum.is_multiple_of(3)
                    && !(opener.original_count.is_multiple_of(3)
                        && closer.original_count.is_multiple_of(3))
                {
                    return false;
                }
            }
            true
        });

        let Some(j) = opener_idx else {
            closer_idx += 1;
            continue;
        };

        let used = use_count(delimiters[j].count(), delimiters[closer_idx].count());
        let content_start = delimiters[j].end;
        let content_end = delimiters[closer_idx].start;
        if content_start == content_end {
            closer_idx += 1;
            continue;
        }

        matches.push(EmphasisMatch {
            start: content_start - used,
            end: content_end + used,
            content_start,
            content_end,
        });
        log::trace!(
            "Emphasis match {}..{} (level {})",
            content_start - used,
            content_end + used,
            used
        );

        delimiters[j].end -= used;
        delimiters[closer_idx].start += used;

        for delim in delimiters.iter_mut().take(closer_idx).skip(j + 1) {
            delim.active = false;
        }

        if delimiters[closer_idx].count() == 0 {
            closer_idx += 1;
        }
    }

    matches.sort_by_key(|m| (m.start, std::cmp::Reverse(m.end)));
    matches
}

/// Match the delimiter runs in `items` and nest them into `EMPHASIS` nodes.
/// Unmatched delimiter characters become `TEXT`.
pub(crate) fn resolve_emphasis(items: Vec<Inline>) -> Vec<Inline> {
    let mut delimiters: Vec<Delimiter> = items
        .iter()
        .filter_map(|item| match item {
            Inline::Delimiter(run) => Some(Delimiter {
                ch: run.ch,
                start: run.start,
                end: run.end,
                original_count: run.end - run.start,
                can_open: run.can_open,
                can_close: run.can_close,
                active: true,
            }),
            _ => None,
        })
        .collect();

    if delimiters.is_empty() {
        return items;
    }

    let matches = process_emphasis(&mut delimiters);
    let (Some(first), Some(last)) = (items.first(), items.last()) else {
        return items;
    };
    build(&items, &matches, first.start(), last.end())
}

fn build(items: &[Inline], matches: &[EmphasisMatch], lo: usize, hi: usize) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut pos = lo;

    for m in matches {
        if m.start < pos || m.end > hi {
            // Outside this range, or nested in a match already emitted.
            continue;
        }
        segment(items, pos, m.start, &mut out);

        let mut children = vec![Inline::token(
            SyntaxKind::EMPHASIS_MARKER,
            m.start,
            m.content_start,
        )];
        children.extend(build(items, matches, m.content_start, m.content_end));
        children.push(Inline::token(
            SyntaxKind::EMPHASIS_MARKER,
            m.content_end,
            m.end,
        ));
        out.push(Inline::Node {
            kind: SyntaxKind::EMPHASIS,
            start: m.start,
            end: m.end,
            children,
        });
        pos = m.end;
    }

    segment(items, pos, hi, &mut out);
    out
}

/// Copies the items within `lo..hi`. Delimiter runs cut by a match
/// boundary keep only their unmatched characters, as text.
fn segment(items: &[Inline], lo: usize, hi: usize, out: &mut Vec<Inline>) {
    if lo >= hi {
        return;
    }
    for item in items {
        match item {
            Inline::Delimiter(run) => {
                let start = run.start.max(lo);
                let end = run.end.min(hi);
                if start < end {
                    out.push(Inline::token(SyntaxKind::TEXT, start, end));
                }
            }
            other => {
                if other.start() >= lo && other.end() <= hi {
                    out.push(other.clone());
                }
            }
        }
    }
}
