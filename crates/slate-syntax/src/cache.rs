// Side-table of per-line outgoing states, recomputed to a fixed point.

use std::ops::Range;

use slate_core::{LineSource, Span};

use crate::highlighter::{highlight_line, LineHighlightState};
use crate::registry::LanguageDefinition;

/// Cached outgoing state per line, keyed by line index. Lives beside the
/// buffer it describes; the buffer itself stores no highlighting data.
#[derive(Debug, Default)]
pub struct HighlightMap {
    outgoing: Vec<LineHighlightState>,
}

impl HighlightMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.outgoing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty()
    }

    /// Cached outgoing state of a line, if it has been computed.
    pub fn state_after(&self, line: usize) -> Option<LineHighlightState> {
        self.outgoing.get(line).copied()
    }

    /// Structural sync after an edit: `removed` cached entries starting at
    /// `start` are replaced by `inserted` fresh ones. Fresh entries carry a
    /// clear state until `refresh` recomputes them.
    pub fn splice(&mut self, start: usize, removed: usize, inserted: usize) {
        let start = start.min(self.outgoing.len());
        let end = (start + removed).min(self.outgoing.len());
        self.outgoing
            .splice(start..end, std::iter::repeat(LineHighlightState::CLEAR).take(inserted));
    }

    /// Recompute lines starting at `dirty.start`. Every line in `dirty` is
    /// recomputed unconditionally; past `dirty.end` recomputation continues
    /// only while a line's new outgoing state differs from its cached value
    /// (the fixed point), or until end of document. Returns the restyled
    /// lines in order for a render surface.
    ///
    /// `lang == None` means no highlighting: restyled lines come back with
    /// empty spans and no propagation happens beyond the dirty range.
    pub fn refresh<S: LineSource + ?Sized>(
        &mut self,
        source: &S,
        lang: Option<&LanguageDefinition>,
        dirty: Range<usize>,
    ) -> Vec<(usize, Vec<Span>)> {
        let count = source.line_count();
        self.outgoing.resize(count, LineHighlightState::CLEAR);

        let mut restyled = Vec::new();
        let mut line = dirty.start.min(count);
        let dirty_end = dirty.end.min(count);

        while line < count {
            let incoming = if line == 0 {
                LineHighlightState::CLEAR
            } else {
                self.outgoing[line - 1]
            };
            let (spans, out) = match lang {
                Some(def) => highlight_line(source.line(line).unwrap_or(""), incoming, def),
                None => (Vec::new(), LineHighlightState::CLEAR),
            };
            let state_changed = out != self.outgoing[line];
            self.outgoing[line] = out;
            restyled.push((line, spans));
            line += 1;
            if line >= dirty_end && !state_changed {
                break;
            }
        }
        restyled
    }

    /// Recompute the whole document (open, language switch).
    pub fn refresh_all<S: LineSource + ?Sized>(
        &mut self,
        source: &S,
        lang: Option<&LanguageDefinition>,
    ) -> Vec<(usize, Vec<Span>)> {
        self.outgoing.clear();
        self.refresh(source, lang, 0..source.line_count())
    }
}
