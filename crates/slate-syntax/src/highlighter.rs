// Per-line tokenizer with carried multi-line region state.

use slate_core::Span;

use crate::registry::LanguageDefinition;

// ──────────────────────────────────────────────
// Carried line state
// ──────────────────────────────────────────────

/// Bitset of multi-line regions still open at the end of a line, one bit
/// per region rule index in the active language. Opaque to callers; the
/// only meaningful operations are equality and clear-ness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineHighlightState(u32);

impl LineHighlightState {
    pub const CLEAR: Self = Self(0);

    pub fn is_clear(&self) -> bool {
        self.0 == 0
    }

    pub(crate) fn contains(&self, bit: usize) -> bool {
        self.0 & (1 << bit) != 0
    }

    pub(crate) fn set(&mut self, bit: usize) {
        self.0 |= 1 << bit;
    }

    pub(crate) fn clear(&mut self, bit: usize) {
        self.0 &= !(1 << bit);
    }
}

// ──────────────────────────────────────────────
// highlight_line
// ──────────────────────────────────────────────

/// Tokenize one line. Pure: the same (text, incoming, lang) always yields
/// the same spans and outgoing state.
///
/// Priority order: a region carried in from the previous line, then new
/// region starts, then single-line rules in definition order. Earlier
/// claims win; later matches touching a claimed byte are suppressed.
pub fn highlight_line(
    text: &str,
    incoming: LineHighlightState,
    lang: &LanguageDefinition,
) -> (Vec<Span>, LineHighlightState) {
    let mut spans = Vec::new();
    let mut outgoing = incoming;
    let mut claimed = vec![false; text.len()];
    let mut pos = 0;

    // Continuation of a region left open by the previous line.
    if let Some(idx) = (0..lang.regions.len()).find(|&i| incoming.contains(i)) {
        let rule = &lang.regions[idx];
        match rule.end.find(text) {
            Some(m) => {
                push_span(&mut spans, &mut claimed, 0, m.end(), rule.kind);
                outgoing.clear(idx);
                pos = m.end();
            }
            None => {
                // Still inside: the whole line belongs to the region and
                // nothing else applies.
                push_span(&mut spans, &mut claimed, 0, text.len(), rule.kind);
                return (spans, outgoing);
            }
        }
    }

    // New region starts on the uncovered remainder.
    while pos < text.len() {
        let Some((start, after_start, idx)) = earliest_region_start(text, pos, &claimed, lang)
        else {
            break;
        };
        let rule = &lang.regions[idx];
        match rule.end.find_at(text, after_start) {
            Some(m) => {
                push_span(&mut spans, &mut claimed, start, m.end(), rule.kind);
                pos = m.end();
            }
            None => {
                // Unterminated: region runs to end of line and takes
                // precedence over single-line rules for the remainder.
                push_span(&mut spans, &mut claimed, start, text.len(), rule.kind);
                outgoing.set(idx);
                break;
            }
        }
    }

    // Single-line rules over whatever is left unclaimed.
    for rule in &lang.rules {
        for caps in rule.pattern.captures_iter(text) {
            let m = caps.get(1).unwrap_or_else(|| caps.get(0).unwrap());
            if m.is_empty() {
                continue;
            }
            if claimed[m.start()..m.end()].iter().any(|&c| c) {
                continue;
            }
            push_span(&mut spans, &mut claimed, m.start(), m.end(), rule.kind);
        }
    }

    (spans, outgoing)
}

/// Find the earliest region start at or after `pos` that does not overlap
/// a claimed byte. Ties go to the earlier rule in definition order.
fn earliest_region_start(
    text: &str,
    pos: usize,
    claimed: &[bool],
    lang: &LanguageDefinition,
) -> Option<(usize, usize, usize)> {
    let mut best: Option<(usize, usize, usize)> = None;
    for (idx, rule) in lang.regions.iter().enumerate() {
        let mut from = pos;
        while let Some(m) = rule.start.find_at(text, from) {
            if claimed[m.start()..m.end()].iter().any(|&c| c) {
                from = m.end();
                continue;
            }
            if best.map_or(true, |(s, _, _)| m.start() < s) {
                best = Some((m.start(), m.end(), idx));
            }
            break;
        }
    }
    best
}

fn push_span(spans: &mut Vec<Span>, claimed: &mut [bool], start: usize, end: usize, kind: slate_core::TokenKind) {
    if end <= start {
        return;
    }
    spans.push(Span::new(start, end - start, kind));
    for c in &mut claimed[start..end] {
        *c = true;
    }
}
