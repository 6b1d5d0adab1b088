// slate-syntax: rule-table syntax highlighting with multi-line regions.
//
// One pass per line: `highlight_line` turns (text, carried state) into
// styled spans plus the state to hand the next line. `HighlightMap` keeps
// the per-line state cache and drives fixed-point recomputation after
// edits.

mod cache;
mod detect;
mod highlighter;
mod registry;

pub use cache::HighlightMap;
pub use detect::detect_language;
pub use highlighter::{highlight_line, LineHighlightState};
pub use registry::{LanguageDefinition, MultiLineRule, Registry, SingleLineRule};
