// slate-editor: buffer, document, and tab model.

pub mod buffer;
pub mod document;
pub mod tab;
mod undo;

pub use buffer::{Buffer, LineChange, Position};
pub use document::Document;
pub use tab::{CloseOutcome, Restyle, Tab, TabStrip};
