// Tabs couple a document, its buffer, and its highlight cache; a TabStrip
// is one ordered group of tabs sharing a pane.

use std::io;
use std::path::{Path, PathBuf};

use slate_core::{LanguageId, Span, TabId};
use slate_syntax::{detect_language, HighlightMap, LanguageDefinition, Registry};

use crate::buffer::{Buffer, LineChange, Position};
use crate::document::Document;

/// Lines whose styling changed, in (line index, spans) form, ready for a
/// render surface.
pub type Restyle = Vec<(usize, Vec<Span>)>;

// ──────────────────────────────────────────────
// Tab
// ──────────────────────────────────────────────

#[derive(Debug)]
pub struct Tab {
    pub id: TabId,
    pub document: Document,
    pub buffer: Buffer,
    language: Option<LanguageId>,
    highlight: HighlightMap,
}

impl Tab {
    pub fn untitled(id: TabId) -> Self {
        Self {
            id,
            document: Document::new(),
            buffer: Buffer::new(),
            language: None,
            highlight: HighlightMap::new(),
        }
    }

    /// Open a file: read it, detect the language, highlight everything.
    pub fn from_file(id: TabId, path: &Path) -> io::Result<Self> {
        let buffer = Buffer::from_file(path)?;
        let language = path.to_str().and_then(detect_language);
        let mut tab = Self {
            id,
            document: Document::with_path(path.to_path_buf()),
            buffer,
            language,
            highlight: HighlightMap::new(),
        };
        tab.restyle_all();
        Ok(tab)
    }

    pub fn language(&self) -> Option<LanguageId> {
        self.language
    }

    /// Override the detected language (e.g. from a settings mapping).
    pub fn set_language(&mut self, language: Option<LanguageId>) -> Restyle {
        self.language = language;
        self.restyle_all()
    }

    fn definition(&self) -> Option<&'static LanguageDefinition> {
        self.language.map(|id| Registry::global().get(id))
    }

    pub fn is_modified(&self) -> bool {
        self.document.is_modified()
    }

    pub fn display_name(&self) -> String {
        self.document.display_name()
    }

    /// Tab-bar title: display name plus a dirty marker.
    pub fn title(&self) -> String {
        if self.is_modified() {
            format!("{} *", self.display_name())
        } else {
            self.display_name()
        }
    }

    // ── Edits (all mutations route through here so the highlight cache
    //    stays at its fixed point) ──

    pub fn insert_char(&mut self, pos: Position, ch: char) -> Restyle {
        let change = self.buffer.insert_char(pos, ch);
        self.after_edit(change)
    }

    pub fn delete_char(&mut self, pos: Position) -> Restyle {
        let change = self.buffer.delete_char(pos);
        self.after_edit(change)
    }

    pub fn backspace(&mut self, pos: Position) -> (Position, Restyle) {
        let (new_pos, change) = self.buffer.backspace(pos);
        (new_pos, self.after_edit(change))
    }

    pub fn insert_newline(&mut self, pos: Position) -> (Position, Restyle) {
        let (new_pos, change) = self.buffer.insert_newline(pos);
        (new_pos, self.after_edit(change))
    }

    pub fn insert_text(&mut self, pos: Position, text: &str) -> (Position, Restyle) {
        let (new_pos, change) = self.buffer.insert_text(pos, text);
        (new_pos, self.after_edit(change))
    }

    pub fn undo(&mut self) -> Option<(Position, Restyle)> {
        let (pos, change) = self.buffer.undo()?;
        Some((pos, self.after_edit(Some(change))))
    }

    pub fn redo(&mut self) -> Option<(Position, Restyle)> {
        let (pos, change) = self.buffer.redo()?;
        Some((pos, self.after_edit(Some(change))))
    }

    fn after_edit(&mut self, change: Option<LineChange>) -> Restyle {
        let lang = self.definition();
        let restyled = match change {
            Some(c) => {
                self.highlight.splice(c.first_line, c.removed, c.inserted);
                self.highlight.refresh(
                    &self.buffer,
                    lang,
                    c.first_line..c.first_line + c.inserted,
                )
            }
            None => Vec::new(),
        };
        self.document.set_modified(self.buffer.is_modified());
        restyled
    }

    /// Recompute highlighting for the whole document.
    pub fn restyle_all(&mut self) -> Restyle {
        let lang = self.definition();
        self.highlight.refresh_all(&self.buffer, lang)
    }

    /// Carried state at the end of a line, for callers that render
    /// incrementally.
    pub fn highlight_state_after(&self, line: usize) -> Option<slate_syntax::LineHighlightState> {
        self.highlight.state_after(line)
    }

    // ── File lifecycle ──

    pub fn save(&mut self) -> io::Result<()> {
        self.buffer.save()?;
        self.document.set_modified(false);
        Ok(())
    }

    /// Save-as: adopt a new path, re-detect the language.
    pub fn save_as(&mut self, path: PathBuf) -> io::Result<Restyle> {
        self.buffer.file_path = Some(path.clone());
        self.document.set_file_path(path.clone());
        self.buffer.save()?;
        self.document.set_modified(false);
        self.language = path.to_str().and_then(detect_language);
        Ok(self.restyle_all())
    }

    /// Back to a fresh untitled tab (same id). Used when closing the last
    /// tab of a strip that is not part of a split.
    pub fn reset(&mut self) -> Restyle {
        self.buffer = Buffer::new();
        self.document.reset();
        self.language = None;
        self.restyle_all()
    }

    /// A pristine tab can be reused by open-file instead of spawning a new
    /// tab: untitled, unmodified, empty.
    pub fn is_pristine(&self) -> bool {
        self.document.file_path().is_none()
            && !self.is_modified()
            && self.buffer.line_count() == 1
            && self.buffer.line(0) == Some("")
    }

    /// Replace this pristine tab's content with a file.
    pub fn load_file(&mut self, path: &Path) -> io::Result<Restyle> {
        self.buffer = Buffer::from_file(path)?;
        self.document = Document::with_path(path.to_path_buf());
        self.language = path.to_str().and_then(detect_language);
        Ok(self.restyle_all())
    }
}

// ──────────────────────────────────────────────
// TabStrip
// ──────────────────────────────────────────────

/// What closing a tab did to the strip. `BecameEmpty` is the upward
/// signal a split-owned strip sends so its pane can be collapsed; it is
/// reported, never acted on, from inside the close call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Tab removed; strip still has tabs.
    Closed,
    /// Last tab of a non-split strip: reset in place to one untitled tab.
    Reset,
    /// Last tab of a split strip: the strip is now empty.
    BecameEmpty,
}

#[derive(Debug, Default)]
pub struct TabStrip {
    tabs: Vec<Tab>,
    current: usize,
    in_split: bool,
}

impl TabStrip {
    pub fn new() -> Self {
        Self::default()
    }

    /// A strip seeded with one tab (fresh split children, initial pane).
    pub fn with_tab(tab: Tab) -> Self {
        Self { tabs: vec![tab], current: 0, in_split: false }
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn is_in_split(&self) -> bool {
        self.in_split
    }

    pub fn set_in_split(&mut self, in_split: bool) {
        self.in_split = in_split;
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_tab(&self) -> Option<&Tab> {
        self.tabs.get(self.current)
    }

    pub fn current_tab_mut(&mut self) -> Option<&mut Tab> {
        self.tabs.get_mut(self.current)
    }

    pub fn find(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn find_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    pub fn position_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    pub fn select(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.current = index;
        }
    }

    /// Append a tab and make it current.
    pub fn add_tab(&mut self, tab: Tab) {
        self.tabs.push(tab);
        self.current = self.tabs.len() - 1;
    }

    /// Close a tab by id. See `CloseOutcome` for the three results; a
    /// non-split strip never drops below one tab.
    pub fn close_tab(&mut self, id: TabId) -> Option<CloseOutcome> {
        let index = self.position_of(id)?;
        if self.tabs.len() == 1 {
            return if self.in_split {
                self.tabs.remove(index);
                self.current = 0;
                Some(CloseOutcome::BecameEmpty)
            } else {
                self.tabs[index].reset();
                Some(CloseOutcome::Reset)
            };
        }
        self.tabs.remove(index);
        if self.current >= self.tabs.len() {
            self.current = self.tabs.len() - 1;
        }
        Some(CloseOutcome::Closed)
    }

    /// Detach a tab for a drag in flight. The caller is responsible for
    /// ensuring the strip can afford to lose it.
    pub fn transfer_out(&mut self, id: TabId) -> Option<Tab> {
        let index = self.position_of(id)?;
        let tab = self.tabs.remove(index);
        if self.current >= self.tabs.len() && self.current > 0 {
            self.current = self.tabs.len() - 1;
        }
        Some(tab)
    }

    /// Attach a detached tab and make it current.
    pub fn transfer_in(&mut self, tab: Tab) {
        self.add_tab(tab);
    }
}
