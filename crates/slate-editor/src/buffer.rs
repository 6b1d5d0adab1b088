// Line-based text storage. Every mutation reports the affected line
// range so highlighting can re-flow from exactly the right place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use slate_core::LineSource;

use crate::undo::EditOp;

/// Find the largest byte offset <= idx that is a valid char boundary.
pub fn floor_char_boundary(s: &str, idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    let mut i = idx;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

/// Which lines an edit touched: `removed` lines starting at `first_line`
/// were replaced by `inserted` lines. This is the line-changed seam the
/// highlighter listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineChange {
    pub first_line: usize,
    pub removed: usize,
    pub inserted: usize,
}

impl LineChange {
    fn edited(line: usize) -> Self {
        Self { first_line: line, removed: 1, inserted: 1 }
    }

    fn split(line: usize) -> Self {
        Self { first_line: line, removed: 1, inserted: 2 }
    }

    fn merged(first_line: usize) -> Self {
        Self { first_line, removed: 2, inserted: 1 }
    }
}

#[derive(Debug)]
pub struct Buffer {
    pub lines: Vec<String>,
    pub file_path: Option<PathBuf>,
    generation: u64,
    /// Snapshot of the content at the last save (or load) point.
    /// Used for content-based dirty tracking.
    saved_content: Vec<String>,
    pub(crate) undo_stack: Vec<(EditOp, Position)>, // (op, cursor before)
    pub(crate) redo_stack: Vec<(EditOp, Position)>,
}

impl Buffer {
    pub fn new() -> Self {
        let lines = vec![String::new()];
        Self {
            saved_content: lines.clone(),
            lines,
            file_path: None,
            generation: 0,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn from_file(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let lines = split_lines(&content);
        Ok(Self {
            saved_content: lines.clone(),
            lines,
            file_path: Some(path.to_path_buf()),
            generation: 0,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        })
    }

    pub fn save(&mut self) -> io::Result<()> {
        let path = self
            .file_path
            .as_ref()
            .ok_or_else(|| io::Error::other("no file path set"))?;
        let content = self.lines.join("\n");
        fs::write(path, &content)?;
        self.saved_content = self.lines.clone();
        self.generation += 1;
        Ok(())
    }

    pub fn insert_char(&mut self, pos: Position, ch: char) -> Option<LineChange> {
        if pos.line >= self.lines.len() {
            return None;
        }
        let col = floor_char_boundary(&self.lines[pos.line], pos.col.min(self.lines[pos.line].len()));
        let actual = Position { line: pos.line, col };
        self.push_undo(EditOp::InsertChar { pos: actual, ch }, pos);
        self.lines[pos.line].insert(col, ch);
        self.generation += 1;
        Some(LineChange::edited(pos.line))
    }

    /// Forward delete at `pos`. At end of line the next line is merged up.
    pub fn delete_char(&mut self, pos: Position) -> Option<LineChange> {
        if pos.line >= self.lines.len() {
            return None;
        }
        let line_len = self.lines[pos.line].len();
        let col = floor_char_boundary(&self.lines[pos.line], pos.col);
        if col < line_len {
            let ch = self.lines[pos.line].remove(col);
            let actual = Position { line: pos.line, col };
            self.push_undo(EditOp::DeleteChar { pos: actual, ch, merged_next: false }, pos);
            self.generation += 1;
            Some(LineChange::edited(pos.line))
        } else if pos.line + 1 < self.lines.len() {
            let next = self.lines.remove(pos.line + 1);
            self.push_undo(EditOp::DeleteChar { pos, ch: '\n', merged_next: true }, pos);
            self.lines[pos.line].push_str(&next);
            self.generation += 1;
            Some(LineChange::merged(pos.line))
        } else {
            None
        }
    }

    /// Delete the character before `pos`. Returns the new cursor position
    /// and the line change, if anything was deleted.
    pub fn backspace(&mut self, pos: Position) -> (Position, Option<LineChange>) {
        if pos.line >= self.lines.len() {
            return (pos, None);
        }
        if pos.col > 0 {
            let col = floor_char_boundary(&self.lines[pos.line], pos.col.min(self.lines[pos.line].len()));
            if col == 0 {
                return (Position { line: pos.line, col: 0 }, None);
            }
            let prev = floor_char_boundary(&self.lines[pos.line], col - 1);
            let ch = self.lines[pos.line].remove(prev);
            let result = Position { line: pos.line, col: prev };
            self.push_undo(
                EditOp::Backspace { original_pos: pos, result_pos: result, ch: Some(ch), merged_line: false },
                pos,
            );
            self.generation += 1;
            (result, Some(LineChange::edited(pos.line)))
        } else if pos.line > 0 {
            // Backspace at start of line merges with the previous line.
            let current = self.lines.remove(pos.line);
            let new_col = self.lines[pos.line - 1].len();
            self.lines[pos.line - 1].push_str(&current);
            let result = Position { line: pos.line - 1, col: new_col };
            self.push_undo(
                EditOp::Backspace { original_pos: pos, result_pos: result, ch: None, merged_line: true },
                pos,
            );
            self.generation += 1;
            (result, Some(LineChange::merged(pos.line - 1)))
        } else {
            (pos, None)
        }
    }

    pub fn insert_newline(&mut self, pos: Position) -> (Position, Option<LineChange>) {
        if pos.line >= self.lines.len() {
            return (pos, None);
        }
        let col = floor_char_boundary(&self.lines[pos.line], pos.col.min(self.lines[pos.line].len()));
        let actual = Position { line: pos.line, col };
        self.push_undo(EditOp::InsertNewline { pos: actual }, pos);
        let rest = self.lines[pos.line][col..].to_string();
        self.lines[pos.line].truncate(col);
        self.lines.insert(pos.line + 1, rest);
        self.generation += 1;
        (
            Position { line: pos.line + 1, col: 0 },
            Some(LineChange::split(pos.line)),
        )
    }

    /// Insert a block of text at `pos` (single undo entry). Returns the end
    /// position and the line change.
    pub fn insert_text(&mut self, pos: Position, text: &str) -> (Position, Option<LineChange>) {
        if pos.line >= self.lines.len() || text.is_empty() {
            return (pos, None);
        }
        let col = floor_char_boundary(&self.lines[pos.line], pos.col.min(self.lines[pos.line].len()));
        let actual = Position { line: pos.line, col };

        let suffix = self.lines[pos.line][col..].to_string();
        self.lines[pos.line].truncate(col);

        // Normalize \r\n to \n, drop stray \r.
        let normalized: String = text.replace("\r\n", "\n").replace('\r', "");
        let text_lines: Vec<&str> = normalized.split('\n').collect();

        let end_pos = if text_lines.len() == 1 {
            self.lines[pos.line].push_str(text_lines[0]);
            let end_col = self.lines[pos.line].len();
            self.lines[pos.line].push_str(&suffix);
            Position { line: pos.line, col: end_col }
        } else {
            self.lines[pos.line].push_str(text_lines[0]);
            for (i, tl) in text_lines[1..text_lines.len() - 1].iter().enumerate() {
                self.lines.insert(pos.line + 1 + i, tl.to_string());
            }
            let last_idx = pos.line + text_lines.len() - 1;
            let mut last_line = text_lines.last().unwrap().to_string();
            let end_col = last_line.len();
            last_line.push_str(&suffix);
            self.lines.insert(last_idx, last_line);
            Position { line: last_idx, col: end_col }
        };

        let inserted = text_lines.len();
        self.push_undo(EditOp::InsertText { pos: actual, text: normalized, end_pos }, pos);
        self.generation += 1;
        let change = LineChange {
            first_line: pos.line,
            removed: 1,
            inserted,
        };
        (end_pos, Some(change))
    }

    fn push_undo(&mut self, op: EditOp, cursor: Position) {
        self.undo_stack.push((op, cursor));
        self.redo_stack.clear();
    }

    pub(crate) fn bump_generation(&mut self) {
        self.generation += 1;
    }

    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(|s| s.as_str())
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_modified(&self) -> bool {
        self.lines != self.saved_content
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for Buffer {
    fn line(&self, idx: usize) -> Option<&str> {
        Buffer::line(self, idx)
    }

    fn line_count(&self) -> usize {
        Buffer::line_count(self)
    }
}

fn split_lines(content: &str) -> Vec<String> {
    let lines: Vec<String> = if content.is_empty() {
        vec![String::new()]
    } else {
        content.lines().map(String::from).collect()
    };
    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}
