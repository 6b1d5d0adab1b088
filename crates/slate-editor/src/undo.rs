// Undo/redo subsystem for the editor buffer.

use crate::buffer::{Buffer, LineChange, Position};

/// A single reversible edit operation.
#[derive(Debug, Clone)]
pub(crate) enum EditOp {
    InsertChar { pos: Position, ch: char },
    /// Forward delete. `merged_next` means the newline was deleted and the
    /// next line merged up.
    DeleteChar { pos: Position, ch: char, merged_next: bool },
    /// `result_pos` is the cursor after the backspace.
    Backspace { original_pos: Position, result_pos: Position, ch: Option<char>, merged_line: bool },
    InsertNewline { pos: Position },
    /// Block insertion (paste). Stored normalized; `end_pos` is where the
    /// insertion ended.
    InsertText { pos: Position, text: String, end_pos: Position },
}

impl Buffer {
    /// Undo the last edit. Returns the cursor position to restore and the
    /// affected line range, or None if there is nothing to undo.
    pub fn undo(&mut self) -> Option<(Position, LineChange)> {
        let (op, cursor_before) = self.undo_stack.pop()?;
        let change = match &op {
            EditOp::InsertChar { pos, .. } => {
                self.lines[pos.line].remove(pos.col);
                LineChange { first_line: pos.line, removed: 1, inserted: 1 }
            }
            EditOp::DeleteChar { pos, ch, merged_next } => {
                if *merged_next {
                    let rest = self.lines[pos.line][pos.col..].to_string();
                    self.lines[pos.line].truncate(pos.col);
                    self.lines.insert(pos.line + 1, rest);
                    LineChange { first_line: pos.line, removed: 1, inserted: 2 }
                } else {
                    self.lines[pos.line].insert(pos.col, *ch);
                    LineChange { first_line: pos.line, removed: 1, inserted: 1 }
                }
            }
            EditOp::Backspace { original_pos, result_pos, ch, merged_line } => {
                if *merged_line {
                    let first = original_pos.line - 1;
                    let rest = self.lines[first][result_pos.col..].to_string();
                    self.lines[first].truncate(result_pos.col);
                    self.lines.insert(original_pos.line, rest);
                    LineChange { first_line: first, removed: 1, inserted: 2 }
                } else if let Some(c) = ch {
                    self.lines[result_pos.line].insert(result_pos.col, *c);
                    LineChange { first_line: result_pos.line, removed: 1, inserted: 1 }
                } else {
                    LineChange { first_line: result_pos.line, removed: 1, inserted: 1 }
                }
            }
            EditOp::InsertNewline { pos } => {
                if pos.line + 1 < self.lines.len() {
                    let next = self.lines.remove(pos.line + 1);
                    self.lines[pos.line].push_str(&next);
                }
                LineChange { first_line: pos.line, removed: 2, inserted: 1 }
            }
            EditOp::InsertText { pos, end_pos, .. } => {
                let suffix = self.lines[end_pos.line][end_pos.col..].to_string();
                self.lines[pos.line].truncate(pos.col);
                self.lines[pos.line].push_str(&suffix);
                if end_pos.line > pos.line {
                    self.lines.drain(pos.line + 1..=end_pos.line);
                }
                LineChange {
                    first_line: pos.line,
                    removed: end_pos.line - pos.line + 1,
                    inserted: 1,
                }
            }
        };
        self.redo_stack.push((op, cursor_before));
        self.bump_generation();
        Some((cursor_before, change))
    }

    /// Redo the last undone edit. Returns the cursor position after the
    /// re-applied edit and the affected line range.
    pub fn redo(&mut self) -> Option<(Position, LineChange)> {
        let (op, cursor_before) = self.redo_stack.pop()?;
        let (cursor_after, change) = match &op {
            EditOp::InsertChar { pos, ch } => {
                self.lines[pos.line].insert(pos.col, *ch);
                (
                    Position { line: pos.line, col: pos.col + ch.len_utf8() },
                    LineChange { first_line: pos.line, removed: 1, inserted: 1 },
                )
            }
            EditOp::DeleteChar { pos, merged_next, .. } => {
                if *merged_next {
                    let next = self.lines.remove(pos.line + 1);
                    self.lines[pos.line].push_str(&next);
                    (*pos, LineChange { first_line: pos.line, removed: 2, inserted: 1 })
                } else {
                    self.lines[pos.line].remove(pos.col);
                    (*pos, LineChange { first_line: pos.line, removed: 1, inserted: 1 })
                }
            }
            EditOp::Backspace { original_pos, result_pos, merged_line, .. } => {
                if *merged_line {
                    let current = self.lines.remove(original_pos.line);
                    self.lines[original_pos.line - 1].push_str(&current);
                    (
                        *result_pos,
                        LineChange { first_line: original_pos.line - 1, removed: 2, inserted: 1 },
                    )
                } else {
                    self.lines[result_pos.line].remove(result_pos.col);
                    (
                        *result_pos,
                        LineChange { first_line: result_pos.line, removed: 1, inserted: 1 },
                    )
                }
            }
            EditOp::InsertNewline { pos } => {
                let rest = self.lines[pos.line][pos.col..].to_string();
                self.lines[pos.line].truncate(pos.col);
                self.lines.insert(pos.line + 1, rest);
                (
                    Position { line: pos.line + 1, col: 0 },
                    LineChange { first_line: pos.line, removed: 1, inserted: 2 },
                )
            }
            EditOp::InsertText { pos, text, end_pos } => {
                let suffix = self.lines[pos.line][pos.col..].to_string();
                self.lines[pos.line].truncate(pos.col);
                let text_lines: Vec<&str> = text.split('\n').collect();
                if text_lines.len() == 1 {
                    self.lines[pos.line].push_str(text_lines[0]);
                    self.lines[pos.line].push_str(&suffix);
                } else {
                    self.lines[pos.line].push_str(text_lines[0]);
                    for (i, tl) in text_lines[1..text_lines.len() - 1].iter().enumerate() {
                        self.lines.insert(pos.line + 1 + i, tl.to_string());
                    }
                    let mut last = text_lines.last().unwrap().to_string();
                    last.push_str(&suffix);
                    self.lines.insert(end_pos.line, last);
                }
                (
                    *end_pos,
                    LineChange { first_line: pos.line, removed: 1, inserted: text_lines.len() },
                )
            }
        };
        self.undo_stack.push((op, cursor_before));
        self.bump_generation();
        Some((cursor_after, change))
    }
}
