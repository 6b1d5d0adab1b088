// Tab drag & drop: an explicit session object driven by a three-state
// machine. No drag state outlives the gesture.

use slate_core::{Edge, PaneId, Rect, TabId, Vec2};
use slate_layout::zone_at;
use thiserror::Error;

use crate::theme::{DRAG_THRESHOLD, TAB_BAR_HEIGHT};
use crate::{PendingAction, Workspace};

// ──────────────────────────────────────────────
// Session & state machine
// ──────────────────────────────────────────────

/// One drag gesture. Created on press, destroyed on drop/cancel; every
/// pane overlay reads the in-flight target from here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub source: PaneId,
    pub tab: TabId,
    pub press: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaneDragState {
    Idle,
    /// Pressed on a tab, not yet past the drag threshold.
    Pending(DragSession),
    Dragging {
        session: DragSession,
        target: Option<DropTarget>,
    },
}

/// Where the pointer currently is, in drop terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// A pane body: dropping splits it at the given edge.
    Pane(PaneId, Edge),
    /// The source strip's own tab bar: dropping reorders, which belongs
    /// to the strip widget, not the tree.
    SourceTabBar,
}

/// What a completed drop did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Split {
        source: PaneId,
        target: PaneId,
        edge: Edge,
        new_pane: PaneId,
    },
    /// Dropped on the source tab bar; the strip widget reorders.
    ReorderRequested { pane: PaneId, tab: TabId },
    /// Dropped outside every pane, or the drag went stale. No state changed.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DragStartError {
    /// Dragging the sole tab of a strip is disallowed: detaching it would
    /// collapse the source pane under the drag's own feet.
    #[error("cannot drag the only tab of a strip")]
    SoleTab,
    #[error("pane {0} does not exist")]
    UnknownPane(PaneId),
    #[error("tab {0} is not in the source strip")]
    UnknownTab(TabId),
}

// ──────────────────────────────────────────────
// Coordinator
// ──────────────────────────────────────────────

impl Workspace {
    /// Press on a tab: arm a pending drag. Becomes a real drag once the
    /// pointer moves past the threshold.
    pub fn begin_tab_drag(
        &mut self,
        source: PaneId,
        tab: TabId,
        press: Vec2,
    ) -> Result<(), DragStartError> {
        let strip = self
            .tree
            .strip(source)
            .ok_or(DragStartError::UnknownPane(source))?;
        if strip.find(tab).is_none() {
            return Err(DragStartError::UnknownTab(tab));
        }
        if strip.len() <= 1 {
            return Err(DragStartError::SoleTab);
        }
        self.drag = PaneDragState::Pending(DragSession { source, tab, press });
        Ok(())
    }

    /// Pointer moved. Promotes a pending drag past the threshold and keeps
    /// the hover target current while dragging.
    pub fn drag_moved(&mut self, position: Vec2) {
        match self.drag {
            PaneDragState::Idle => {}
            PaneDragState::Pending(session) => {
                let manhattan = (position.x - session.press.x).abs()
                    + (position.y - session.press.y).abs();
                if manhattan >= DRAG_THRESHOLD {
                    self.drag = PaneDragState::Dragging {
                        session,
                        target: self.drop_target_at(&session, position),
                    };
                }
            }
            PaneDragState::Dragging { session, .. } => {
                self.drag = PaneDragState::Dragging {
                    session,
                    target: self.drop_target_at(&session, position),
                };
            }
        }
    }

    /// The drop target under the pointer, if any. This is what every pane
    /// overlay highlights while a drag is in flight.
    pub fn drag_target(&self) -> Option<DropTarget> {
        match self.drag {
            PaneDragState::Dragging { target, .. } => target,
            _ => None,
        }
    }

    pub fn is_dragging_tab(&self) -> bool {
        matches!(self.drag, PaneDragState::Dragging { .. })
    }

    /// Release the pointer: resolve the drop and mutate the tree. The
    /// topology change completes before this returns; nothing about the
    /// drag survives it.
    pub fn drop_at(&mut self, position: Vec2) -> DropOutcome {
        let state = std::mem::replace(&mut self.drag, PaneDragState::Idle);
        let session = match state {
            PaneDragState::Dragging { session, .. } => session,
            // A press that never crossed the threshold is a click, not a drop.
            _ => return DropOutcome::Cancelled,
        };

        match self.drop_target_at(&session, position) {
            Some(DropTarget::SourceTabBar) => DropOutcome::ReorderRequested {
                pane: session.source,
                tab: session.tab,
            },
            Some(DropTarget::Pane(target, edge)) => self.split_with_tab(session, target, edge),
            None => DropOutcome::Cancelled,
        }
    }

    /// Abort the gesture; the tab never left its strip, so there is
    /// nothing to restore.
    pub fn cancel_drag(&mut self) {
        self.drag = PaneDragState::Idle;
    }

    fn split_with_tab(&mut self, session: DragSession, target: PaneId, edge: Edge) -> DropOutcome {
        // Re-validate against edits that happened mid-drag.
        let Some(strip) = self.tree.strip(session.source) else {
            return DropOutcome::Cancelled;
        };
        if strip.find(session.tab).is_none() {
            return DropOutcome::Cancelled;
        }
        if target == session.source && strip.len() <= 1 {
            return DropOutcome::Cancelled;
        }

        let tab = match self.tree.strip_mut(session.source).and_then(|s| s.transfer_out(session.tab)) {
            Some(tab) => tab,
            None => return DropOutcome::Cancelled,
        };

        match self.tree.split(target, edge, tab) {
            Ok(new_pane) => {
                // If mid-drag closes shrank the source to this one tab, the
                // source strip is empty now; queue its collapse.
                if self
                    .tree
                    .strip(session.source)
                    .is_some_and(|s| s.is_empty() && s.is_in_split())
                {
                    self.pending.push_back(PendingAction::Collapse(session.source));
                }
                self.focused = new_pane;
                DropOutcome::Split {
                    source: session.source,
                    target,
                    edge,
                    new_pane,
                }
            }
            Err(tab) => {
                // Target vanished mid-drag; put the tab back where it was.
                if let Some(strip) = self.tree.strip_mut(session.source) {
                    strip.transfer_in(tab);
                }
                DropOutcome::Cancelled
            }
        }
    }

    fn drop_target_at(&self, session: &DragSession, position: Vec2) -> Option<DropTarget> {
        for (id, rect) in self.tree.compute_rects(self.window_size) {
            if !rect.contains(position) {
                continue;
            }
            if id == session.source {
                let tab_bar = Rect::new(rect.x, rect.y, rect.width, TAB_BAR_HEIGHT);
                if tab_bar.contains(position) {
                    return Some(DropTarget::SourceTabBar);
                }
            }
            return Some(DropTarget::Pane(id, zone_at(rect, position)));
        }
        None
    }
}
