// Split-pane layout engine: a binary ownership tree of tab strips.

mod node;
mod tests;

use slate_core::{Edge, PaneId, Rect, Size, Vec2};
use slate_editor::{Tab, TabStrip};
use thiserror::Error;

use node::{LeafPane, PaneNode};

/// Minimum split ratio so a divider drag cannot crush a pane away.
const MIN_RATIO: f32 = 0.1;

/// Divider hit-test threshold in pixels.
const DIVIDER_HIT_THRESHOLD: f32 = 8.0;

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

/// Structural precondition violations. Callers get a typed failure
/// instead of a corrupted tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("pane {0} does not exist in the tree")]
    UnknownPane(PaneId),
    #[error("pane {0} is the root and has no split to collapse")]
    NotInSplit(PaneId),
    #[error("pane {0} still holds tabs")]
    StripNotEmpty(PaneId),
}

// ──────────────────────────────────────────────
// PaneTree
// ──────────────────────────────────────────────

/// The whole window's pane layout: one PaneNode tree plus id allocation
/// and divider-drag bookkeeping.
pub struct PaneTree {
    root: PaneNode,
    next_id: PaneId,
    /// Path to the split node currently being divider-dragged.
    active_drag: Option<Vec<bool>>,
    /// Window size used to reconstruct rects during a divider drag.
    pub last_window_size: Option<Size>,
}

impl PaneTree {
    /// A tree with a single leaf holding `initial` and its PaneId.
    pub fn new(initial: TabStrip) -> (Self, PaneId) {
        let id: PaneId = 1;
        let tree = Self {
            root: PaneNode::Leaf(LeafPane { id, strip: initial }),
            next_id: 2,
            active_drag: None,
            last_window_size: None,
        };
        (tree, id)
    }

    /// Allocate a fresh id. Panes and tabs draw from the same counter;
    /// ids only need to be unique within the window.
    pub fn alloc_id(&mut self) -> PaneId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn pane_ids(&self) -> Vec<PaneId> {
        let mut ids = Vec::new();
        self.root.pane_ids(&mut ids);
        ids
    }

    pub fn contains(&self, pane: PaneId) -> bool {
        self.root.contains(pane)
    }

    /// Leaf lookup: the tab strip a pane owns.
    pub fn strip(&self, pane: PaneId) -> Option<&TabStrip> {
        self.root.strip(pane)
    }

    pub fn strip_mut(&mut self, pane: PaneId) -> Option<&mut TabStrip> {
        self.root.strip_mut(pane)
    }

    /// Split `target` at the dropped edge, the new pane holding exactly
    /// `tab`. Returns the new pane's id, or the tab back if the target
    /// does not exist (the tab must not be lost).
    pub fn split(&mut self, target: PaneId, edge: Edge, tab: Tab) -> Result<PaneId, Tab> {
        if !self.root.contains(target) {
            return Err(tab);
        }
        let new_id = self.next_id;
        self.next_id += 1;
        // contains() was checked above, so split_leaf always finds the leaf.
        self.root.split_leaf(target, edge, tab, new_id);
        Ok(new_id)
    }

    /// Collapse the split that directly holds the empty leaf `target`,
    /// replacing it with the sibling subtree. One level only: cascading
    /// collapses arrive as separate signals.
    pub fn collapse(&mut self, target: PaneId) -> Result<(), TreeError> {
        let strip = self
            .root
            .strip(target)
            .ok_or(TreeError::UnknownPane(target))?;
        if !strip.is_empty() {
            return Err(TreeError::StripNotEmpty(target));
        }
        if matches!(&self.root, PaneNode::Leaf(leaf) if leaf.id == target) {
            return Err(TreeError::NotInSplit(target));
        }
        self.root.collapse_parent_of(target);
        // A survivor promoted to root leaf leaves split mode, restoring
        // reset-on-last-close semantics.
        if let PaneNode::Leaf(leaf) = &mut self.root {
            leaf.strip.set_in_split(false);
        }
        Ok(())
    }

    /// Compute the rect for every leaf pane in layout order.
    pub fn compute_rects(&self, window: Size) -> Vec<(PaneId, Rect)> {
        let mut out = Vec::new();
        let window_rect = Rect::new(0.0, 0.0, window.width, window.height);
        self.root.compute_rects(window_rect, &mut out);
        out
    }

    /// The pane under a point, per the current layout.
    pub fn pane_at(&self, window: Size, position: Vec2) -> Option<PaneId> {
        self.compute_rects(window)
            .into_iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(id, _)| id)
    }

    // ── Divider drag ──

    /// Begin a divider drag if the position is near one.
    pub fn begin_drag(&mut self, position: Vec2, window_size: Size) {
        let window_rect = Rect::new(0.0, 0.0, window_size.width, window_size.height);
        let mut best: Option<(f32, Vec<bool>)> = None;
        let mut path = Vec::new();
        self.root.find_divider_at(window_rect, position, &mut best, &mut path);

        if let Some((dist, divider_path)) = best {
            if dist <= DIVIDER_HIT_THRESHOLD {
                self.active_drag = Some(divider_path);
                self.last_window_size = Some(window_size);
            }
        }
    }

    pub fn is_dragging_divider(&self) -> bool {
        self.active_drag.is_some()
    }

    /// Move the active divider to track the pointer.
    pub fn drag_divider(&mut self, position: Vec2) {
        let (path, window) = match (&self.active_drag, self.last_window_size) {
            (Some(p), Some(w)) => (p.clone(), w),
            _ => return,
        };
        let window_rect = Rect::new(0.0, 0.0, window.width, window.height);
        self.root.apply_drag(window_rect, &path, position, MIN_RATIO);
    }

    pub fn end_drag(&mut self) {
        self.active_drag = None;
    }
}

// ──────────────────────────────────────────────
// Drop-zone resolution
// ──────────────────────────────────────────────

/// Which edge of `rect` a point targets: the axis with the larger
/// normalized distance from center decides the orientation, the sign
/// decides the side. Exactly one edge always wins; ties go vertical.
pub fn zone_at(rect: Rect, point: Vec2) -> Edge {
    let center = rect.center();
    let half_w = rect.width / 2.0;
    let half_h = rect.height / 2.0;
    let dx = if half_w > 0.0 { (point.x - center.x).abs() / half_w } else { 0.0 };
    let dy = if half_h > 0.0 { (point.y - center.y).abs() / half_h } else { 0.0 };

    if dx > dy {
        if point.x < center.x {
            Edge::Left
        } else {
            Edge::Right
        }
    } else if point.y < center.y {
        Edge::Top
    } else {
        Edge::Bottom
    }
}
