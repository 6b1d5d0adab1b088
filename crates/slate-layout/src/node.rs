use slate_core::{Edge, PaneId, Rect, SplitDirection, Vec2};
use slate_editor::{Tab, TabStrip};

// ──────────────────────────────────────────────
// PaneNode: binary ownership tree for layout
// ──────────────────────────────────────────────

/// A leaf pane: one id, one tab strip.
pub(crate) struct LeafPane {
    pub(crate) id: PaneId,
    pub(crate) strip: TabStrip,
}

/// Either a leaf holding a tab strip, or a split holding exactly two
/// children. The two-children invariant is structural, not checked.
pub(crate) enum PaneNode {
    Leaf(LeafPane),
    Split {
        direction: SplitDirection,
        ratio: f32,
        first: Box<PaneNode>,
        second: Box<PaneNode>,
    },
}

impl PaneNode {
    /// Transient stand-in used while re-parenting during a collapse;
    /// never observable after the mutation completes.
    fn placeholder() -> Self {
        PaneNode::Leaf(LeafPane { id: PaneId::MAX, strip: TabStrip::new() })
    }

    /// Returns true if this node (or any descendant) is the given leaf.
    pub(crate) fn contains(&self, pane: PaneId) -> bool {
        match self {
            PaneNode::Leaf(leaf) => leaf.id == pane,
            PaneNode::Split { first, second, .. } => first.contains(pane) || second.contains(pane),
        }
    }

    /// Collect all leaf PaneIds in this subtree, in layout order.
    pub(crate) fn pane_ids(&self, out: &mut Vec<PaneId>) {
        match self {
            PaneNode::Leaf(leaf) => out.push(leaf.id),
            PaneNode::Split { first, second, .. } => {
                first.pane_ids(out);
                second.pane_ids(out);
            }
        }
    }

    pub(crate) fn strip(&self, pane: PaneId) -> Option<&TabStrip> {
        match self {
            PaneNode::Leaf(leaf) if leaf.id == pane => Some(&leaf.strip),
            PaneNode::Leaf(_) => None,
            PaneNode::Split { first, second, .. } => {
                first.strip(pane).or_else(|| second.strip(pane))
            }
        }
    }

    pub(crate) fn strip_mut(&mut self, pane: PaneId) -> Option<&mut TabStrip> {
        match self {
            PaneNode::Leaf(leaf) if leaf.id == pane => Some(&mut leaf.strip),
            PaneNode::Leaf(_) => None,
            PaneNode::Split { first, second, .. } => {
                first.strip_mut(pane).or_else(|| second.strip_mut(pane))
            }
        }
    }

    /// Traverse the tree and compute the rect for every leaf pane.
    pub(crate) fn compute_rects(&self, rect: Rect, out: &mut Vec<(PaneId, Rect)>) {
        match self {
            PaneNode::Leaf(leaf) => out.push((leaf.id, rect)),
            PaneNode::Split { direction, ratio, first, second } => {
                let (first_rect, second_rect) = split_rect(rect, *direction, *ratio);
                first.compute_rects(first_rect, out);
                second.compute_rects(second_rect, out);
            }
        }
    }

    /// Replace the `target` leaf with a split at the dropped edge: the
    /// leaf's existing strip goes to one child, a fresh strip holding
    /// exactly `tab` goes to the side the edge names (left/top first).
    /// The retained side keeps the original PaneId; the new side gets
    /// `new_id`.
    pub(crate) fn split_leaf(&mut self, target: PaneId, edge: Edge, tab: Tab, new_id: PaneId) -> bool {
        match self {
            PaneNode::Leaf(leaf) if leaf.id == target => {
                let mut existing_strip = std::mem::take(&mut leaf.strip);
                existing_strip.set_in_split(true);
                let mut incoming_strip = TabStrip::new();
                incoming_strip.set_in_split(true);
                incoming_strip.transfer_in(tab);

                let existing = PaneNode::Leaf(LeafPane { id: leaf.id, strip: existing_strip });
                let added = PaneNode::Leaf(LeafPane { id: new_id, strip: incoming_strip });
                let (first, second) = if edge.is_leading() {
                    (added, existing)
                } else {
                    (existing, added)
                };
                *self = PaneNode::Split {
                    direction: edge.direction(),
                    ratio: 0.5,
                    first: Box::new(first),
                    second: Box::new(second),
                };
                true
            }
            PaneNode::Leaf(_) => false,
            PaneNode::Split { first, second, .. } => {
                // A dropped tab cannot be cloned; thread it through whichever
                // side actually holds the target.
                if first.contains(target) {
                    first.split_leaf(target, edge, tab, new_id)
                } else if second.contains(target) {
                    second.split_leaf(target, edge, tab, new_id)
                } else {
                    false
                }
            }
        }
    }

    /// Collapse the split whose direct child is the leaf `target`: the
    /// split is replaced by the sibling subtree, ownership moved. Returns
    /// true if the split was found and collapsed.
    pub(crate) fn collapse_parent_of(&mut self, target: PaneId) -> bool {
        if let PaneNode::Split { first, second, .. } = self {
            let first_is_target = matches!(&**first, PaneNode::Leaf(l) if l.id == target);
            let second_is_target = matches!(&**second, PaneNode::Leaf(l) if l.id == target);
            if first_is_target || second_is_target {
                let survivor = if first_is_target { second } else { first };
                let node = std::mem::replace(&mut **survivor, PaneNode::placeholder());
                *self = node;
                return true;
            }
            first.collapse_parent_of(target) || second.collapse_parent_of(target)
        } else {
            false
        }
    }

    /// Find the split node whose divider is closest to the given position,
    /// given the rect this node occupies.
    pub(crate) fn find_divider_at(
        &self,
        rect: Rect,
        position: Vec2,
        best: &mut Option<(f32, Vec<bool>)>,
        path: &mut Vec<bool>,
    ) {
        if let PaneNode::Split { direction, ratio, first, second } = self {
            let divider_pos = match direction {
                SplitDirection::Horizontal => rect.x + rect.width * ratio,
                SplitDirection::Vertical => rect.y + rect.height * ratio,
            };

            let dist = match direction {
                SplitDirection::Horizontal => (position.x - divider_pos).abs(),
                SplitDirection::Vertical => (position.y - divider_pos).abs(),
            };

            // The position must be within the perpendicular extent of the divider.
            let in_range = match direction {
                SplitDirection::Horizontal => {
                    position.y >= rect.y && position.y <= rect.y + rect.height
                }
                SplitDirection::Vertical => {
                    position.x >= rect.x && position.x <= rect.x + rect.width
                }
            };

            if in_range {
                let closer = match best {
                    Some((best_dist, _)) => dist < *best_dist,
                    None => true,
                };
                if closer {
                    *best = Some((dist, path.clone()));
                }
            }

            let (first_rect, second_rect) = split_rect(rect, *direction, *ratio);

            path.push(false);
            first.find_divider_at(first_rect, position, best, path);
            path.pop();

            path.push(true);
            second.find_divider_at(second_rect, position, best, path);
            path.pop();
        }
    }

    /// Apply a divider drag: follow the path to the split node, derive the
    /// new ratio from the position and the rect at that level.
    pub(crate) fn apply_drag(&mut self, rect: Rect, path: &[bool], position: Vec2, min_ratio: f32) {
        if let PaneNode::Split { direction, ratio, first, second } = self {
            if path.is_empty() {
                let new_ratio = match direction {
                    SplitDirection::Horizontal => (position.x - rect.x) / rect.width,
                    SplitDirection::Vertical => (position.y - rect.y) / rect.height,
                };
                *ratio = new_ratio.clamp(min_ratio, 1.0 - min_ratio);
            } else {
                let (first_rect, second_rect) = split_rect(rect, *direction, *ratio);
                if !path[0] {
                    first.apply_drag(first_rect, &path[1..], position, min_ratio);
                } else {
                    second.apply_drag(second_rect, &path[1..], position, min_ratio);
                }
            }
        }
    }
}

// ──────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────

/// Split a rect into two sub-rects based on direction and ratio.
pub(crate) fn split_rect(rect: Rect, direction: SplitDirection, ratio: f32) -> (Rect, Rect) {
    match direction {
        SplitDirection::Horizontal => {
            let first_width = rect.width * ratio;
            let second_width = rect.width - first_width;
            (
                Rect::new(rect.x, rect.y, first_width, rect.height),
                Rect::new(rect.x + first_width, rect.y, second_width, rect.height),
            )
        }
        SplitDirection::Vertical => {
            let first_height = rect.height * ratio;
            let second_height = rect.height - first_height;
            (
                Rect::new(rect.x, rect.y, rect.width, first_height),
                Rect::new(rect.x, rect.y + first_height, rect.width, second_height),
            )
        }
    }
}
