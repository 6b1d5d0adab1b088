#[cfg(test)]
mod tests {
    use crate::{zone_at, PaneTree, TreeError};
    use slate_core::{Edge, PaneId, Rect, Size, TabId, Vec2};
    use slate_editor::{CloseOutcome, Tab, TabStrip};

    const WINDOW: Size = Size {
        width: 800.0,
        height: 600.0,
    };

    /// Minimum split ratio (mirrors the constant in the main module).
    const MIN_RATIO: f32 = 0.1;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    fn rect_approx_eq(a: &Rect, b: &Rect) -> bool {
        approx_eq(a.x, b.x)
            && approx_eq(a.y, b.y)
            && approx_eq(a.width, b.width)
            && approx_eq(a.height, b.height)
    }

    fn tab(id: TabId) -> Tab {
        Tab::untitled(id)
    }

    /// A tree whose root leaf holds tabs with the given ids.
    fn tree_with_tabs(ids: &[TabId]) -> (PaneTree, PaneId) {
        let mut strip = TabStrip::new();
        for &id in ids {
            strip.add_tab(tab(id));
        }
        PaneTree::new(strip)
    }

    fn tab_ids(tree: &PaneTree, pane: PaneId) -> Vec<TabId> {
        tree.strip(pane)
            .unwrap()
            .tabs()
            .iter()
            .map(|t| t.id)
            .collect()
    }

    /// Detach a tab and drop it on `target` at `edge`.
    fn drag_tab(tree: &mut PaneTree, source: PaneId, tab_id: TabId, target: PaneId, edge: Edge) -> PaneId {
        let tab = tree.strip_mut(source).unwrap().transfer_out(tab_id).unwrap();
        tree.split(target, edge, tab).unwrap()
    }

    fn rect_of(rects: &[(PaneId, Rect)], id: PaneId) -> Rect {
        rects.iter().find(|(pid, _)| *pid == id).unwrap().1
    }

    fn assert_no_gaps_no_overlaps(rects: &[(PaneId, Rect)], window: Size) {
        let window_area = window.width * window.height;
        let total_area: f32 = rects.iter().map(|(_, r)| r.width * r.height).sum();
        assert!(
            approx_eq(total_area, window_area),
            "Total area {total_area} != window area {window_area}"
        );

        for i in 0..rects.len() {
            for j in (i + 1)..rects.len() {
                let a = &rects[i].1;
                let b = &rects[j].1;
                let overlap_x = (a.x.max(b.x) - (a.x + a.width).min(b.x + b.width)).min(0.0);
                let overlap_y = (a.y.max(b.y) - (a.y + a.height).min(b.y + b.height)).min(0.0);
                let overlap_area = overlap_x * overlap_y;
                assert!(
                    overlap_area < 0.01,
                    "Rects {:?} and {:?} overlap with area {overlap_area}",
                    rects[i],
                    rects[j]
                );
            }
        }
    }

    // ──────────────────────────────────────────
    // Basic construction
    // ──────────────────────────────────────────

    #[test]
    fn test_single_pane_fills_window() {
        let (tree, pane) = tree_with_tabs(&[10]);
        let rects = tree.compute_rects(WINDOW);
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].0, pane);
        assert!(rect_approx_eq(&rects[0].1, &Rect::new(0.0, 0.0, 800.0, 600.0)));
    }

    #[test]
    fn test_root_strip_is_not_in_split() {
        let (tree, pane) = tree_with_tabs(&[10]);
        assert!(!tree.strip(pane).unwrap().is_in_split());
    }

    // ──────────────────────────────────────────
    // Splitting
    // ──────────────────────────────────────────

    #[test]
    fn test_drag_right_splits_horizontally() {
        // Tabs [A, B]; dragging B to the right edge → left [A], right [B].
        let (mut tree, p1) = tree_with_tabs(&[10, 11]);
        let p2 = drag_tab(&mut tree, p1, 11, p1, Edge::Right);

        assert_eq!(tab_ids(&tree, p1), vec![10]);
        assert_eq!(tab_ids(&tree, p2), vec![11]);

        let rects = tree.compute_rects(WINDOW);
        assert!(rect_approx_eq(&rect_of(&rects, p1), &Rect::new(0.0, 0.0, 400.0, 600.0)));
        assert!(rect_approx_eq(&rect_of(&rects, p2), &Rect::new(400.0, 0.0, 400.0, 600.0)));
    }

    #[test]
    fn test_drag_left_places_new_pane_first() {
        let (mut tree, p1) = tree_with_tabs(&[10, 11]);
        let p2 = drag_tab(&mut tree, p1, 11, p1, Edge::Left);

        let rects = tree.compute_rects(WINDOW);
        assert!(rect_approx_eq(&rect_of(&rects, p2), &Rect::new(0.0, 0.0, 400.0, 600.0)));
        assert!(rect_approx_eq(&rect_of(&rects, p1), &Rect::new(400.0, 0.0, 400.0, 600.0)));
    }

    #[test]
    fn test_drag_top_and_bottom_split_vertically() {
        let (mut tree, p1) = tree_with_tabs(&[10, 11, 12]);
        let p2 = drag_tab(&mut tree, p1, 11, p1, Edge::Bottom);

        let rects = tree.compute_rects(WINDOW);
        assert!(rect_approx_eq(&rect_of(&rects, p1), &Rect::new(0.0, 0.0, 800.0, 300.0)));
        assert!(rect_approx_eq(&rect_of(&rects, p2), &Rect::new(0.0, 300.0, 800.0, 300.0)));

        let p3 = drag_tab(&mut tree, p1, 12, p1, Edge::Top);
        let rects = tree.compute_rects(WINDOW);
        assert!(rect_approx_eq(&rect_of(&rects, p3), &Rect::new(0.0, 0.0, 800.0, 150.0)));
        assert!(rect_approx_eq(&rect_of(&rects, p1), &Rect::new(0.0, 150.0, 800.0, 150.0)));
    }

    #[test]
    fn test_split_marks_both_strips() {
        let (mut tree, p1) = tree_with_tabs(&[10, 11]);
        let p2 = drag_tab(&mut tree, p1, 11, p1, Edge::Right);
        assert!(tree.strip(p1).unwrap().is_in_split());
        assert!(tree.strip(p2).unwrap().is_in_split());
    }

    #[test]
    fn test_nested_splits_tile_window() {
        let (mut tree, p1) = tree_with_tabs(&[10, 11, 12, 13]);
        let p2 = drag_tab(&mut tree, p1, 11, p1, Edge::Right);
        let p3 = drag_tab(&mut tree, p1, 12, p2, Edge::Bottom);
        let p4 = drag_tab(&mut tree, p1, 13, p1, Edge::Bottom);

        let rects = tree.compute_rects(WINDOW);
        assert_eq!(rects.len(), 4);
        assert_no_gaps_no_overlaps(&rects, WINDOW);

        assert!(rect_approx_eq(&rect_of(&rects, p1), &Rect::new(0.0, 0.0, 400.0, 300.0)));
        assert!(rect_approx_eq(&rect_of(&rects, p4), &Rect::new(0.0, 300.0, 400.0, 300.0)));
        assert!(rect_approx_eq(&rect_of(&rects, p2), &Rect::new(400.0, 0.0, 400.0, 300.0)));
        assert!(rect_approx_eq(&rect_of(&rects, p3), &Rect::new(400.0, 300.0, 400.0, 300.0)));
    }

    #[test]
    fn test_split_unknown_pane_returns_tab() {
        let (mut tree, p1) = tree_with_tabs(&[10, 11]);
        let tab = tree.strip_mut(p1).unwrap().transfer_out(11).unwrap();
        let res = tree.split(999, Edge::Right, tab);
        // The tab must come back rather than be dropped.
        let tab = res.unwrap_err();
        assert_eq!(tab.id, 11);
        tree.strip_mut(p1).unwrap().transfer_in(tab);
        assert_eq!(tab_ids(&tree, p1), vec![10, 11]);
    }

    #[test]
    fn test_pane_ids_are_unique() {
        let (mut tree, p1) = tree_with_tabs(&[10, 11, 12]);
        let p2 = drag_tab(&mut tree, p1, 11, p1, Edge::Right);
        let p3 = drag_tab(&mut tree, p1, 12, p2, Edge::Top);

        let mut ids = vec![p1, p2, p3];
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert_eq!(tree.pane_ids().len(), 3);
    }

    // ──────────────────────────────────────────
    // Collapse
    // ──────────────────────────────────────────

    #[test]
    fn test_close_last_tab_then_collapse() {
        let (mut tree, p1) = tree_with_tabs(&[10, 11]);
        let p2 = drag_tab(&mut tree, p1, 11, p1, Edge::Right);

        let outcome = tree.strip_mut(p2).unwrap().close_tab(11);
        assert_eq!(outcome, Some(CloseOutcome::BecameEmpty));

        tree.collapse(p2).unwrap();
        let rects = tree.compute_rects(WINDOW);
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].0, p1);
        assert!(rect_approx_eq(&rects[0].1, &Rect::new(0.0, 0.0, 800.0, 600.0)));
        assert_eq!(tab_ids(&tree, p1), vec![10]);
    }

    #[test]
    fn test_collapse_preserves_sibling_tab_order() {
        let (mut tree, p1) = tree_with_tabs(&[10, 11, 12]);
        let p2 = drag_tab(&mut tree, p1, 12, p1, Edge::Right);

        tree.strip_mut(p2).unwrap().close_tab(12);
        tree.collapse(p2).unwrap();
        assert_eq!(tab_ids(&tree, p1), vec![10, 11]);
    }

    #[test]
    fn test_collapse_promotes_root_leaf_out_of_split_mode() {
        let (mut tree, p1) = tree_with_tabs(&[10, 11]);
        let p2 = drag_tab(&mut tree, p1, 11, p1, Edge::Right);
        assert!(tree.strip(p1).unwrap().is_in_split());

        tree.strip_mut(p2).unwrap().close_tab(11);
        tree.collapse(p2).unwrap();

        // Closing the survivor's last tab now resets instead of emptying.
        assert!(!tree.strip(p1).unwrap().is_in_split());
        let outcome = tree.strip_mut(p1).unwrap().close_tab(10);
        assert_eq!(outcome, Some(CloseOutcome::Reset));
        assert_eq!(tree.strip(p1).unwrap().len(), 1);
    }

    #[test]
    fn test_collapse_keeps_split_survivor_subtree() {
        // p1 | (p2 / p3); emptying p1 must leave the right subtree intact.
        let (mut tree, p1) = tree_with_tabs(&[10, 11, 12]);
        let p2 = drag_tab(&mut tree, p1, 11, p1, Edge::Right);
        let p3 = drag_tab(&mut tree, p1, 12, p2, Edge::Bottom);

        tree.strip_mut(p1).unwrap().close_tab(10);
        tree.collapse(p1).unwrap();

        let rects = tree.compute_rects(WINDOW);
        assert_eq!(rects.len(), 2);
        assert_no_gaps_no_overlaps(&rects, WINDOW);
        assert!(rect_approx_eq(&rect_of(&rects, p2), &Rect::new(0.0, 0.0, 800.0, 300.0)));
        assert!(rect_approx_eq(&rect_of(&rects, p3), &Rect::new(0.0, 300.0, 800.0, 300.0)));
        // Survivor leaves are still mid-tree, so they keep split semantics.
        assert!(tree.strip(p2).unwrap().is_in_split());
    }

    #[test]
    fn test_collapse_preconditions() {
        let (mut tree, p1) = tree_with_tabs(&[10, 11]);
        assert_eq!(tree.collapse(999), Err(TreeError::UnknownPane(999)));
        assert_eq!(tree.collapse(p1), Err(TreeError::StripNotEmpty(p1)));

        let p2 = drag_tab(&mut tree, p1, 11, p1, Edge::Right);
        assert_eq!(tree.collapse(p2), Err(TreeError::StripNotEmpty(p2)));
    }

    #[test]
    fn test_collapse_root_leaf_rejected() {
        // A root leaf whose strip somehow empties has no split to collapse.
        let (mut tree, p1) = PaneTree::new(TabStrip::new());
        assert_eq!(tree.collapse(p1), Err(TreeError::NotInSplit(p1)));
    }

    #[test]
    fn test_resplit_after_collapse() {
        let (mut tree, p1) = tree_with_tabs(&[10, 11]);
        let p2 = drag_tab(&mut tree, p1, 11, p1, Edge::Right);
        tree.strip_mut(p2).unwrap().close_tab(11);
        tree.collapse(p2).unwrap();

        tree.strip_mut(p1).unwrap().add_tab(tab(20));
        let p3 = drag_tab(&mut tree, p1, 20, p1, Edge::Bottom);
        let rects = tree.compute_rects(WINDOW);
        assert_eq!(rects.len(), 2);
        assert!(rect_approx_eq(&rect_of(&rects, p3), &Rect::new(0.0, 300.0, 800.0, 300.0)));
    }

    // ──────────────────────────────────────────
    // Divider drag
    // ──────────────────────────────────────────

    #[test]
    fn test_divider_drag_changes_ratio() {
        let (mut tree, p1) = tree_with_tabs(&[10, 11]);
        let p2 = drag_tab(&mut tree, p1, 11, p1, Edge::Right);

        tree.begin_drag(Vec2::new(400.0, 300.0), WINDOW);
        assert!(tree.is_dragging_divider());
        tree.drag_divider(Vec2::new(600.0, 300.0));
        tree.end_drag();

        let rects = tree.compute_rects(WINDOW);
        assert!(approx_eq(rect_of(&rects, p1).width, 600.0));
        assert!(approx_eq(rect_of(&rects, p2).width, 200.0));
        assert_no_gaps_no_overlaps(&rects, WINDOW);
    }

    #[test]
    fn test_divider_drag_clamps_min_ratio() {
        let (mut tree, p1) = tree_with_tabs(&[10, 11]);
        let _p2 = drag_tab(&mut tree, p1, 11, p1, Edge::Right);

        tree.begin_drag(Vec2::new(400.0, 300.0), WINDOW);
        tree.drag_divider(Vec2::new(0.0, 300.0));
        tree.end_drag();

        let rects = tree.compute_rects(WINDOW);
        assert!(rect_of(&rects, p1).width >= 800.0 * MIN_RATIO - 0.01);
    }

    #[test]
    fn test_begin_drag_away_from_divider_is_ignored() {
        let (mut tree, p1) = tree_with_tabs(&[10, 11]);
        let _p2 = drag_tab(&mut tree, p1, 11, p1, Edge::Right);

        tree.begin_drag(Vec2::new(100.0, 300.0), WINDOW);
        assert!(!tree.is_dragging_divider());
    }

    // ──────────────────────────────────────────
    // Drop-zone resolution
    // ──────────────────────────────────────────

    #[test]
    fn test_zone_at_edges() {
        let rect = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert_eq!(zone_at(rect, Vec2::new(40.0, 300.0)), Edge::Left);
        assert_eq!(zone_at(rect, Vec2::new(760.0, 300.0)), Edge::Right);
        assert_eq!(zone_at(rect, Vec2::new(400.0, 30.0)), Edge::Top);
        assert_eq!(zone_at(rect, Vec2::new(400.0, 570.0)), Edge::Bottom);
    }

    #[test]
    fn test_zone_at_respects_offset_rect() {
        let rect = Rect::new(400.0, 300.0, 400.0, 300.0);
        assert_eq!(zone_at(rect, Vec2::new(420.0, 450.0)), Edge::Left);
        assert_eq!(zone_at(rect, Vec2::new(600.0, 580.0)), Edge::Bottom);
    }

    #[test]
    fn test_zone_at_always_picks_an_edge() {
        // Dead center: ties go to the vertical axis, below-center side.
        let rect = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert_eq!(zone_at(rect, Vec2::new(400.0, 300.0)), Edge::Bottom);
    }

    #[test]
    fn test_zone_at_larger_normalized_axis_wins() {
        let rect = Rect::new(0.0, 0.0, 800.0, 600.0);
        // 75% toward the right edge but only 33% toward the top: horizontal wins.
        assert_eq!(zone_at(rect, Vec2::new(700.0, 200.0)), Edge::Right);
        // 90% toward the top, 25% toward the right: vertical wins.
        assert_eq!(zone_at(rect, Vec2::new(500.0, 30.0)), Edge::Top);
    }

    // ──────────────────────────────────────────
    // Hit testing
    // ──────────────────────────────────────────

    #[test]
    fn test_pane_at_position() {
        let (mut tree, p1) = tree_with_tabs(&[10, 11]);
        let p2 = drag_tab(&mut tree, p1, 11, p1, Edge::Right);

        assert_eq!(tree.pane_at(WINDOW, Vec2::new(100.0, 100.0)), Some(p1));
        assert_eq!(tree.pane_at(WINDOW, Vec2::new(700.0, 100.0)), Some(p2));
        assert_eq!(tree.pane_at(WINDOW, Vec2::new(900.0, 100.0)), None);
    }
}
