// slate-workspace: ties the pane tree, tab strips, and drag coordinator
// together behind the command API a shell drives.
//
// Single-threaded and event-driven: every mutation runs to completion
// before the next event. Destructive follow-ups raised from inside an
// event (a collapse triggered by a close) go through the pending queue
// and run at the next idle tick.

mod drag;
mod settings;
mod theme;

use std::collections::VecDeque;
use std::io;
use std::path::Path;

use slate_core::{PaneId, Rect, RenderSurface, Size, TabId, Vec2};
use slate_editor::{CloseOutcome, Restyle, Tab, TabStrip};
use slate_layout::PaneTree;

pub use drag::{DragSession, DragStartError, DropOutcome, DropTarget, PaneDragState};
pub use settings::{load_settings, save_settings, LanguageOverride, SlateSettings};
pub use theme::{token_style, DRAG_THRESHOLD, TAB_BAR_HEIGHT};

// ──────────────────────────────────────────────
// Deferred actions
// ──────────────────────────────────────────────

/// Work raised inside an event that must not run on the same call stack,
/// queued for the next idle tick. One queue step collapses one tree level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PendingAction {
    Collapse(PaneId),
}

// ──────────────────────────────────────────────
// Workspace
// ──────────────────────────────────────────────

pub struct Workspace {
    pub(crate) tree: PaneTree,
    pub(crate) focused: PaneId,
    pub(crate) window_size: Size,
    pub(crate) pending: VecDeque<PendingAction>,
    pub(crate) drag: PaneDragState,
    settings: SlateSettings,
}

impl Workspace {
    /// A workspace with one pane holding one untitled tab.
    pub fn new(window_size: Size) -> Self {
        Self::with_settings(window_size, SlateSettings::default())
    }

    pub fn with_settings(window_size: Size, settings: SlateSettings) -> Self {
        let (mut tree, root) = PaneTree::new(TabStrip::new());
        let tab = Tab::untitled(tree.alloc_id());
        if let Some(strip) = tree.strip_mut(root) {
            strip.add_tab(tab);
        }
        Self {
            tree,
            focused: root,
            window_size,
            pending: VecDeque::new(),
            drag: PaneDragState::Idle,
            settings,
        }
    }

    // ── Geometry & focus ──

    pub fn resize(&mut self, window_size: Size) {
        self.window_size = window_size;
        self.tree.last_window_size = Some(window_size);
    }

    pub fn window_size(&self) -> Size {
        self.window_size
    }

    pub fn compute_rects(&self) -> Vec<(PaneId, Rect)> {
        self.tree.compute_rects(self.window_size)
    }

    pub fn pane_at(&self, position: Vec2) -> Option<PaneId> {
        self.tree.pane_at(self.window_size, position)
    }

    pub fn pane_ids(&self) -> Vec<PaneId> {
        self.tree.pane_ids()
    }

    pub fn focused_pane(&self) -> PaneId {
        self.focused
    }

    pub fn focus(&mut self, pane: PaneId) -> bool {
        if self.tree.contains(pane) {
            self.focused = pane;
            true
        } else {
            false
        }
    }

    pub fn strip(&self, pane: PaneId) -> Option<&TabStrip> {
        self.tree.strip(pane)
    }

    pub fn strip_mut(&mut self, pane: PaneId) -> Option<&mut TabStrip> {
        self.tree.strip_mut(pane)
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tree.strip(self.focused)?.current_tab()
    }

    pub fn active_tab_mut(&mut self) -> Option<&mut Tab> {
        self.tree.strip_mut(self.focused)?.current_tab_mut()
    }

    pub fn settings(&self) -> &SlateSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SlateSettings {
        &mut self.settings
    }

    // ── Tab commands ──

    /// Append a fresh untitled tab to `pane` and focus it.
    pub fn new_tab(&mut self, pane: PaneId) -> Option<TabId> {
        if self.tree.strip(pane).is_none() {
            return None;
        }
        let id = self.tree.alloc_id();
        let strip = self.tree.strip_mut(pane)?;
        strip.add_tab(Tab::untitled(id));
        self.focused = pane;
        Some(id)
    }

    /// Open a file in `pane`: reuses a pristine untitled tab, otherwise
    /// appends a new one. Settings overrides beat extension detection.
    pub fn open_file(&mut self, pane: PaneId, path: &Path) -> io::Result<TabId> {
        if self.tree.strip(pane).is_none() {
            return Err(io::Error::other("pane not found"));
        }
        let override_lang = path.to_str().and_then(|p| self.settings.language_for(p));

        let reuse = self
            .tree
            .strip(pane)
            .and_then(|s| s.current_tab())
            .is_some_and(Tab::is_pristine);
        if reuse {
            if let Some(tab) = self.tree.strip_mut(pane).and_then(|s| s.current_tab_mut()) {
                if let Err(e) = tab.load_file(path) {
                    log::error!("Failed to open {}: {}", path.display(), e);
                    return Err(e);
                }
                if override_lang.is_some() {
                    tab.set_language(override_lang);
                }
                let id = tab.id;
                self.focused = pane;
                return Ok(id);
            }
        }

        let id = self.tree.alloc_id();
        match Tab::from_file(id, path) {
            Ok(mut tab) => {
                if override_lang.is_some() {
                    tab.set_language(override_lang);
                }
                if let Some(strip) = self.tree.strip_mut(pane) {
                    strip.add_tab(tab);
                }
                self.focused = pane;
                Ok(id)
            }
            Err(e) => {
                log::error!("Failed to open {}: {}", path.display(), e);
                Err(e)
            }
        }
    }

    /// Save the focused pane's current tab. A pathless tab needs save-as,
    /// which the dialog layer drives via `Tab::save_as`.
    pub fn save_active(&mut self) -> io::Result<()> {
        let Some(tab) = self.active_tab_mut() else {
            return Ok(());
        };
        if let Err(e) = tab.save() {
            log::error!("Failed to save file: {}", e);
            return Err(e);
        }
        Ok(())
    }

    /// Close a tab. A split strip that empties queues its pane's collapse
    /// for the next idle tick rather than collapsing mid-call.
    pub fn close_tab(&mut self, pane: PaneId, tab: TabId) -> Option<CloseOutcome> {
        let outcome = self.tree.strip_mut(pane)?.close_tab(tab)?;
        if outcome == CloseOutcome::BecameEmpty {
            self.pending.push_back(PendingAction::Collapse(pane));
        }
        Some(outcome)
    }

    pub fn close_active_tab(&mut self) -> Option<CloseOutcome> {
        let tab_id = self.active_tab()?.id;
        self.close_tab(self.focused, tab_id)
    }

    // ── Deferred actions ──

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// The idle tick: run queued follow-ups. Collapses that empty further
    /// levels re-enqueue, so deep trees unwind one level per queue step.
    pub fn drain_pending(&mut self) {
        while let Some(action) = self.pending.pop_front() {
            match action {
                PendingAction::Collapse(pane) => match self.tree.collapse(pane) {
                    Ok(()) => {
                        if !self.tree.contains(self.focused) {
                            if let Some(&first) = self.tree.pane_ids().first() {
                                self.focused = first;
                            }
                        }
                    }
                    // A stale signal (the pane re-filled or was already
                    // collapsed) is a recoverable no-op.
                    Err(e) => log::warn!("Deferred collapse skipped: {}", e),
                },
            }
        }
    }

    // ── Divider drag passthrough ──

    pub fn begin_divider_drag(&mut self, position: Vec2) {
        self.tree.begin_drag(position, self.window_size);
    }

    pub fn drag_divider(&mut self, position: Vec2) {
        self.tree.drag_divider(position);
    }

    pub fn end_divider_drag(&mut self) {
        self.tree.end_drag();
    }
}

/// Push restyled lines to a render surface in order.
pub fn push_restyle(surface: &mut dyn RenderSurface, restyle: &Restyle) {
    for (line, spans) in restyle {
        surface.apply_spans(*line, spans);
    }
}
