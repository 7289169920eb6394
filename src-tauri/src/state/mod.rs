use std::collections::HashMap;

use log::{debug, info};

use self::events::WindowEvent;
use self::geometry::{Layout, Viewport};
use self::window::{ChromeControls, Geometry, WindowConfig, WindowId, WindowRecord, WindowState};
use crate::error::WindowError;

pub mod events;
pub mod geometry;
pub mod window;

/// In-flight title bar drag. Replaced by the next `begin_drag`.
#[derive(Debug, Clone, Copy)]
struct DragSession {
    window_id: WindowId,
    origin: (i32, i32),
}

/// Registry of open windows: focus, z-order, minimize/maximize and drag.
///
/// Every mutation queues [`WindowEvent`]s; the owner drains them with
/// [`WindowManager::take_events`] and hands them to the views.
pub struct WindowManager {
    windows: HashMap<WindowId, WindowRecord>,
    window_stack: Vec<WindowId>, // Bottom to top
    layout: Layout,
    drag: Option<DragSession>,
    events: Vec<WindowEvent>,
}

impl WindowManager {
    pub fn new(layout: Layout) -> Self {
        Self {
            windows: HashMap::new(),
            window_stack: Vec::new(),
            layout,
            drag: None,
            events: Vec::new(),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Open a window, or focus the existing one if the request matches it
    /// under the request's match policy.
    pub fn create_window(&mut self, config: WindowConfig) -> Result<WindowRecord, WindowError> {
        if config.title.trim().is_empty() {
            return Err(WindowError::EmptyTitle);
        }
        if config.width <= 0 || config.height <= 0 {
            return Err(WindowError::InvalidSize {
                width: config.width,
                height: config.height,
            });
        }

        if let Some(existing) = self.find_duplicate(&config) {
            debug!(
                "[WM] '{}' already open as {}, focusing it",
                config.title, existing
            );
            self.activate(existing)?;
            return self.record(existing);
        }

        let id = WindowId::new();
        let geometry = self.layout.initial_placement(config.width, config.height);
        let z_order = (self.window_stack.len() as u32) + 1;

        let window = WindowRecord {
            id,
            kind: config.kind,
            title: config.title,
            icon: config.icon,
            icon_source: None,
            geometry,
            state: WindowState::Normal,
            is_active: false,
            saved_geometry: None,
            restore_maximized: false,
            controls: config.controls,
            z_order,
        };

        info!("[WM] Created window {} '{}'", id, window.title);
        self.windows.insert(id, window.clone());
        self.window_stack.push(id);
        self.events.push(WindowEvent::Created(window));

        self.activate(id)?;
        if config.start_maximized {
            self.force_maximize(id)?;
        }

        self.record(id)
    }

    /// Make `id` the only active window and raise it to the top
    pub fn activate(&mut self, id: WindowId) -> Result<(), WindowError> {
        self.activate_inner(id, false)
    }

    /// Clear focus on `id` only; no other window gains it
    pub fn deactivate(&mut self, id: WindowId) -> Result<(), WindowError> {
        let win = self.get_mut(id)?;
        if win.is_active {
            win.is_active = false;
            let snapshot = win.clone();
            self.events.push(WindowEvent::StateChanged(snapshot));
        }
        Ok(())
    }

    /// Clear focus everywhere (click on the desktop background)
    pub fn deactivate_all(&mut self) {
        let active: Vec<WindowId> = self.active_ids();
        for id in active {
            if let Some(win) = self.windows.get_mut(&id) {
                win.is_active = false;
                let snapshot = win.clone();
                self.events.push(WindowEvent::StateChanged(snapshot));
            }
        }
    }

    /// Toggle in and out of Minimized.
    ///
    /// Minimizing drops focus. Restoring does not give it back; callers that
    /// want the window focused (taskbar clicks) activate it afterwards.
    /// A maximized window keeps its restore geometry while minimized and comes
    /// back maximized.
    pub fn minimize(&mut self, id: WindowId) -> Result<(), WindowError> {
        let win = self.get_mut(id)?;
        match win.state {
            WindowState::Minimized if win.restore_maximized => {
                win.restore_maximized = false;
                win.state = WindowState::Normal;
                return self.enter_maximized(id);
            }
            WindowState::Minimized => {
                win.state = WindowState::Normal;
            }
            WindowState::Maximized => {
                if let Some(saved) = win.saved_geometry.take() {
                    win.geometry = saved;
                }
                win.restore_maximized = true;
                win.state = WindowState::Minimized;
                win.is_active = false;
            }
            WindowState::Normal => {
                win.state = WindowState::Minimized;
                win.is_active = false;
            }
        }
        let snapshot = win.clone();
        self.cancel_drag_for(id);
        self.events.push(WindowEvent::StateChanged(snapshot));
        Ok(())
    }

    /// Toggle in and out of Maximized. No-op for windows without the maximize button.
    pub fn maximize(&mut self, id: WindowId) -> Result<(), WindowError> {
        let win = self.get_mut(id)?;
        if !win.controls.contains(ChromeControls::MAXIMIZE) {
            debug!("[WM] {} has no maximize button, ignoring", id);
            return Ok(());
        }

        if win.state == WindowState::Maximized {
            if let Some(saved) = win.saved_geometry.take() {
                win.geometry = saved;
            }
            win.state = WindowState::Normal;
            let snapshot = win.clone();
            self.events.push(WindowEvent::StateChanged(snapshot));
            Ok(())
        } else {
            self.enter_maximized(id)
        }
    }

    /// Maximize regardless of the window's controls. Used for windows that
    /// open full screen without offering the toggle.
    pub fn force_maximize(&mut self, id: WindowId) -> Result<(), WindowError> {
        if self.get(id).ok_or(WindowError::NotFound(id))?.is_maximized() {
            return Ok(());
        }
        self.enter_maximized(id)
    }

    /// Remove the window. Saving unsaved content is the caller's business.
    pub fn close(&mut self, id: WindowId) -> Result<WindowRecord, WindowError> {
        let removed = self.windows.remove(&id).ok_or(WindowError::NotFound(id))?;

        if let Some(index) = self.window_stack.iter().position(|x| *x == id) {
            self.window_stack.remove(index);
        }
        self.cancel_drag_for(id);

        info!("[WM] Closed window {} '{}'", id, removed.title);
        self.events.push(WindowEvent::Closed(id));

        let shifted = self.normalize_stack();
        self.emit_changed(shifted);

        Ok(removed)
    }

    /// Start a title bar drag from the window's current position
    pub fn begin_drag(&mut self, id: WindowId) -> Result<(), WindowError> {
        let geometry = self.get(id).ok_or(WindowError::NotFound(id))?.geometry;
        self.drag = Some(DragSession {
            window_id: id,
            origin: (geometry.x, geometry.y),
        });
        Ok(())
    }

    /// Move a window by the cumulative pointer delta since the drag started.
    /// Only Normal windows move; the result is clamped to the work area.
    /// Dragging focuses the window.
    pub fn drag(&mut self, id: WindowId, dx: i32, dy: i32) -> Result<Geometry, WindowError> {
        let win = self.get(id).ok_or(WindowError::NotFound(id))?;
        if win.state != WindowState::Normal {
            debug!("[WM] {} is {:?}, not draggable", id, win.state);
            return Ok(win.geometry);
        }
        let current = win.geometry;

        let session = self.drag;
        let origin = match session {
            Some(session) if session.window_id == id => session.origin,
            _ => {
                self.drag = Some(DragSession {
                    window_id: id,
                    origin: (current.x, current.y),
                });
                (current.x, current.y)
            }
        };

        let (x, y) = self
            .layout
            .drag_position(origin, (dx, dy), (current.width, current.height));
        let moved = (x, y) != (current.x, current.y);

        let win = self.get_mut(id)?;
        win.geometry.x = x;
        win.geometry.y = y;
        let geometry = win.geometry;

        self.activate_inner(id, moved)?;
        Ok(geometry)
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Store an icon resolved after the window was created
    pub fn set_icon_source(&mut self, id: WindowId, source: String) -> Result<(), WindowError> {
        let win = self.get_mut(id)?;
        win.icon_source = Some(source);
        let snapshot = win.clone();
        self.events.push(WindowEvent::StateChanged(snapshot));
        Ok(())
    }

    pub fn set_title(&mut self, id: WindowId, title: String) -> Result<(), WindowError> {
        if title.trim().is_empty() {
            return Err(WindowError::EmptyTitle);
        }
        let win = self.get_mut(id)?;
        if win.title != title {
            win.title = title;
            let snapshot = win.clone();
            self.events.push(WindowEvent::StateChanged(snapshot));
        }
        Ok(())
    }

    /// The host surface was resized: refit maximized windows and pull
    /// the others back on screen.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.layout.viewport = viewport;
        let maximized = self.layout.maximized();

        let mut changed = Vec::new();
        for id in &self.window_stack {
            let Some(win) = self.windows.get_mut(id) else {
                continue;
            };
            let before = win.geometry;
            if win.state == WindowState::Maximized {
                win.geometry = maximized;
                if let Some(saved) = win.saved_geometry.as_mut() {
                    let (x, y) = self
                        .layout
                        .clamp_position(saved.x, saved.y, saved.width, saved.height);
                    saved.x = x;
                    saved.y = y;
                }
            } else {
                let g = win.geometry;
                let (x, y) = self.layout.clamp_position(g.x, g.y, g.width, g.height);
                win.geometry.x = x;
                win.geometry.y = y;
            }
            if win.geometry != before {
                changed.push(*id);
            }
        }
        self.emit_changed(changed);
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows.get(&id)
    }

    /// All windows, bottom of the stack first
    pub fn windows(&self) -> Vec<&WindowRecord> {
        self.window_stack
            .iter()
            .filter_map(|id| self.windows.get(id))
            .collect()
    }

    pub fn get_all_windows(&self) -> Vec<WindowRecord> {
        self.windows().into_iter().cloned().collect()
    }

    pub fn active_window(&self) -> Option<&WindowRecord> {
        self.windows.values().find(|w| w.is_active)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Drain the events queued since the last call
    pub fn take_events(&mut self) -> Vec<WindowEvent> {
        std::mem::take(&mut self.events)
    }

    fn activate_inner(&mut self, id: WindowId, touched: bool) -> Result<(), WindowError> {
        if !self.windows.contains_key(&id) {
            return Err(WindowError::NotFound(id));
        }

        let mut changed = Vec::new();
        for other in self.active_ids() {
            if other != id {
                if let Some(win) = self.windows.get_mut(&other) {
                    win.is_active = false;
                }
                changed.push(other);
            }
        }

        changed.extend(self.raise(id));

        let win = self.get_mut(id)?;
        if !win.is_active || touched {
            win.is_active = true;
            changed.push(id);
        }

        self.emit_changed(changed);
        Ok(())
    }

    fn enter_maximized(&mut self, id: WindowId) -> Result<(), WindowError> {
        let maximized = self.layout.maximized();
        let win = self.get_mut(id)?;
        win.saved_geometry = Some(win.geometry);
        win.geometry = maximized;
        win.restore_maximized = false;
        win.state = WindowState::Maximized;
        let snapshot = win.clone();
        self.cancel_drag_for(id);
        self.events.push(WindowEvent::StateChanged(snapshot));
        Ok(())
    }

    /// Move `id` to the top of the stack, returning every window whose z_order changed
    fn raise(&mut self, id: WindowId) -> Vec<WindowId> {
        match self.window_stack.iter().position(|x| *x == id) {
            Some(index) if index + 1 != self.window_stack.len() => {
                self.window_stack.remove(index);
                self.window_stack.push(id);
                self.normalize_stack()
            }
            _ => Vec::new(),
        }
    }

    fn normalize_stack(&mut self) -> Vec<WindowId> {
        let mut changed = Vec::new();
        for (i, win_id) in self.window_stack.iter().enumerate() {
            if let Some(win) = self.windows.get_mut(win_id) {
                let z_order = (i as u32) + 1;
                if win.z_order != z_order {
                    win.z_order = z_order;
                    changed.push(*win_id);
                }
            }
        }
        changed
    }

    /// Queue one StateChanged per distinct id, in stack order
    fn emit_changed(&mut self, ids: Vec<WindowId>) {
        if ids.is_empty() {
            return;
        }
        for id in &self.window_stack {
            if ids.contains(id) {
                if let Some(win) = self.windows.get(id) {
                    self.events.push(WindowEvent::StateChanged(win.clone()));
                }
            }
        }
    }

    fn find_duplicate(&self, config: &WindowConfig) -> Option<WindowId> {
        self.window_stack
            .iter()
            .rev()
            .filter_map(|id| self.windows.get(id))
            .find(|w| w.kind == config.kind && config.match_policy.matches(&config.title, &w.title))
            .map(|w| w.id)
    }

    fn active_ids(&self) -> Vec<WindowId> {
        self.windows
            .values()
            .filter(|w| w.is_active)
            .map(|w| w.id)
            .collect()
    }

    fn cancel_drag_for(&mut self, id: WindowId) {
        if self.drag.map(|s| s.window_id) == Some(id) {
            self.drag = None;
        }
    }

    fn get_mut(&mut self, id: WindowId) -> Result<&mut WindowRecord, WindowError> {
        self.windows.get_mut(&id).ok_or(WindowError::NotFound(id))
    }

    fn record(&self, id: WindowId) -> Result<WindowRecord, WindowError> {
        self.windows.get(&id).cloned().ok_or(WindowError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::{ApplicationKind, MatchPolicy};

    fn manager() -> WindowManager {
        WindowManager::new(Layout {
            viewport: Viewport::new(1920, 1080),
            taskbar_height: 30,
            window_margin: 20,
        })
    }

    fn active_count(wm: &WindowManager) -> usize {
        wm.windows().iter().filter(|w| w.is_active).count()
    }

    fn check_invariants(wm: &WindowManager) {
        assert!(active_count(wm) <= 1);
        for win in wm.windows() {
            assert_eq!(win.saved_geometry.is_some(), win.is_maximized());
        }
        let mut z: Vec<u32> = wm.windows().iter().map(|w| w.z_order).collect();
        z.sort();
        assert_eq!(z, (1..=wm.len() as u32).collect::<Vec<_>>());
    }

    #[test]
    fn test_create_window_activates_and_centers() {
        let mut wm = manager();
        let win = wm.create_window(WindowConfig::new("Calendar")).unwrap();

        assert!(win.is_active);
        assert_eq!(win.state, WindowState::Normal);
        assert_eq!(win.geometry, Geometry::new(560, 225, 800, 600));
        assert_eq!(win.z_order, 1);

        let events = wm.take_events();
        assert!(matches!(events[0], WindowEvent::Created(_)));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, WindowEvent::Created(_)))
                .count(),
            1
        );
        assert!(wm.take_events().is_empty());
    }

    #[test]
    fn test_create_window_rejects_bad_input() {
        let mut wm = manager();
        assert_eq!(
            wm.create_window(WindowConfig::new("  ")),
            Err(WindowError::EmptyTitle)
        );
        assert_eq!(
            wm.create_window(WindowConfig::new("Broken").size(0, 100)),
            Err(WindowError::InvalidSize {
                width: 0,
                height: 100
            })
        );
        assert!(wm.is_empty());
        assert!(wm.take_events().is_empty());
    }

    #[test]
    fn test_at_most_one_active() {
        let mut wm = manager();
        let a = wm.create_window(WindowConfig::new("A")).unwrap().id;
        let b = wm.create_window(WindowConfig::new("B")).unwrap().id;
        let c = wm.create_window(WindowConfig::new("C")).unwrap().id;
        check_invariants(&wm);

        wm.activate(a).unwrap();
        check_invariants(&wm);
        assert_eq!(wm.active_window().unwrap().id, a);

        wm.minimize(a).unwrap();
        check_invariants(&wm);
        assert!(wm.active_window().is_none());

        wm.activate(b).unwrap();
        wm.activate(c).unwrap();
        wm.deactivate(c).unwrap();
        check_invariants(&wm);
        assert_eq!(active_count(&wm), 0);

        wm.activate(b).unwrap();
        wm.activate(b).unwrap();
        check_invariants(&wm);
        assert_eq!(wm.active_window().unwrap().id, b);
    }

    #[test]
    fn test_activate_is_idempotent_and_raises() {
        let mut wm = manager();
        let a = wm.create_window(WindowConfig::new("A")).unwrap().id;
        let b = wm.create_window(WindowConfig::new("B")).unwrap().id;
        assert_eq!(wm.get(b).unwrap().z_order, 2);
        wm.take_events();

        wm.activate(a).unwrap();
        assert_eq!(wm.get(a).unwrap().z_order, 2);
        assert_eq!(wm.get(b).unwrap().z_order, 1);
        assert!(!wm.take_events().is_empty());

        wm.activate(a).unwrap();
        assert!(wm.take_events().is_empty());
    }

    #[test]
    fn test_duplicate_title_focuses_existing() {
        let mut wm = manager();
        let first = wm
            .create_window(WindowConfig::new("Untitled - Notepad"))
            .unwrap();
        let other = wm.create_window(WindowConfig::new("Calendar")).unwrap();
        assert_eq!(wm.active_window().unwrap().id, other.id);

        let second = wm
            .create_window(WindowConfig::new("Untitled - Notepad"))
            .unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(wm.len(), 2);
        assert!(wm.get(first.id).unwrap().is_active);
        assert!(!wm.get(other.id).unwrap().is_active);
    }

    #[test]
    fn test_duplicate_suffix_policy_is_per_kind() {
        let mut wm = manager();
        let policy = MatchPolicy::TitleSuffix(" - Notepad".to_string());
        let notes = wm
            .create_window(
                WindowConfig::new("todo.txt - Notepad")
                    .kind(ApplicationKind::Notepad)
                    .match_policy(policy.clone()),
            )
            .unwrap();

        let again = wm
            .create_window(
                WindowConfig::new("Untitled - Notepad")
                    .kind(ApplicationKind::Notepad)
                    .match_policy(policy.clone()),
            )
            .unwrap();
        assert_eq!(again.id, notes.id);

        // Same title but a different application is not a duplicate
        let generic = wm
            .create_window(WindowConfig::new("Untitled - Notepad").match_policy(policy))
            .unwrap();
        assert_ne!(generic.id, notes.id);
        assert_eq!(wm.len(), 2);
    }

    #[test]
    fn test_never_policy_always_creates() {
        let mut wm = manager();
        let config = WindowConfig::new("My Computer").match_policy(MatchPolicy::Never);
        let a = wm.create_window(config.clone()).unwrap();
        let b = wm.create_window(config).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(wm.len(), 2);
    }

    #[test]
    fn test_maximize_round_trip() {
        let mut wm = manager();
        let win = wm
            .create_window(WindowConfig::new("Explorer").size(800, 600))
            .unwrap();
        let original = win.geometry;

        wm.maximize(win.id).unwrap();
        let maximized = wm.get(win.id).unwrap();
        assert_eq!(maximized.state, WindowState::Maximized);
        assert_eq!(maximized.geometry, Geometry::new(0, 0, 1920, 1050));
        assert_eq!(maximized.saved_geometry, Some(original));

        wm.maximize(win.id).unwrap();
        let restored = wm.get(win.id).unwrap();
        assert_eq!(restored.state, WindowState::Normal);
        assert_eq!(restored.geometry, original);
        assert_eq!(restored.saved_geometry, None);
    }

    #[test]
    fn test_maximize_without_control_is_noop() {
        let mut wm = manager();
        let win = wm
            .create_window(
                WindowConfig::new("Calendar")
                    .controls(ChromeControls::MINIMIZE | ChromeControls::CLOSE),
            )
            .unwrap();
        wm.take_events();

        wm.maximize(win.id).unwrap();
        assert_eq!(wm.get(win.id).unwrap().state, WindowState::Normal);
        assert!(wm.take_events().is_empty());

        wm.force_maximize(win.id).unwrap();
        assert!(wm.get(win.id).unwrap().is_maximized());
        check_invariants(&wm);
    }

    #[test]
    fn test_start_maximized_without_control() {
        let mut wm = manager();
        let win = wm
            .create_window(
                WindowConfig::new("Intranet Mail")
                    .controls(ChromeControls::MINIMIZE | ChromeControls::CLOSE)
                    .start_maximized(true),
            )
            .unwrap();
        assert!(win.is_maximized());
        assert!(win.is_active);
        assert_eq!(win.geometry, wm.layout().maximized());

        // The toggle is not exposed, so it cannot be un-maximized through it
        wm.maximize(win.id).unwrap();
        assert!(wm.get(win.id).unwrap().is_maximized());
    }

    #[test]
    fn test_minimize_clears_activation_and_does_not_restore_it() {
        let mut wm = manager();
        let win = wm.create_window(WindowConfig::new("Notepad")).unwrap();
        assert!(win.is_active);

        wm.minimize(win.id).unwrap();
        let minimized = wm.get(win.id).unwrap();
        assert_eq!(minimized.state, WindowState::Minimized);
        assert!(!minimized.is_active);

        wm.minimize(win.id).unwrap();
        let restored = wm.get(win.id).unwrap();
        assert_eq!(restored.state, WindowState::Normal);
        assert!(!restored.is_active);
    }

    #[test]
    fn test_minimize_maximized_window_restores_geometry() {
        let mut wm = manager();
        let win = wm.create_window(WindowConfig::new("Explorer")).unwrap();
        wm.maximize(win.id).unwrap();

        wm.minimize(win.id).unwrap();
        let minimized = wm.get(win.id).unwrap();
        assert_eq!(minimized.state, WindowState::Minimized);
        assert_eq!(minimized.geometry, win.geometry);
        assert!(minimized.restore_maximized);
        check_invariants(&wm);

        wm.minimize(win.id).unwrap();
        let restored = wm.get(win.id).unwrap();
        assert!(restored.is_maximized());
        assert!(!restored.restore_maximized);
        assert_eq!(restored.geometry, wm.layout().maximized());
        assert_eq!(restored.saved_geometry, Some(win.geometry));
        check_invariants(&wm);

        // Leaving maximize still returns the original rectangle
        wm.maximize(win.id).unwrap();
        assert_eq!(wm.get(win.id).unwrap().geometry, win.geometry);
    }

    #[test]
    fn test_close_removes_exactly_one() {
        let mut wm = manager();
        let a = wm.create_window(WindowConfig::new("A").size(300, 200)).unwrap();
        let b = wm.create_window(WindowConfig::new("B").size(400, 300)).unwrap();
        let c = wm.create_window(WindowConfig::new("C").size(500, 400)).unwrap();
        wm.take_events();

        let closed = wm.close(b.id).unwrap();
        assert_eq!(closed.id, b.id);
        assert_eq!(wm.len(), 2);
        assert!(wm.get(b.id).is_none());
        assert_eq!(wm.get(a.id).unwrap().geometry, a.geometry);
        assert_eq!(wm.get(c.id).unwrap().geometry, c.geometry);

        let events = wm.take_events();
        let closes: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, WindowEvent::Closed(_)))
            .collect();
        assert_eq!(closes.len(), 1);
        assert_eq!(closes[0].window_id(), b.id);
        check_invariants(&wm);

        assert_eq!(wm.close(b.id), Err(WindowError::NotFound(b.id)));
    }

    #[test]
    fn test_drag_moves_and_clamps() {
        let mut wm = manager();
        let win = wm
            .create_window(WindowConfig::new("Drag me").size(400, 300))
            .unwrap();

        wm.begin_drag(win.id).unwrap();
        let g = wm.drag(win.id, 10, 15).unwrap();
        assert_eq!((g.x, g.y), (win.geometry.x + 10, win.geometry.y + 15));

        // Deltas are cumulative from the drag start, not incremental
        let g = wm.drag(win.id, 20, 20).unwrap();
        assert_eq!((g.x, g.y), (win.geometry.x + 20, win.geometry.y + 20));

        let g = wm.drag(win.id, -1_000_000, -1_000_000).unwrap();
        assert_eq!((g.x, g.y), (0, 0));

        let g = wm.drag(win.id, 1_000_000, 1_000_000).unwrap();
        assert_eq!((g.x, g.y), (1920 - 400, 1050 - 300));
        wm.end_drag();
    }

    #[test]
    fn test_drag_activates() {
        let mut wm = manager();
        let a = wm.create_window(WindowConfig::new("A")).unwrap().id;
        let b = wm.create_window(WindowConfig::new("B")).unwrap().id;
        assert_eq!(wm.active_window().unwrap().id, b);

        wm.drag(a, 5, 5).unwrap();
        assert_eq!(wm.active_window().unwrap().id, a);
        assert_eq!(wm.get(a).unwrap().z_order, 2);
        check_invariants(&wm);
    }

    #[test]
    fn test_maximized_window_is_not_draggable() {
        let mut wm = manager();
        let win = wm.create_window(WindowConfig::new("Full")).unwrap();
        wm.maximize(win.id).unwrap();
        wm.take_events();

        let g = wm.drag(win.id, 100, 100).unwrap();
        assert_eq!(g, wm.layout().maximized());
        assert!(wm.take_events().is_empty());
    }

    #[test]
    fn test_unknown_id_does_not_corrupt_state() {
        let mut wm = manager();
        let win = wm.create_window(WindowConfig::new("Only")).unwrap();
        wm.take_events();
        let ghost = WindowId::new();

        assert_eq!(wm.activate(ghost), Err(WindowError::NotFound(ghost)));
        assert_eq!(wm.deactivate(ghost), Err(WindowError::NotFound(ghost)));
        assert_eq!(wm.minimize(ghost), Err(WindowError::NotFound(ghost)));
        assert_eq!(wm.maximize(ghost), Err(WindowError::NotFound(ghost)));
        assert!(wm.drag(ghost, 1, 1).is_err());
        assert!(wm.set_icon_source(ghost, "x".into()).is_err());

        assert_eq!(wm.len(), 1);
        assert!(wm.get(win.id).unwrap().is_active);
        assert!(wm.take_events().is_empty());
    }

    #[test]
    fn test_set_viewport_refits_windows() {
        let mut wm = manager();
        let full = wm.create_window(WindowConfig::new("Full")).unwrap().id;
        wm.maximize(full).unwrap();
        let float = wm
            .create_window(WindowConfig::new("Float").size(400, 300))
            .unwrap()
            .id;
        wm.begin_drag(float).unwrap();
        wm.drag(float, 10_000, 10_000).unwrap();
        wm.end_drag();

        wm.set_viewport(Viewport::new(1024, 768));
        assert_eq!(wm.get(full).unwrap().geometry, Geometry::new(0, 0, 1024, 738));
        let g = wm.get(float).unwrap().geometry;
        assert_eq!((g.x, g.y), (1024 - 400, 738 - 300));
        check_invariants(&wm);
    }

    #[test]
    fn test_set_title_and_icon_emit_changes() {
        let mut wm = manager();
        let win = wm
            .create_window(WindowConfig::new("Untitled - Notepad"))
            .unwrap();
        wm.take_events();

        wm.set_title(win.id, "todo.txt - Notepad".to_string()).unwrap();
        wm.set_icon_source(win.id, "data:image/png;base64,AAAA".to_string())
            .unwrap();
        let events = wm.take_events();
        assert_eq!(events.len(), 2);

        let record = wm.get(win.id).unwrap();
        assert_eq!(record.title, "todo.txt - Notepad");
        assert_eq!(record.icon_source.as_deref(), Some("data:image/png;base64,AAAA"));
        assert_eq!(
            wm.set_title(win.id, String::new()),
            Err(WindowError::EmptyTitle)
        );
    }
}
