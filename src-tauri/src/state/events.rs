use serde::Serialize;

use super::window::{WindowId, WindowRecord};

/// Change notification emitted by the window manager after a mutation
#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(tag = "type", content = "payload")]
pub enum WindowEvent {
    Created(WindowRecord),
    Closed(WindowId),
    StateChanged(WindowRecord),
}

impl WindowEvent {
    pub fn window_id(&self) -> WindowId {
        match self {
            WindowEvent::Created(record) | WindowEvent::StateChanged(record) => record.id,
            WindowEvent::Closed(id) => *id,
        }
    }

    /// Event name used when forwarding to the webview
    pub fn name(&self) -> &'static str {
        match self {
            WindowEvent::Created(_) => "window-created",
            WindowEvent::Closed(_) => "window-closed",
            WindowEvent::StateChanged(_) => "window-state-changed",
        }
    }
}

/// A view that follows window changes (taskbar, webview bridge, ...)
pub trait WindowObserver {
    fn on_event(&mut self, event: &WindowEvent);
}
